//! Utility functions for the price_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use statrs::distribution::{ContinuousCDF, Normal as StandardNormal};

/// Two-sided standard normal quantile for a confidence level, e.g. 1.96 for 0.95
pub fn z_score(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Confidence level must be between 0 and 1, got {}",
            confidence_level
        )));
    }

    let normal = StandardNormal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
    Ok(normal.inverse_cdf((1.0 + confidence_level) / 2.0))
}

/// Create future timestamps spaced by `step`
pub fn future_timestamps(
    last_timestamp: DateTime<Utc>,
    horizon: usize,
    step: Duration,
) -> Vec<DateTime<Utc>> {
    let mut timestamps = Vec::with_capacity(horizon);
    let mut current = last_timestamp;

    for _ in 0..horizon {
        current += step;
        timestamps.push(current);
    }

    timestamps
}

/// Generate `start + slope * t` plus seeded Gaussian noise
pub fn synthetic_series(
    len: usize,
    start: f64,
    slope: f64,
    noise_std: f64,
    seed: u64,
) -> Result<Vec<f32>> {
    if !(noise_std >= 0.0 && noise_std.is_finite()) {
        return Err(ForecastError::InvalidParameter(format!(
            "Noise level must be a finite non-negative number, got {}",
            noise_std
        )));
    }
    let noise = Normal::new(0.0, noise_std).map_err(|e| {
        ForecastError::InvalidParameter(format!("Invalid noise level {}: {}", noise_std, e))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok((0..len)
        .map(|t| (start + slope * t as f64 + noise.sample(&mut rng)) as f32)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score() {
        assert!((z_score(0.95).unwrap() - 1.959964).abs() < 1e-5);
        assert!((z_score(0.99).unwrap() - 2.575829).abs() < 1e-5);
        assert!(z_score(1.0).is_err());
        assert!(z_score(0.0).is_err());
    }

    #[test]
    fn test_future_timestamps() {
        let last = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let steps = future_timestamps(last, 3, Duration::minutes(1));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].timestamp(), 1_700_000_060);
        assert_eq!(steps[2].timestamp(), 1_700_000_180);
    }

    #[test]
    fn test_synthetic_series_is_seeded() {
        let a = synthetic_series(50, 100.0, 0.5, 1.0, 7).unwrap();
        let b = synthetic_series(50, 100.0, 0.5, 1.0, 7).unwrap();
        assert_eq!(a, b);

        let clean = synthetic_series(4, 100.0, 0.5, 0.0, 7).unwrap();
        assert_eq!(clean, vec![100.0, 100.5, 101.0, 101.5]);

    }

    #[test]
    fn test_synthetic_series_rejects_bad_noise() {
        for noise_std in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                synthetic_series(4, 100.0, 0.5, noise_std, 7),
                Err(ForecastError::InvalidParameter(_))
            ));
        }
    }
}
