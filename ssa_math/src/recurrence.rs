//! Linear recurrent formula derived from an SSA signal subspace
//!
//! For an orthonormal basis `U_1..U_r` of window length `L`, let `π_i` be the
//! last coordinate of `U_i`, `U_i^∇` the first `L - 1` coordinates and
//! `ν² = Σ π_i²`. When `ν² < 1` the series in the subspace satisfies
//! `x_n = Σ_j R_j x_{n-L+1+j}` with `R = Σ π_i U_i^∇ / (1 - ν²)`.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Largest verticality coefficient accepted before the recurrence is ill-posed
const MAX_VERTICALITY: f64 = 1.0 - 1e-9;

/// Linear recurrence `x_n = Σ coefficients[j] * x_{n-order+j}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRecurrence {
    /// Coefficients ordered from the oldest lag to the most recent one
    coefficients: Vec<f64>,
    /// Verticality coefficient ν² of the basis the recurrence came from
    verticality: f64,
}

impl LinearRecurrence {
    fn from_parts(coefficients: Vec<f64>, verticality: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(MathError::InvalidInput(
                "A recurrence needs at least one coefficient".to_string(),
            ));
        }
        Ok(Self {
            coefficients,
            verticality,
        })
    }

    /// Derive the recurrence from an orthonormal signal basis
    pub fn from_basis(basis: &[Vec<f64>]) -> Result<Self> {
        let window = basis.first().map(|u| u.len()).unwrap_or(0);
        if window < 2 {
            return Err(MathError::InvalidInput(
                "Basis vectors must have a window length of at least 2".to_string(),
            ));
        }
        if basis.iter().any(|u| u.len() != window) {
            return Err(MathError::InvalidInput(
                "Basis vectors must all have the same length".to_string(),
            ));
        }

        let verticality: f64 = basis.iter().map(|u| u[window - 1].powi(2)).sum();
        if verticality >= MAX_VERTICALITY {
            return Err(MathError::CalculationError(format!(
                "Verticality coefficient {:.6} is too close to 1 for a linear recurrence",
                verticality
            )));
        }

        let mut coefficients = vec![0.0; window - 1];
        for u in basis {
            let pi = u[window - 1];
            for (c, ui) in coefficients.iter_mut().zip(&u[..window - 1]) {
                *c += pi * ui;
            }
        }
        let scale = 1.0 / (1.0 - verticality);
        coefficients.iter_mut().for_each(|c| *c *= scale);

        Self::from_parts(coefficients, verticality)
    }

    /// Number of past values each step depends on
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// Coefficients ordered from the oldest lag to the most recent one
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Verticality coefficient ν² of the source basis
    pub fn verticality(&self) -> f64 {
        self.verticality
    }

    /// Next value after `history`, using its last `order()` entries
    pub fn next_value(&self, history: &[f64]) -> Result<f64> {
        let order = self.order();
        if history.len() < order {
            return Err(MathError::InsufficientData(format!(
                "Recurrence of order {} needs {} past values, got {}",
                order,
                order,
                history.len()
            )));
        }

        Ok(self
            .coefficients
            .iter()
            .zip(&history[history.len() - order..])
            .map(|(c, x)| c * x)
            .sum())
    }

    /// Continue `seed` for `steps` values, feeding each forecast back in
    pub fn extrapolate(&self, seed: &[f64], steps: usize) -> Result<Vec<f64>> {
        let order = self.order();
        if seed.len() < order {
            return Err(MathError::InsufficientData(format!(
                "Extrapolation needs {} seed values, got {}",
                order,
                seed.len()
            )));
        }

        let mut history = seed[seed.len() - order..].to_vec();
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            let next = self.next_value(&history)?;
            history.remove(0);
            history.push(next);
            out.push(next);
        }
        Ok(out)
    }

    /// One-step-ahead errors `x_t - x̂_t` over `series`, seeded with observed values
    pub fn one_step_residuals(&self, series: &[f64]) -> Result<Vec<f64>> {
        let order = self.order();
        if series.len() <= order {
            return Err(MathError::InsufficientData(format!(
                "Residuals need more than {} observations, got {}",
                order,
                series.len()
            )));
        }

        (order..series.len())
            .map(|t| Ok(series[t] - self.next_value(&series[..t])?))
            .collect()
    }

    /// First `steps` weights ψ of the recurrence's impulse response, with ψ₀ = 1
    ///
    /// The h-step forecast error variance is `σ² Σ_{k<h} ψ_k²` for white
    /// one-step errors of variance `σ²`.
    pub fn impulse_response(&self, steps: usize) -> Vec<f64> {
        let order = self.order();
        let mut psi: Vec<f64> = Vec::with_capacity(steps);
        for m in 0..steps {
            if m == 0 {
                psi.push(1.0);
                continue;
            }
            // Lag k weight is coefficients[order - k]
            let value = (1..=m.min(order))
                .map(|k| self.coefficients[order - k] * psi[m - k])
                .sum();
            psi.push(value);
        }
        psi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_basis(window: usize) -> Vec<Vec<f64>> {
        // Orthonormal basis of span{1, j} over j = 0..window
        let n = window as f64;
        let u1: Vec<f64> = vec![1.0 / n.sqrt(); window];
        let mean = (n - 1.0) / 2.0;
        let centered: Vec<f64> = (0..window).map(|j| j as f64 - mean).collect();
        let norm = centered.iter().map(|v| v * v).sum::<f64>().sqrt();
        let u2 = centered.iter().map(|v| v / norm).collect();
        vec![u1, u2]
    }

    #[test]
    fn test_linear_trend_continues() {
        let recurrence = LinearRecurrence::from_basis(&linear_basis(10)).unwrap();
        assert_eq!(recurrence.order(), 9);

        let seed: Vec<f64> = (0..9).map(|t| 100.0 + 0.5 * t as f64).collect();
        let forecast = recurrence.extrapolate(&seed, 3).unwrap();
        assert!((forecast[0] - 104.5).abs() < 1e-9);
        assert!((forecast[1] - 105.0).abs() < 1e-9);
        assert!((forecast[2] - 105.5).abs() < 1e-9);
    }

    #[test]
    fn test_constant_basis_coefficients_sum_to_one() {
        let window = 5;
        let basis = vec![vec![1.0 / (window as f64).sqrt(); window]];
        let recurrence = LinearRecurrence::from_basis(&basis).unwrap();
        let sum: f64 = recurrence.coefficients().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((recurrence.verticality() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_basis_rejected() {
        let basis = vec![vec![0.0, 0.0, 1.0]];
        assert!(matches!(
            LinearRecurrence::from_basis(&basis),
            Err(MathError::CalculationError(_))
        ));
    }

    #[test]
    fn test_residuals_zero_on_exact_signal() {
        let recurrence = LinearRecurrence::from_basis(&linear_basis(6)).unwrap();
        let series: Vec<f64> = (0..40).map(|t| 3.0 - 0.25 * t as f64).collect();
        let residuals = recurrence.one_step_residuals(&series).unwrap();
        assert_eq!(residuals.len(), 40 - 5);
        assert!(residuals.iter().all(|r| r.abs() < 1e-9));
    }

    #[test]
    fn test_impulse_response() {
        // x_n = 2 x_{n-1} - x_{n-2}: ψ = 1, 2, 3, 4
        let recurrence = LinearRecurrence::from_parts(vec![-1.0, 2.0], 0.0).unwrap();
        assert_eq!(recurrence.impulse_response(4), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(recurrence.impulse_response(0).is_empty());
    }

    #[test]
    fn test_short_seed_rejected() {
        let recurrence = LinearRecurrence::from_parts(vec![0.5, 0.5], 0.0).unwrap();
        assert!(recurrence.extrapolate(&[1.0], 2).is_err());
        assert!(recurrence.next_value(&[]).is_err());
        assert!(LinearRecurrence::from_parts(Vec::new(), 0.0).is_err());
    }
}
