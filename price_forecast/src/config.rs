//! Forecaster hyperparameters

use crate::data::Column;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Hyperparameters of the SSA forecaster
///
/// The defaults are window 10, series length 30, training size 1000,
/// horizon 5 and a 95% confidence level on the close column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Length of each lagged window in the trajectory matrix
    pub window_size: usize,
    /// Number of most recent observations kept as rolling state
    pub series_length: usize,
    /// Number of leading observations the model is fitted on
    pub train_size: usize,
    /// Number of future steps to forecast
    pub horizon: usize,
    /// Confidence level of the forecast bounds, in (0, 1)
    pub confidence_level: f64,
    /// Upper bound on the number of signal components
    pub max_rank: usize,
    /// Eigenvalues at or below this fraction of the largest one count as noise
    pub rank_tolerance: f64,
    /// Column the model is fitted on
    pub column: Column,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let window_size = 10;
        Self {
            window_size,
            series_length: 30,
            train_size: 1000,
            horizon: 5,
            confidence_level: 0.95,
            max_rank: window_size / 2,
            rank_tolerance: 1e-10,
            column: Column::Close,
        }
    }
}

impl ForecastConfig {
    /// Parse a (possibly partial) JSON document on top of the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the hyperparameters are mutually consistent
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(ForecastError::ConfigurationError(format!(
                "window_size must be at least 2, got {}",
                self.window_size
            )));
        }
        if self.series_length < self.window_size {
            return Err(ForecastError::ConfigurationError(format!(
                "series_length ({}) must be at least window_size ({})",
                self.series_length, self.window_size
            )));
        }
        if self.train_size < 2 * self.window_size {
            return Err(ForecastError::ConfigurationError(format!(
                "train_size ({}) must be at least twice window_size ({})",
                self.train_size, self.window_size
            )));
        }
        if self.horizon == 0 {
            return Err(ForecastError::ConfigurationError(
                "horizon must be positive".to_string(),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::ConfigurationError(format!(
                "confidence_level must be between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        if self.max_rank == 0 || self.max_rank >= self.window_size {
            return Err(ForecastError::ConfigurationError(format!(
                "max_rank must be in 1..{}, got {}",
                self.window_size, self.max_rank
            )));
        }
        if !(self.rank_tolerance > 0.0 && self.rank_tolerance < 1.0) {
            return Err(ForecastError::ConfigurationError(format!(
                "rank_tolerance must be between 0 and 1, got {}",
                self.rank_tolerance
            )));
        }
        Ok(())
    }

    /// Minimum number of observations a dataset needs
    pub fn required_observations(&self) -> usize {
        self.train_size.max(self.series_length)
    }
}
