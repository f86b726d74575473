//! Forecasting models for price data

use crate::data::Dataset;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Forecast result with index-aligned confidence bounds
///
/// Position `i` of every sequence is `i + 1` steps past the last observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Forecasted values
    values: Vec<f32>,
    /// Lower confidence bounds
    lower: Vec<f32>,
    /// Upper confidence bounds
    upper: Vec<f32>,
    /// Confidence level of the bounds
    confidence_level: f64,
    /// Projected time of each step (optional)
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl ForecastResult {
    /// Create a new forecast result with confidence bounds
    pub fn new(
        values: Vec<f32>,
        lower: Vec<f32>,
        upper: Vec<f32>,
        confidence_level: f64,
    ) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::ValidationError(
                "A forecast needs at least one value".to_string(),
            ));
        }
        if lower.len() != values.len() || upper.len() != values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match bounds lengths ({}, {})",
                values.len(),
                lower.len(),
                upper.len()
            )));
        }
        let misordered = values
            .iter()
            .zip(lower.iter().zip(&upper))
            .position(|(v, (l, u))| !(l <= v && v <= u));
        if let Some(step) = misordered {
            return Err(ForecastError::ValidationError(format!(
                "Bounds at step {} do not contain the forecast",
                step + 1
            )));
        }

        Ok(Self {
            values,
            lower,
            upper,
            confidence_level,
            timestamps: None,
        })
    }

    /// Attach a projected timestamp to every step
    pub fn with_timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Result<Self> {
        if timestamps.len() != self.values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Timestamps length ({}) doesn't match horizon ({})",
                timestamps.len(),
                self.values.len()
            )));
        }
        self.timestamps = Some(timestamps);
        Ok(self)
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Get the lower confidence bounds
    pub fn lower(&self) -> &[f32] {
        &self.lower
    }

    /// Get the upper confidence bounds
    pub fn upper(&self) -> &[f32] {
        &self.upper
    }

    /// Get the number of steps forecasted
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Get the confidence level of the bounds
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Get the timestamps, if available
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    /// Bounds as `(lower, upper)` pairs
    pub fn intervals(&self) -> Vec<(f32, f32)> {
        self.lower
            .iter()
            .copied()
            .zip(self.upper.iter().copied())
            .collect()
    }

    /// Serialize the forecast to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on price data
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on price data
    fn train(&self, data: &Dataset) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod ssa;
