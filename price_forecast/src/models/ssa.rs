//! Singular spectrum analysis forecaster
//!
//! Training centers the first `train_size` observations on their mean, embeds
//! them into a trajectory matrix, eigen-decomposes its lag-covariance and keeps
//! the components above the numerical rank tolerance as the signal subspace. The subspace yields a linear recurrence
//! used both for one-step residuals (the error variance behind the bounds)
//! and for extrapolation from the reconstructed rolling state.

use crate::config::ForecastConfig;
use crate::data::Dataset;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::utils;
use chrono::{DateTime, Duration, Utc};
use ssa_math::{embedding, symmetric_eigen, LinearRecurrence, MathError};
use std::collections::VecDeque;
use tracing::{debug, info};

/// SSA forecasting model
#[derive(Debug, Clone)]
pub struct SsaForecaster {
    /// Name of the model
    name: String,
    /// Hyperparameters
    config: ForecastConfig,
}

/// Trained SSA forecasting model
#[derive(Debug, Clone)]
pub struct TrainedSsa {
    /// Name of the model
    name: String,
    /// Hyperparameters
    config: ForecastConfig,
    /// Mean of the training prefix, removed before embedding
    level: f64,
    /// Eigenvalues of the training lag-covariance, descending
    eigenvalues: Vec<f64>,
    /// Orthonormal basis of the signal subspace
    basis: Vec<Vec<f64>>,
    /// Recurrence derived from the basis
    recurrence: LinearRecurrence,
    /// Standard deviation of the one-step training residuals
    residual_std: f64,
    /// Most recent `series_length` observations
    state: VecDeque<f64>,
    /// Time of the newest observation in the state
    last_timestamp: Option<DateTime<Utc>>,
    /// Spacing between observations
    step: Option<Duration>,
}

impl SsaForecaster {
    /// Create a new SSA forecaster
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            name: format!(
                "SSA (window={}, series={}, train={})",
                config.window_size, config.series_length, config.train_size
            ),
            config,
        })
    }

    /// Get the hyperparameters
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Fit the signal subspace, lowering the rank until a recurrence exists
    fn fit_subspace(
        &self,
        training: &[f64],
    ) -> Result<(Vec<f64>, Vec<Vec<f64>>, LinearRecurrence)> {
        let covariance = embedding::lag_covariance(training, self.config.window_size)?;
        let eigen = symmetric_eigen(&covariance)?;

        let window = self.config.window_size;
        let numerical_rank = eigen.numerical_rank(self.config.rank_tolerance);
        if numerical_rank == 0 {
            // Flat training series: any recurrence continues zero
            debug!("Training series is constant after centering");
            let basis = vec![vec![1.0 / (window as f64).sqrt(); window]];
            let recurrence = LinearRecurrence::from_basis(&basis)?;
            return Ok((eigen.values().to_vec(), basis, recurrence));
        }

        let mut rank = numerical_rank.min(self.config.max_rank);
        loop {
            let basis = eigen.leading(rank);
            match LinearRecurrence::from_basis(&basis) {
                Ok(recurrence) => {
                    info!(
                        rank,
                        numerical_rank,
                        verticality = recurrence.verticality(),
                        "Selected SSA signal subspace"
                    );
                    return Ok((eigen.values().to_vec(), basis, recurrence));
                }
                Err(MathError::CalculationError(reason)) if rank > 1 => {
                    debug!(rank, %reason, "Recurrence unavailable, lowering rank");
                    rank -= 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl ForecastModel for SsaForecaster {
    type Trained = TrainedSsa;

    fn train(&self, data: &Dataset) -> Result<TrainedSsa> {
        let required = self.config.required_observations();
        if data.len() < required {
            return Err(ForecastError::ConfigurationError(format!(
                "Insufficient data for SSA: need at least {} observations (train_size={}, series_length={}), found {}",
                required,
                self.config.train_size,
                self.config.series_length,
                data.len()
            )));
        }

        let series: Vec<f64> = data
            .column(self.config.column)
            .into_iter()
            .map(f64::from)
            .collect();
        if let Some(i) = series.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Non-finite {} value at row {}",
                self.config.column,
                i + 1
            )));
        }

        let training = &series[..self.config.train_size];
        let level = training.iter().sum::<f64>() / training.len() as f64;
        let centered: Vec<f64> = training.iter().map(|v| v - level).collect();
        let (eigenvalues, basis, recurrence) = self.fit_subspace(&centered)?;

        let residuals = recurrence.one_step_residuals(&centered)?;
        let variance = residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64;
        let residual_std = variance.sqrt();
        debug!(residual_std, residuals = residuals.len(), "Computed training residuals");

        let state: VecDeque<f64> = series[series.len() - self.config.series_length..]
            .iter()
            .copied()
            .collect();

        Ok(TrainedSsa {
            name: self.name.clone(),
            config: self.config.clone(),
            level,
            eigenvalues,
            basis,
            recurrence,
            residual_std,
            state,
            last_timestamp: data.last_datetime(),
            step: data.sampling_interval(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedSsa {
    /// Number of signal components kept
    pub fn rank(&self) -> usize {
        self.basis.len()
    }

    /// Mean of the training prefix, added back to every forecast
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Eigenvalues of the centered training lag-covariance, descending
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Recurrence used for extrapolation
    pub fn recurrence(&self) -> &LinearRecurrence {
        &self.recurrence
    }

    /// Standard deviation of the one-step training residuals
    pub fn residual_std(&self) -> f64 {
        self.residual_std
    }

    /// Current rolling state, oldest first
    pub fn state(&self) -> &VecDeque<f64> {
        &self.state
    }

    /// Push a new observation into the rolling state
    pub fn observe(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ForecastError::DataError(format!(
                "Cannot observe non-finite value {}",
                value
            )));
        }

        self.state.push_back(value);
        if self.state.len() > self.config.series_length {
            self.state.pop_front();
        }
        if let (Some(last), Some(step)) = (self.last_timestamp, self.step) {
            self.last_timestamp = Some(last + step);
        }
        Ok(())
    }
}

impl TrainedForecastModel for TrainedSsa {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be positive".to_string(),
            ));
        }

        let state: Vec<f64> = self.state.iter().map(|v| v - self.level).collect();
        let smoothed = embedding::reconstruct(&state, &self.basis)?;
        let forecasts: Vec<f64> = self
            .recurrence
            .extrapolate(&smoothed, horizon)?
            .into_iter()
            .map(|f| f + self.level)
            .collect();

        let z = utils::z_score(self.config.confidence_level)?;
        let mut cumulative = 0.0;
        let margins: Vec<f64> = self
            .recurrence
            .impulse_response(horizon)
            .into_iter()
            .map(|psi| {
                cumulative += psi * psi;
                z * self.residual_std * cumulative.sqrt()
            })
            .collect();

        let values = forecasts.iter().map(|&f| f as f32).collect();
        let lower = forecasts
            .iter()
            .zip(&margins)
            .map(|(f, m)| (f - m) as f32)
            .collect();
        let upper = forecasts
            .iter()
            .zip(&margins)
            .map(|(f, m)| (f + m) as f32)
            .collect();

        let result = ForecastResult::new(values, lower, upper, self.config.confidence_level)?;
        match (self.last_timestamp, self.step) {
            (Some(last), Some(step)) => {
                result.with_timestamps(utils::future_timestamps(last, horizon, step))
            }
            _ => Ok(result),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
