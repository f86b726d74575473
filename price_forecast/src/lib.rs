//! # Price Forecast
//!
//! Short-horizon closing price forecasts from OHLCV CSV files using
//! singular spectrum analysis (SSA).
//!
//! ## Features
//!
//! - Strict column-typed CSV loading (`Timestamp, Open, High, Low, Close, Volume`)
//! - SSA forecaster with configurable window, rolling state length, training size and horizon
//! - Confidence bounds from the residual variance of the fitted recurrence
//! - Plain-text report, one line per forecast step
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::models::ssa::SsaForecaster;
//! use price_forecast::{DataLoader, ForecastConfig, ForecastModel, TrainedForecastModel};
//!
//! // Load data
//! let data = DataLoader::from_csv("btcusd_1-min_data.csv")?;
//!
//! // Fit with the default hyperparameters (window 10, series 30, train 1000)
//! let model = SsaForecaster::new(ForecastConfig::default())?;
//! let trained = model.train(&data)?;
//!
//! // Forecast five steps ahead
//! let forecast = trained.forecast(5)?;
//! for (day, value) in forecast.values().iter().enumerate() {
//!     println!("Day {}: {:.2}", day + 1, value);
//! }
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{Column, DataLoader, Dataset, PricePoint};
pub use crate::error::ForecastError;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
