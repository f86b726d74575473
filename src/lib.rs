//! # BTC Predict
//!
//! Workspace facade for the BTC closing price forecaster.
//!
//! - [`price_forecast`]: CSV loading, the SSA forecaster, reporting and the `btc_predict` binary
//! - [`ssa_math`]: matrices, eigen-decomposition and linear recurrences behind the forecaster
//!
//! ## Example
//!
//! ```
//! use btc_predict_workspace::price_forecast::report::format_line;
//!
//! assert_eq!(format_line(0, 42.0), "Day 1: Predicted Close = 42.00 USD");
//! ```

pub use price_forecast;
pub use ssa_math;
