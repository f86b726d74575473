//! Load, fit, forecast and report, once

use crate::config::ForecastConfig;
use crate::data::{DataLoader, Dataset};
use crate::error::Result;
use crate::models::ssa::SsaForecaster;
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::report;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Run the whole pipeline on a CSV file, writing progress and report lines to `out`
pub fn run<P: AsRef<Path>, W: Write>(
    path: P,
    config: &ForecastConfig,
    out: &mut W,
) -> Result<ForecastResult> {
    writeln!(out, "Loading data...")?;
    let data = DataLoader::from_csv(path)?;
    info!(rows = data.len(), "Loaded dataset");

    run_dataset(&data, config, out)
}

/// Fit, forecast and report on an already loaded dataset
pub fn run_dataset<W: Write>(
    data: &Dataset,
    config: &ForecastConfig,
    out: &mut W,
) -> Result<ForecastResult> {
    writeln!(out, "Training model...")?;
    let model = SsaForecaster::new(config.clone())?;
    let trained = model.train(data)?;
    info!(model = trained.name(), rank = trained.rank(), "Model trained");

    writeln!(out, "Making predictions...")?;
    let forecast = trained.forecast(config.horizon)?;

    writeln!(out, "Forecasting results:")?;
    report::write_report(out, &forecast)?;

    Ok(forecast)
}
