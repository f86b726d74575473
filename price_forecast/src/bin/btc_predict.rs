//! Forecast the next five closing prices of a BTC/USD CSV file
//!
//! # Usage
//! ```sh
//! btc_predict [DATA_PATH]
//! ```
//!
//! `DATA_PATH` defaults to `btcusd_1-min_data.csv`. Diagnostics go to stderr
//! and are filtered by `RUST_LOG` (default `warn`).

use price_forecast::{pipeline, ForecastConfig};
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_PATH: &str = "btcusd_1-min_data.csv";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let data_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let config = ForecastConfig::default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match pipeline::run(&data_path, &config, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(path = %data_path, "Forecast failed: {}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
