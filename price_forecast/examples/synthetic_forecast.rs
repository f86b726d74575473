use price_forecast::models::ssa::SsaForecaster;
use price_forecast::utils::synthetic_series;
use price_forecast::{Dataset, ForecastConfig, ForecastModel, TrainedForecastModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Trend plus noise, long enough for the default training size
    let closes = synthetic_series(1440, 42_000.0, 1.5, 30.0, 11)?;
    let data = Dataset::from_closes(&closes);
    println!("Generated {} data points", data.len());

    let model = SsaForecaster::new(ForecastConfig::default())?;
    let trained = model.train(&data)?;
    println!(
        "Fitted {} with rank {} (residual std {:.2})",
        trained.name(),
        trained.rank(),
        trained.residual_std()
    );

    let forecast = trained.forecast(5)?;
    for (i, value) in forecast.values().iter().enumerate() {
        let (lower, upper) = forecast.intervals()[i];
        println!(
            "Step {}: {:.2} [{:.2}, {:.2}]",
            i + 1,
            value,
            lower,
            upper
        );
    }

    println!("{}", forecast.to_json()?);

    Ok(())
}
