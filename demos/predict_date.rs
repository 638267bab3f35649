//! demos/predict_date.rs
//!
//! Loads a CSV of hourly weather history, trains the temperature and description
//! models and prints a forecast for one date and hour.
//!
//! To run this demo:
//! cargo run --example predict_date -- weather.csv 2025-05-01 10
//!
//! Add `--features plotting` to also open the temperature trend chart.

use std::error::Error;

use chrono::NaiveDate;
use weather_analogue::{
    format_forecast, load_csv, trend_frame, Covariate, DatasetSchema, DescriptionModel, Feature,
    Forecaster, LinearTemperatureModel, TargetMoment, TemperatureModel,
};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(path), Some(date), Some(hour)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: predict_date <history.csv> <YYYY-MM-DD> <hour>");
        std::process::exit(2);
    };

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
    let target = TargetMoment::from_date(date, hour.parse()?)?;

    let (dataset, load_report) = load_csv(&path, &DatasetSchema::default())?;
    println!(
        "Loaded {} records from {} ({} rows dropped)",
        dataset.len(),
        path,
        load_report.rows_dropped()
    );

    let features = [
        Feature::Month,
        Feature::Hour,
        Feature::IsDaytime,
        Feature::Covariate(Covariate::Humidity),
        Feature::Covariate(Covariate::WindSpeed),
    ];
    // A dataset without these covariates still gets analogues, just no temperature.
    let temperature_model = match LinearTemperatureModel::fit(&dataset, &features) {
        Ok(model) => Some(model),
        Err(e) => {
            eprintln!("Temperature model unavailable: {e}");
            None
        }
    };
    let description_model = DescriptionModel::fit(&dataset);

    let forecaster = Forecaster::builder()
        .dataset(&dataset)
        .maybe_temperature_model(temperature_model.as_ref().map(|m| m as &dyn TemperatureModel))
        .description_model(&description_model)
        .build();
    let forecast = forecaster.forecast(target, None);

    println!("{}", format_forecast(&forecast));
    println!("{}", trend_frame(&forecast)?);

    #[cfg(feature = "plotting")]
    weather_analogue::plot_trend(
        &trend_frame(&forecast)?,
        &format!("Temperature around {}", target),
    );

    Ok(())
}
