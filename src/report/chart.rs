//! Temperature trend across analogue years, as a DataFrame and optionally a chart.

use crate::forecaster::Forecast;
use polars::prelude::*;

pub const HISTORICAL: &str = "historical";
pub const PREDICTED: &str = "predicted";

/// One row per matched analogue year plus, when the forecast has a temperature, a
/// `predicted` row at the target year.
///
/// Columns: `year` (i32), `temperature` (f64), `source` (str). Rows are ordered by
/// year with the prediction last.
pub fn trend_frame(forecast: &Forecast) -> PolarsResult<DataFrame> {
    let mut years = Vec::with_capacity(forecast.analogues.len() + 1);
    let mut temperatures = Vec::with_capacity(forecast.analogues.len() + 1);
    let mut sources = Vec::with_capacity(forecast.analogues.len() + 1);

    for (year, found) in &forecast.analogues {
        if let Some(temperature) = found.temperature() {
            years.push(*year);
            temperatures.push(temperature);
            sources.push(HISTORICAL);
        }
    }
    if let Some(predicted) = forecast.predicted_temperature() {
        years.push(forecast.target.year());
        temperatures.push(predicted);
        sources.push(PREDICTED);
    }

    df!(
        "year" => years,
        "temperature" => temperatures,
        "source" => sources
    )
}

/// Opens the trend as a scatter chart grouped by `source`.
#[cfg(feature = "plotting")]
pub fn plot_trend(frame: &DataFrame, title: &str) {
    use plotlars::{Plot, Rgb, ScatterPlot, Text};

    ScatterPlot::builder()
        .data(frame)
        .x("year")
        .y("temperature")
        .group("source")
        .size(10)
        .colors(vec![Rgb(69, 157, 230), Rgb(235, 117, 0)])
        .plot_title(Text::from(title).size(18))
        .x_title("year")
        .y_title("temperature")
        .build()
        .plot();
}
