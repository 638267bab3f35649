//! Human-readable forecast summaries.

use crate::forecaster::Forecast;
use crate::types::analogue::AnalogueMatch;

/// Short label for how an analogue was found.
pub fn tier_annotation(found: &AnalogueMatch) -> String {
    match found {
        AnalogueMatch::Unmatched => "no data".to_string(),
        AnalogueMatch::ExactHour { .. } => "exact hour".to_string(),
        AnalogueMatch::ClosestHour { hour, .. } => format!("closest hour {hour:02}:00"),
        AnalogueMatch::ClosestDay { day, .. } => format!("closest day {day}"),
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

/// Formats the whole forecast: target, prediction, synthesized covariates and one
/// line per analogue year.
pub fn format_forecast(forecast: &Forecast) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Weather analogue forecast for {} ===\n", forecast.target));
    out.push_str(&format!(
        "Predicted temperature: {}\n",
        forecast
            .predicted_temperature()
            .map_or_else(|| "unavailable".to_string(), |t| format!("{t:.1}"))
    ));
    out.push_str(&format!(
        "Description: {}\n",
        forecast.description.as_deref().unwrap_or("unavailable")
    ));
    out.push_str(&format!(
        "Daytime: {} | day of week: {}\n",
        if forecast.features.is_daytime { "yes" } else { "no" },
        forecast.features.day_of_week
    ));

    out.push_str("\nSynthesized covariates:\n");
    if forecast.features.covariates.is_empty() {
        out.push_str("  (none available)\n");
    }
    for (covariate, value) in &forecast.features.covariates {
        out.push_str(&format!("  {:<12} {:>9.2}\n", covariate.name(), value));
    }

    out.push_str("\nHistorical analogues:\n");
    out.push_str(&format!(
        "  {:<6} {:<18} {:>8} {:>9} {:>6}\n",
        "year", "match", "temp", "humidity", "wind"
    ));
    for (year, found) in &forecast.analogues {
        let reading = found.reading();
        out.push_str(&format!(
            "  {:<6} {:<18} {:>8} {:>9} {:>6}\n",
            year,
            tier_annotation(found),
            optional(reading.map(|r| r.temperature), 1),
            optional(reading.and_then(|r| r.humidity), 0),
            optional(reading.and_then(|r| r.wind_speed), 1),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecaster::Forecaster;
    use crate::types::covariate::Covariate;
    use crate::types::dataset::HistoricalDataset;
    use crate::types::target::TargetMoment;
    use crate::types::weather_record::WeatherRecord;
    use chrono::NaiveDate;

    fn record(year: i32, day: u32, hour: u32, temperature: f64) -> WeatherRecord {
        let timestamp = NaiveDate::from_ymd_opt(year, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        WeatherRecord::new(timestamp, temperature)
    }

    #[test]
    fn test_annotation_for_every_year() {
        let dataset = HistoricalDataset::new(vec![
            record(2021, 1, 10, 50.0).with_covariate(Covariate::Humidity, 42.0),
            record(2022, 1, 12, 64.0),
            record(2023, 7, 9, 43.0),
        ]);
        let forecaster = Forecaster::builder().dataset(&dataset).build();
        let target = TargetMoment::new(2025, 5, 1, 10).unwrap();
        let forecast = forecaster.forecast(target, Some(&[2020, 2021, 2022, 2023]));

        let report = format_forecast(&forecast);

        assert!(report.contains("2025-05-01 10:00"));
        assert!(report.contains("Predicted temperature: unavailable"));
        assert!(report.contains("humidity"));
        let lines: Vec<&str> = report
            .lines()
            .filter(|l| l.trim_start().starts_with("20"))
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("no data"));
        assert!(lines[1].contains("exact hour") && lines[1].contains("42"));
        assert!(lines[2].contains("closest hour 12:00") && lines[2].contains("64.0"));
        assert!(lines[3].contains("closest day 7") && lines[3].contains("43.0"));
    }

    #[test]
    fn test_tier_annotation() {
        assert_eq!(tier_annotation(&AnalogueMatch::Unmatched), "no data");
    }
}
