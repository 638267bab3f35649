//! Converts a Polars `DataFrame` of weather history into typed [`WeatherRecord`]s.

use crate::types::covariate::Covariate;
use crate::types::dataset::HistoricalDataset;
use crate::types::weather_record::WeatherRecord;
use crate::weather_data::error::DatasetError;
use crate::weather_data::schema::{normalize_column_name, DatasetSchema};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// What happened to the rows of a dataset during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows dropped because the timestamp was missing or unparseable.
    pub missing_timestamp: usize,
    /// Rows dropped because the temperature was missing or not a finite number.
    pub missing_temperature: usize,
}

impl LoadReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

// Month-first is tried before day-first, so `03/04/2023` is March 4th.
const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Parses a timestamp in one of the accepted formats.
///
/// Timestamps carrying a UTC offset keep their local wall-clock time. A bare date
/// is read as midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
        return Some(with_offset.naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(with_offset) = DateTime::parse_from_str(s, fmt) {
            return Some(with_offset.naive_local());
        }
    }
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(datetime);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Extracts records from `df`, dropping rows without a usable timestamp or
/// temperature. Row order is preserved.
///
/// # Errors
///
/// * [`DatasetError::MissingColumn`] if the timestamp or temperature column is absent.
/// * [`DatasetError::ColumnConversion`] if a column cannot be cast to the needed type.
pub fn extract_records(
    df: &DataFrame,
    schema: &DatasetSchema,
) -> Result<(HistoricalDataset, LoadReport), DatasetError> {
    let columns = column_lookup(df);

    let timestamp_column = required_column(df, &columns, &schema.timestamp)?;
    let timestamps = string_values(timestamp_column)?;
    let temperatures = float_values(required_column(df, &columns, &schema.temperature)?)?;

    let mut covariates: Vec<(Covariate, Vec<Option<f64>>)> = Vec::new();
    for covariate in Covariate::ALL {
        if let Some(column) = optional_column(df, &columns, schema.covariate_column(covariate)) {
            covariates.push((covariate, float_values(column)?));
        }
    }
    let descriptions = optional_column(df, &columns, &schema.description)
        .map(string_values)
        .transpose()?;

    let mut report = LoadReport {
        rows_read: df.height(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let Some(timestamp) = timestamps[idx].as_deref().and_then(parse_timestamp) else {
            report.missing_timestamp += 1;
            continue;
        };
        let Some(temperature) = temperatures[idx] else {
            report.missing_temperature += 1;
            continue;
        };

        let mut record = WeatherRecord::new(timestamp, temperature);
        for (covariate, values) in &covariates {
            record.set_covariate(*covariate, values[idx]);
        }
        record.description = descriptions
            .as_ref()
            .and_then(|values| values[idx].clone())
            .filter(|d| !d.trim().is_empty());
        records.push(record);
    }

    report.rows_kept = records.len();
    if report.rows_dropped() > 0 {
        warn!(
            "Dropped {} of {} rows ({} without a timestamp, {} without a temperature)",
            report.rows_dropped(),
            report.rows_read,
            report.missing_timestamp,
            report.missing_temperature
        );
    }
    info!(
        "Extracted {} weather records ({} covariate columns found)",
        report.rows_kept,
        covariates.len()
    );

    Ok((HistoricalDataset::new(records), report))
}

/// Normalized header name -> actual column name.
fn column_lookup(df: &DataFrame) -> HashMap<String, String> {
    df.get_column_names()
        .into_iter()
        .map(|name| (normalize_column_name(name.as_str()), name.to_string()))
        .collect()
}

fn optional_column<'a>(
    df: &'a DataFrame,
    columns: &HashMap<String, String>,
    name: &str,
) -> Option<&'a Column> {
    let actual = columns.get(&normalize_column_name(name))?;
    df.column(actual).ok()
}

fn required_column<'a>(
    df: &'a DataFrame,
    columns: &HashMap<String, String>,
    name: &str,
) -> Result<&'a Column, DatasetError> {
    optional_column(df, columns, name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

/// Values as `f64`; nulls, unparseable text and non-finite numbers become `None`.
fn float_values(column: &Column) -> Result<Vec<Option<f64>>, DatasetError> {
    let conversion = |source| DatasetError::ColumnConversion {
        column: column.name().to_string(),
        source,
    };
    let cast = column.cast(&DataType::Float64).map_err(conversion)?;
    let values = cast.f64().map_err(conversion)?;
    Ok(values
        .into_iter()
        .map(|v| v.filter(|v| v.is_finite()))
        .collect())
}

fn string_values(column: &Column) -> Result<Vec<Option<String>>, DatasetError> {
    let conversion = |source| DatasetError::ColumnConversion {
        column: column.name().to_string(),
        source,
    };
    let cast = column.cast(&DataType::String).map_err(conversion)?;
    let values = cast.str().map_err(conversion)?;
    Ok(values
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        for s in [
            "2023-05-01 12:00:00",
            "2023-05-01 12:00",
            "2023-05-01T12:00:00",
            "2023-05-01T12:00:00+02:00",
            "05/01/2023 12:00",
            " 2023-05-01 12:00:00.000 ",
        ] {
            assert_eq!(parse_timestamp(s), Some(expected), "{s}");
        }
        let midnight = parse_timestamp("2023-05-01").unwrap();
        assert_eq!((midnight.day(), midnight.hour()), (1, 0));
        let day_first = parse_timestamp("25/12/2023 18:00").unwrap();
        assert_eq!((day_first.month(), day_first.day()), (12, 25));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2023-13-01 00:00"), None);
    }

    #[test]
    fn test_extract_drops_unusable_rows() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "Date_Time" => [
                Some("2022-05-01 12:00"),
                Some("2023-05-01 12:00"),
                None,
                Some("garbage"),
                Some("2024-05-01 11:00"),
            ],
            "Temperature" => [Some(64.0), None, Some(1.0), Some(2.0), Some(68.0)],
            "humidity" => [Some(40.0), Some(41.0), None, None, None],
            "description" => [Some("Sunny"), Some("Cloudy"), None, None, Some(" ")]
        )?;

        let (dataset, report) = extract_records(&df, &DatasetSchema::default())?;

        assert_eq!(report.rows_read, 5);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.missing_timestamp, 2);
        assert_eq!(report.missing_temperature, 1);
        assert_eq!(report.rows_dropped(), 3);

        let records = dataset.records();
        assert_eq!(records[0].year(), 2022);
        assert_eq!(records[0].temperature, 64.0);
        assert_eq!(records[0].humidity, Some(40.0));
        assert_eq!(records[0].description.as_deref(), Some("Sunny"));
        assert_eq!(records[1].year(), 2024);
        assert_eq!(records[1].humidity, None);
        assert_eq!(records[1].description, None);
        assert_eq!(records[1].wind_speed, None);
        Ok(())
    }

    #[test]
    fn test_integer_columns_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "date_time" => ["2022-01-01 00:00"],
            "temperature" => [3i64],
            "uv_index" => [1i64]
        )?;
        let (dataset, _) = extract_records(&df, &DatasetSchema::default())?;
        assert_eq!(dataset.records()[0].temperature, 3.0);
        assert_eq!(dataset.records()[0].uv_index, Some(1.0));
        Ok(())
    }

    #[test]
    fn test_missing_required_column() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("date_time" => ["2022-01-01 00:00"], "humidity" => [1.0])?;
        let err = extract_records(&df, &DatasetSchema::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "temperature"));
        Ok(())
    }

    #[test]
    fn test_custom_schema() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "Formatted Date" => ["2006-04-01 00:00:00.000 +0200"],
            "Temperature (C)" => [9.47],
            "Wind Speed (km/h)" => [14.12]
        )?;
        let schema = DatasetSchema::builder()
            .timestamp("Formatted Date")
            .temperature("Temperature (C)")
            .build()
            .with_covariate_column(Covariate::WindSpeed, "Wind Speed (km/h)");
        let (dataset, report) = extract_records(&df, &schema)?;
        assert_eq!(report.rows_kept, 1);
        assert_eq!(dataset.records()[0].wind_speed, Some(14.12));
        assert_eq!(dataset.records()[0].month(), 4);
        Ok(())
    }
}
