//! Column naming for weather history files.

use crate::types::covariate::Covariate;
use bon::Builder;
use std::collections::BTreeMap;

/// Maps dataset columns onto [`crate::WeatherRecord`] fields.
///
/// Column names are matched case-insensitively and ignoring surrounding whitespace.
/// Only the timestamp and temperature columns are required; any covariate or
/// description column missing from a file simply leaves that field empty.
///
/// # Examples
///
/// ```
/// use weather_analogue::{Covariate, DatasetSchema};
///
/// // The defaults: `date_time`, `temperature`, `description`, and each covariate's name.
/// let schema = DatasetSchema::default();
/// assert_eq!(schema.covariate_column(Covariate::WindSpeed), "wind_speed");
///
/// // A file with different headers.
/// let schema = DatasetSchema::builder()
///     .timestamp("Formatted Date")
///     .temperature("Temperature (C)")
///     .description("Summary")
///     .build()
///     .with_covariate_column(Covariate::WindSpeed, "Wind Speed (km/h)");
/// assert_eq!(schema.covariate_column(Covariate::WindSpeed), "Wind Speed (km/h)");
/// assert_eq!(schema.covariate_column(Covariate::Humidity), "humidity");
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DatasetSchema {
    #[builder(into, default = "date_time".to_string())]
    pub timestamp: String,

    #[builder(into, default = "temperature".to_string())]
    pub temperature: String,

    #[builder(into, default = "description".to_string())]
    pub description: String,

    /// Overrides for covariate columns; anything not listed uses [`Covariate::name`].
    #[builder(default)]
    covariate_columns: BTreeMap<Covariate, String>,
}

impl DatasetSchema {
    pub fn with_covariate_column(
        mut self,
        covariate: Covariate,
        column: impl Into<String>,
    ) -> Self {
        self.covariate_columns.insert(covariate, column.into());
        self
    }

    pub fn covariate_column(&self, covariate: Covariate) -> &str {
        self.covariate_columns
            .get(&covariate)
            .map(String::as_str)
            .unwrap_or_else(|| covariate.name())
    }
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Lower-cases and trims a header, dropping a UTF-8 BOM some tools prepend to the
/// first column.
pub(crate) fn normalize_column_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("\u{feff}Date_Time "), "date_time");
        assert_eq!(normalize_column_name("  Temperature"), "temperature");
    }

    #[test]
    fn test_default_schema() {
        let schema = DatasetSchema::default();
        assert_eq!(schema.timestamp, "date_time");
        assert_eq!(schema.temperature, "temperature");
        assert_eq!(schema.description, "description");
        for covariate in Covariate::ALL {
            assert_eq!(schema.covariate_column(covariate), covariate.name());
        }
    }
}
