//! Defines the `Covariate` enum, the fixed set of optional numeric weather fields
//! that can be averaged into a synthetic record or fed to a temperature model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An optional numeric weather attribute, distinct from the temperature target.
///
/// Every [`crate::WeatherRecord`] carries each covariate as an `Option<f64>`, so a
/// missing value is part of the schema rather than something to probe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Covariate {
    /// Wind speed, in the unit of the source data.
    WindSpeed,
    /// Relative humidity (percent).
    Humidity,
    /// Air pressure.
    Pressure,
    /// Cloud cover (percent).
    CloudCover,
    /// Apparent ("feels like") temperature.
    FeelsLike,
    /// UV index.
    UvIndex,
    /// Visibility distance.
    Visibility,
}

impl Covariate {
    /// All covariates, in schema order.
    pub const ALL: [Covariate; 7] = [
        Covariate::WindSpeed,
        Covariate::Humidity,
        Covariate::Pressure,
        Covariate::CloudCover,
        Covariate::FeelsLike,
        Covariate::UvIndex,
        Covariate::Visibility,
    ];

    /// Snake-case name, also used as the default CSV column name.
    pub fn name(self) -> &'static str {
        match self {
            Covariate::WindSpeed => "wind_speed",
            Covariate::Humidity => "humidity",
            Covariate::Pressure => "pressure",
            Covariate::CloudCover => "cloud_cover",
            Covariate::FeelsLike => "feels_like",
            Covariate::UvIndex => "uv_index",
            Covariate::Visibility => "visibility",
        }
    }
}

impl fmt::Display for Covariate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
