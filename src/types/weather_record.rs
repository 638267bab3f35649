use crate::model::feature::{CalendarFields, Feature};
use crate::types::covariate::Covariate;
use crate::types::utils::is_daytime;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

/// One historical weather observation.
///
/// All calendar fields (`year`, `month`, `day`, `hour`, `day_of_week`) derive from the
/// single `timestamp`, so they can never disagree with each other. Temperature is
/// always present; rows without one are dropped while loading.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct WeatherRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub feels_like: Option<f64>,
    pub uv_index: Option<f64>,
    pub visibility: Option<f64>,
    pub description: Option<String>,
}

impl WeatherRecord {
    /// Creates a record with a timestamp and temperature and no covariates.
    pub fn new(timestamp: NaiveDateTime, temperature: f64) -> Self {
        Self {
            timestamp,
            temperature,
            wind_speed: None,
            humidity: None,
            pressure: None,
            cloud_cover: None,
            feels_like: None,
            uv_index: None,
            visibility: None,
            description: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    pub fn day(&self) -> u32 {
        self.timestamp.day()
    }

    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of the week, Monday = 0.
    pub fn day_of_week(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }

    pub fn is_daytime(&self) -> bool {
        is_daytime(self.hour())
    }

    pub fn covariate(&self, covariate: Covariate) -> Option<f64> {
        match covariate {
            Covariate::WindSpeed => self.wind_speed,
            Covariate::Humidity => self.humidity,
            Covariate::Pressure => self.pressure,
            Covariate::CloudCover => self.cloud_cover,
            Covariate::FeelsLike => self.feels_like,
            Covariate::UvIndex => self.uv_index,
            Covariate::Visibility => self.visibility,
        }
    }

    pub fn set_covariate(&mut self, covariate: Covariate, value: Option<f64>) {
        let slot = match covariate {
            Covariate::WindSpeed => &mut self.wind_speed,
            Covariate::Humidity => &mut self.humidity,
            Covariate::Pressure => &mut self.pressure,
            Covariate::CloudCover => &mut self.cloud_cover,
            Covariate::FeelsLike => &mut self.feels_like,
            Covariate::UvIndex => &mut self.uv_index,
            Covariate::Visibility => &mut self.visibility,
        };
        *slot = value;
    }

    /// Chaining form of [`WeatherRecord::set_covariate`].
    pub fn with_covariate(mut self, covariate: Covariate, value: f64) -> Self {
        self.set_covariate(covariate, Some(value));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Value of a model input feature for this record, `None` if the underlying
    /// covariate is missing.
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        self.calendar().feature(feature, |c| self.covariate(c))
    }

    fn calendar(&self) -> CalendarFields {
        CalendarFields {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            day_of_week: self.day_of_week(),
            is_daytime: self.is_daytime(),
        }
    }
}
