use crate::types::covariate::Covariate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Year,
    Month,
    Day,
    Hour,
    /// Monday = 0.
    DayOfWeek,
    /// 1.0 for hours 6 through 18, else 0.0.
    IsDaytime,
    Covariate(Covariate),
}

impl Feature {
    /// Calendar-derived features, always available for any target.
    pub const CALENDAR: [Feature; 6] = [
        Feature::Year,
        Feature::Month,
        Feature::Day,
        Feature::Hour,
        Feature::DayOfWeek,
        Feature::IsDaytime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Year => "year",
            Feature::Month => "month",
            Feature::Day => "day",
            Feature::Hour => "hour",
            Feature::DayOfWeek => "day_of_week",
            Feature::IsDaytime => "is_daytime",
            Feature::Covariate(covariate) => covariate.name(),
        }
    }
}

impl From<Covariate> for Feature {
    fn from(value: Covariate) -> Self {
        Feature::Covariate(value)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Calendar values of a measured or synthetic record, resolved into model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub day_of_week: u32,
    pub is_daytime: bool,
}

impl CalendarFields {
    /// Value of `feature`. Covariates are resolved through `covariate`.
    pub(crate) fn feature(
        self,
        feature: Feature,
        covariate: impl FnOnce(Covariate) -> Option<f64>,
    ) -> Option<f64> {
        match feature {
            Feature::Year => Some(f64::from(self.year)),
            Feature::Month => Some(f64::from(self.month)),
            Feature::Day => Some(f64::from(self.day)),
            Feature::Hour => Some(f64::from(self.hour)),
            Feature::DayOfWeek => Some(f64::from(self.day_of_week)),
            Feature::IsDaytime => Some(if self.is_daytime { 1.0 } else { 0.0 }),
            Feature::Covariate(c) => covariate(c),
        }
    }
}

/// Ordered `(feature, value)` pairs handed to a temperature model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    entries: Vec<(Feature, f64)>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feature: Feature, value: f64) {
        self.entries.push((feature, value));
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.entries
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, v)| *v)
    }

    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Feature, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (Feature, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
