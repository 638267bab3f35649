use crate::model::error::ModelError;
use crate::model::feature::{CalendarFields, Feature, FeatureVector};
use crate::types::covariate::Covariate;
use crate::types::target::TargetMoment;
use serde::Serialize;
use std::collections::BTreeMap;

/// A fabricated feature record for a moment that has no measurements of its own.
///
/// Calendar fields come straight from the target. Covariates hold historical
/// averages; a covariate with no history anywhere is simply absent from the map,
/// which callers must read as "unavailable" and never as zero. `temperature` is
/// filled by a temperature model when one is available.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SyntheticFeatureRecord {
    pub target: TargetMoment,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub day_of_week: u32,
    pub is_daytime: bool,
    pub covariates: BTreeMap<Covariate, f64>,
    pub temperature: Option<f64>,
}

impl SyntheticFeatureRecord {
    /// A record carrying only the calendar fields of `target`.
    pub fn for_target(target: TargetMoment) -> Self {
        Self {
            target,
            year: target.year(),
            month: target.month(),
            day: target.day(),
            hour: target.hour(),
            day_of_week: target.day_of_week(),
            is_daytime: target.is_daytime(),
            covariates: BTreeMap::new(),
            temperature: None,
        }
    }

    pub fn covariate(&self, covariate: Covariate) -> Option<f64> {
        self.covariates.get(&covariate).copied()
    }

    pub fn feature(&self, feature: Feature) -> Option<f64> {
        let calendar = CalendarFields {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            day_of_week: self.day_of_week,
            is_daytime: self.is_daytime,
        };
        calendar.feature(feature, |c| self.covariate(c))
    }

    /// Builds the input vector for a model that declares `features`, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingFeature`] for the first declared feature this
    /// record cannot supply.
    pub fn feature_vector(&self, features: &[Feature]) -> Result<FeatureVector, ModelError> {
        features
            .iter()
            .map(|&feature| {
                self.feature(feature)
                    .map(|value| (feature, value))
                    .ok_or(ModelError::MissingFeature(feature))
            })
            .collect()
    }
}
