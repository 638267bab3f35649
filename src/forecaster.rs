use crate::engine::analogue_finder::find_analogues;
use crate::engine::synthesizer::synthesize;
use crate::error::AnalogueError;
use crate::model::description::DescriptionModel;
use crate::model::TemperatureModel;
use crate::types::analogue::AnalogueMatch;
use crate::types::covariate::Covariate;
use crate::types::dataset::HistoricalDataset;
use crate::types::synthetic::SyntheticFeatureRecord;
use crate::types::target::TargetMoment;
use bon::bon;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything known about one target moment: the synthesized features (with the
/// model temperature, if any), a predicted description and the historical analogue
/// of every requested year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub target: TargetMoment,
    pub features: SyntheticFeatureRecord,
    pub description: Option<String>,
    pub analogues: BTreeMap<i32, AnalogueMatch>,
}

impl Forecast {
    pub fn predicted_temperature(&self) -> Option<f64> {
        self.features.temperature
    }

    /// Years that found any historical analogue.
    pub fn matched_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.analogues
            .iter()
            .filter(|(_, found)| found.is_matched())
            .map(|(year, _)| *year)
    }

    /// Pretty-printed JSON of the whole forecast.
    ///
    /// Analogues are keyed by year and tagged with their `tier`.
    pub fn to_json(&self) -> Result<String, AnalogueError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Ties a dataset to the optional models trained on it and answers forecasts for
/// individual moments.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use weather_analogue::{Forecaster, HistoricalDataset, TargetMoment, WeatherRecord};
///
/// let at = |y| NaiveDate::from_ymd_opt(y, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let dataset = HistoricalDataset::new(vec![
///     WeatherRecord::new(at(2022), 64.0),
///     WeatherRecord::new(at(2023), 43.0),
/// ]);
///
/// let forecaster = Forecaster::builder().dataset(&dataset).build();
/// let target = TargetMoment::new(2025, 5, 1, 10)?;
/// let forecast = forecaster.forecast(target, None);
///
/// assert_eq!(forecast.analogues.len(), 2);
/// assert_eq!(forecast.predicted_temperature(), None);
/// # Ok::<(), weather_analogue::AnalogueError>(())
/// ```
pub struct Forecaster<'a> {
    dataset: &'a HistoricalDataset,
    temperature_model: Option<&'a dyn TemperatureModel>,
    description_model: Option<&'a DescriptionModel>,
    covariates: Vec<Covariate>,
}

#[bon]
impl<'a> Forecaster<'a> {
    /// Starts building a forecaster.
    ///
    /// * `.dataset(&HistoricalDataset)`: **Required.** The history to average over and search.
    /// * `.temperature_model(&dyn TemperatureModel)`: Predicts the temperature. Without one
    ///   the forecast carries no temperature.
    /// * `.description_model(&DescriptionModel)`: Predicts the description.
    /// * `.covariates(Vec<Covariate>)`: Covariates to synthesize (default: all of them).
    #[builder]
    pub fn new(
        dataset: &'a HistoricalDataset,
        temperature_model: Option<&'a dyn TemperatureModel>,
        description_model: Option<&'a DescriptionModel>,
        #[builder(default = Covariate::ALL.to_vec())] covariates: Vec<Covariate>,
    ) -> Self {
        Self {
            dataset,
            temperature_model,
            description_model,
            covariates,
        }
    }

    pub fn dataset(&self) -> &HistoricalDataset {
        self.dataset
    }

    /// Forecasts `target`, looking up analogues in `years`, or in every year of the
    /// dataset when `years` is `None`.
    pub fn forecast(&self, target: TargetMoment, years: Option<&[i32]>) -> Forecast {
        info!("Forecasting {} from {} records", target, self.dataset.len());

        let features = synthesize(
            self.dataset,
            target,
            &self.covariates,
            self.temperature_model,
        );
        debug!(
            "Synthesized {} covariates for {}, temperature {:?}",
            features.covariates.len(),
            target,
            features.temperature
        );

        let description = self
            .description_model
            .and_then(|model| model.predict(target.month(), target.hour()))
            .map(str::to_string);

        let dataset_years;
        let years = match years {
            Some(years) => years,
            None => {
                dataset_years = self.dataset.years();
                &dataset_years
            }
        };
        let analogues = find_analogues(self.dataset, target.day_of_year(), years);
        info!(
            "Found analogues for {} of {} years",
            analogues.values().filter(|m| m.is_matched()).count(),
            analogues.len()
        );

        Forecast {
            target,
            features,
            description,
            analogues,
        }
    }

    /// Like [`Forecaster::forecast`], from raw calendar fields.
    ///
    /// # Errors
    ///
    /// Returns [`AnalogueError::InvalidTarget`] if the fields do not name a real date
    /// and hour.
    pub fn forecast_at(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        years: Option<&[i32]>,
    ) -> Result<Forecast, AnalogueError> {
        let target = TargetMoment::new(year, month, day, hour)?;
        Ok(self.forecast(target, years))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::feature::Feature;
    use crate::model::linear::LinearTemperatureModel;
    use crate::types::weather_record::WeatherRecord;
    use chrono::NaiveDate;

    fn record(year: i32, day: u32, hour: u32, temperature: f64, humidity: f64) -> WeatherRecord {
        let timestamp = NaiveDate::from_ymd_opt(year, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        WeatherRecord::new(timestamp, temperature)
            .with_covariate(Covariate::Humidity, humidity)
            .with_description(if humidity > 50.0 { "Cloudy" } else { "Sunny" })
    }

    fn dataset() -> HistoricalDataset {
        HistoricalDataset::new(vec![
            record(2022, 1, 12, 64.0, 40.0),
            record(2022, 1, 10, 60.0, 60.0),
            record(2023, 1, 12, 43.0, 55.0),
            record(2024, 1, 11, 68.0, 30.0),
            record(2024, 3, 10, 66.0, 45.0),
        ])
    }

    #[test]
    fn test_forecast_without_models() {
        let dataset = dataset();
        let forecaster = Forecaster::builder().dataset(&dataset).build();
        let forecast = forecaster.forecast(TargetMoment::new(2025, 5, 1, 10).unwrap(), None);

        assert_eq!(forecast.analogues.keys().copied().collect::<Vec<_>>(), vec![2022, 2023, 2024]);
        assert!(matches!(forecast.analogues[&2022], AnalogueMatch::ExactHour { .. }));
        assert!(matches!(forecast.analogues[&2023], AnalogueMatch::ClosestHour { hour: 12, .. }));
        assert!(matches!(forecast.analogues[&2024], AnalogueMatch::ClosestHour { hour: 11, .. }));
        assert_eq!(forecast.predicted_temperature(), None);
        assert_eq!(forecast.description, None);
        // Hour-10 humidity values: 60 (2022) and 45 (2024).
        assert_eq!(forecast.features.covariate(Covariate::Humidity), Some(52.5));
        assert_eq!(forecast.features.covariate(Covariate::WindSpeed), None);
    }

    #[test]
    fn test_forecast_with_models_and_explicit_years() {
        let dataset = dataset();
        let model = LinearTemperatureModel::fit(
            &dataset,
            &[Feature::Hour, Feature::Covariate(Covariate::Humidity)],
        )
        .unwrap();
        let descriptions = DescriptionModel::fit(&dataset);
        let forecaster = Forecaster::builder()
            .dataset(&dataset)
            .temperature_model(&model)
            .description_model(&descriptions)
            .covariates(vec![Covariate::Humidity])
            .build();

        let target = TargetMoment::new(2026, 5, 1, 10).unwrap();
        let forecast = forecaster.forecast(target, Some(&[2021, 2024]));

        assert!(forecast.predicted_temperature().is_some_and(f64::is_finite));
        assert_eq!(forecast.features.covariates.len(), 1);
        assert_eq!(forecast.analogues[&2021], AnalogueMatch::Unmatched);
        assert_eq!(forecast.matched_years().collect::<Vec<_>>(), vec![2024]);
        // The 05-01 10:00 slot holds one "Cloudy" (2022) and one "Sunny" (2024 on 05-03).
        assert_eq!(forecast.description.as_deref(), Some("Cloudy"));
    }

    #[test]
    fn test_forecast_at_rejects_invalid_fields() {
        let dataset = dataset();
        let forecaster = Forecaster::builder().dataset(&dataset).build();
        assert!(matches!(
            forecaster.forecast_at(2025, 2, 30, 10, None),
            Err(AnalogueError::InvalidTarget { .. })
        ));
        assert!(forecaster.forecast_at(2025, 5, 1, 24, None).is_err());
        assert!(forecaster.forecast_at(2025, 5, 1, 23, None).is_ok());
    }

    #[test]
    fn test_to_json() {
        let dataset = dataset();
        let forecaster = Forecaster::builder().dataset(&dataset).build();
        let target = TargetMoment::new(2025, 5, 1, 10).unwrap();
        let forecast = forecaster.forecast(target, Some(&[2019, 2023]));
        let json: serde_json::Value = serde_json::from_str(&forecast.to_json().unwrap()).unwrap();

        assert_eq!(json["analogues"]["2019"]["tier"], "unmatched");
        assert_eq!(json["analogues"]["2023"]["tier"], "closest_hour");
        assert_eq!(json["analogues"]["2023"]["hour"], 12);
        assert_eq!(json["analogues"]["2023"]["reading"]["temperature"], 43.0);
        assert_eq!(json["features"]["covariates"]["humidity"], 52.5);
        assert!(json["features"]["temperature"].is_null());
    }
}
