//! Builds a synthetic feature record for a moment with no measurements.
//!
//! Covariates that cannot be known in advance (wind, humidity, ...) are estimated
//! as the historical mean for the same month and hour of day, falling back to the
//! mean over the whole history. The temperature is delegated to a trained model.

use crate::model::TemperatureModel;
use crate::types::covariate::Covariate;
use crate::types::dataset::HistoricalDataset;
use crate::types::synthetic::SyntheticFeatureRecord;
use crate::types::target::TargetMoment;
use log::{debug, warn};

/// Synthesizes a feature record for `target`.
///
/// For every covariate in `covariates`, the value is the mean over records sharing
/// the target's month and hour. When that slot holds no values for the covariate,
/// the mean over the whole dataset is used instead. A covariate without any values
/// in the dataset is left out of the result.
///
/// If `model` is given, it is called with the features it declares and the result
/// is stored as the record's temperature. A model that cannot be fed (a declared
/// covariate is unavailable), fails, or returns a non-finite value leaves the
/// temperature empty.
///
/// The dataset is only read; the same inputs always give the same record.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_analogue::{synthesize, Covariate, HistoricalDataset, TargetMoment, WeatherRecord};
///
/// let at = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let dataset = HistoricalDataset::new(vec![
///     WeatherRecord::new(at, 15.0).with_covariate(Covariate::Humidity, 70.0),
/// ]);
///
/// let target = TargetMoment::new(2030, 5, 1, 10).unwrap();
/// let record = synthesize(&dataset, target, &[Covariate::Humidity, Covariate::UvIndex], None);
/// assert_eq!(record.covariate(Covariate::Humidity), Some(70.0));
/// assert_eq!(record.covariate(Covariate::UvIndex), None);
/// assert_eq!(record.temperature, None);
/// ```
pub fn synthesize(
    dataset: &HistoricalDataset,
    target: TargetMoment,
    covariates: &[Covariate],
    model: Option<&dyn TemperatureModel>,
) -> SyntheticFeatureRecord {
    let mut record = SyntheticFeatureRecord::for_target(target);

    for &covariate in covariates {
        match historical_mean(dataset, covariate, target.month(), target.hour()) {
            Some(value) => {
                record.covariates.insert(covariate, value);
            }
            None => debug!("Covariate '{}' has no historical values; leaving it out", covariate),
        }
    }

    record.temperature = model.and_then(|model| predict_temperature(&record, model));
    record
}

/// Mean of `covariate` for the (month, hour) slot, else over all records.
pub(crate) fn historical_mean(
    dataset: &HistoricalDataset,
    covariate: Covariate,
    month: u32,
    hour: u32,
) -> Option<f64> {
    mean(
        dataset
            .iter()
            .filter(|r| r.month() == month && r.hour() == hour)
            .filter_map(|r| r.covariate(covariate)),
    )
    .or_else(|| mean(dataset.iter().filter_map(|r| r.covariate(covariate))))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn predict_temperature(
    record: &SyntheticFeatureRecord,
    model: &dyn TemperatureModel,
) -> Option<f64> {
    let input = match record.feature_vector(model.features()) {
        Ok(input) => input,
        Err(e) => {
            warn!("Temperature model cannot be applied to {}: {}", record.target, e);
            return None;
        }
    };
    match model.predict(&input) {
        Ok(temperature) if temperature.is_finite() => Some(temperature),
        Ok(temperature) => {
            warn!("Temperature model returned {} for {}", temperature, record.target);
            None
        }
        Err(e) => {
            warn!("Temperature prediction failed for {}: {}", record.target, e);
            None
        }
    }
}
