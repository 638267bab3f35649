//! Finds, for every requested year, the historical record that best stands in for
//! a (month, day, hour) slot.
//!
//! The search falls back through three tiers:
//!
//! 1. a record on the target day at the target hour (`ExactHour`);
//! 2. a record on the target day at the nearest hour (`ClosestHour`);
//! 3. with nothing on the target day, the record in the target month on the
//!    nearest day (`ClosestDay`).
//!
//! Distances are plain absolute differences of the hour (0-23) or day-of-month
//! (1-31), with no wraparound: hour 23 is 23 hours away from hour 0. Among equally
//! close candidates the one encountered first in dataset order wins.

use crate::types::analogue::{AnalogueMatch, AnalogueReading};
use crate::types::dataset::HistoricalDataset;
use crate::types::target::TargetDay;
use crate::types::weather_record::WeatherRecord;
use log::debug;
use std::collections::BTreeMap;

/// Returns exactly one [`AnalogueMatch`] per distinct year in `years`.
///
/// A year with no data in the target month yields [`AnalogueMatch::Unmatched`]. The
/// dataset is only read.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_analogue::{
///     find_analogues, AnalogueMatch, HistoricalDataset, TargetDay, WeatherRecord,
/// };
///
/// let at = |y, h| NaiveDate::from_ymd_opt(y, 5, 1).unwrap().and_hms_opt(h, 0, 0).unwrap();
/// let dataset = HistoricalDataset::new(vec![
///     WeatherRecord::new(at(2022, 12), 64.0),
///     WeatherRecord::new(at(2024, 11), 68.0),
/// ]);
///
/// let target = TargetDay::new(5, 1, 10).unwrap();
/// let matches = find_analogues(&dataset, target, &[2022, 2023, 2024]);
/// assert!(matches!(matches[&2022], AnalogueMatch::ClosestHour { hour: 12, .. }));
/// assert_eq!(matches[&2023], AnalogueMatch::Unmatched);
/// assert_eq!(matches[&2024].temperature(), Some(68.0));
/// ```
pub fn find_analogues(
    dataset: &HistoricalDataset,
    target: TargetDay,
    years: &[i32],
) -> BTreeMap<i32, AnalogueMatch> {
    years
        .iter()
        .map(|&year| {
            let found = find_for_year(dataset, target, year);
            debug!("Analogue for {} in {}: {:?}", target, year, found.tier());
            (year, found)
        })
        .collect()
}

fn find_for_year(dataset: &HistoricalDataset, target: TargetDay, year: i32) -> AnalogueMatch {
    let day_matches: Vec<&WeatherRecord> = dataset
        .iter()
        .filter(|r| r.year() == year && r.month() == target.month() && r.day() == target.day())
        .collect();

    if !day_matches.is_empty() {
        if let Some(exact) = day_matches.iter().find(|r| r.hour() == target.hour()) {
            return AnalogueMatch::ExactHour {
                reading: AnalogueReading::from(*exact),
            };
        }
        return match closest_by(day_matches, |r| r.hour().abs_diff(target.hour())) {
            Some(record) => AnalogueMatch::ClosestHour {
                hour: record.hour(),
                reading: AnalogueReading::from(record),
            },
            None => AnalogueMatch::Unmatched,
        };
    }

    let month_matches = dataset
        .iter()
        .filter(|r| r.year() == year && r.month() == target.month());
    match closest_by(month_matches, |r| r.day().abs_diff(target.day())) {
        Some(record) => AnalogueMatch::ClosestDay {
            day: record.day(),
            reading: AnalogueReading::from(record),
        },
        None => AnalogueMatch::Unmatched,
    }
}

/// First record with the smallest distance.
fn closest_by<'a, I, F>(records: I, distance: F) -> Option<&'a WeatherRecord>
where
    I: IntoIterator<Item = &'a WeatherRecord>,
    F: Fn(&WeatherRecord) -> u32,
{
    // `min_by_key` keeps the first of equal minima.
    records.into_iter().min_by_key(|r| distance(r))
}
