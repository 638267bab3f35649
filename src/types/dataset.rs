use crate::types::weather_record::WeatherRecord;
use std::collections::BTreeSet;

/// An ordered, read-only collection of historical weather records.
///
/// Records are kept in the order they were supplied (file order when loaded from
/// CSV). That order is what breaks ties in the analogue search, so it is preserved
/// as-is and never sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalDataset {
    records: Vec<WeatherRecord>,
}

impl HistoricalDataset {
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present in the data, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(WeatherRecord::year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<WeatherRecord> for HistoricalDataset {
    fn from_iter<I: IntoIterator<Item = WeatherRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HistoricalDataset {
    type Item = &'a WeatherRecord;
    type IntoIter = std::slice::Iter<'a, WeatherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
