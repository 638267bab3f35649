//! Result types of the historical analogue search.

use crate::types::weather_record::WeatherRecord;
use chrono::NaiveDateTime;
use serde::Serialize;

/// The readings carried through from a matched historical record, for annotation.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AnalogueReading {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl From<&WeatherRecord> for AnalogueReading {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            temperature: record.temperature,
            humidity: record.humidity,
            wind_speed: record.wind_speed,
        }
    }
}

/// Which tier of the fallback hierarchy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Unmatched,
    ExactHour,
    ClosestHour,
    ClosestDay,
}

/// The best historical stand-in for the target slot within one year.
///
/// `Unmatched` is an ordinary outcome for a year with no data in the target month,
/// not an error.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum AnalogueMatch {
    /// No record in the target month of that year.
    Unmatched,
    /// A record on the target day at the target hour.
    ExactHour { reading: AnalogueReading },
    /// A record on the target day at the nearest available `hour`.
    ClosestHour { hour: u32, reading: AnalogueReading },
    /// No record on the target day; the record on the nearest `day` of the month.
    ClosestDay { day: u32, reading: AnalogueReading },
}

impl AnalogueMatch {
    pub fn tier(&self) -> MatchTier {
        match self {
            AnalogueMatch::Unmatched => MatchTier::Unmatched,
            AnalogueMatch::ExactHour { .. } => MatchTier::ExactHour,
            AnalogueMatch::ClosestHour { .. } => MatchTier::ClosestHour,
            AnalogueMatch::ClosestDay { .. } => MatchTier::ClosestDay,
        }
    }

    pub fn reading(&self) -> Option<&AnalogueReading> {
        match self {
            AnalogueMatch::Unmatched => None,
            AnalogueMatch::ExactHour { reading }
            | AnalogueMatch::ClosestHour { reading, .. }
            | AnalogueMatch::ClosestDay { reading, .. } => Some(reading),
        }
    }

    pub fn temperature(&self) -> Option<f64> {
        self.reading().map(|r| r.temperature)
    }

    pub fn is_matched(&self) -> bool {
        !matches!(self, AnalogueMatch::Unmatched)
    }
}
