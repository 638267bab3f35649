//! Validated calendar targets for synthesis and analogue search.
//!
//! Both types check their fields on construction, so code that receives one can
//! rely on a real calendar date and an hour in `0..=23`.

use crate::error::AnalogueError;
use crate::types::utils::{days_in_month, is_daytime};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;

/// A (year, month, day, hour) point to predict for. The year may lie outside the
/// historical range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetMoment {
    date: NaiveDate,
    hour: u32,
}

impl TargetMoment {
    /// Creates a target from raw calendar fields.
    ///
    /// # Errors
    ///
    /// Returns [`AnalogueError::InvalidTarget`] if the month is outside `1..=12`, the
    /// hour is outside `0..=23`, or the day does not exist in that month and year.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_analogue::TargetMoment;
    ///
    /// let target = TargetMoment::new(2025, 5, 1, 10).unwrap();
    /// assert_eq!(target.month(), 5);
    /// assert!(TargetMoment::new(2025, 13, 1, 10).is_err());
    /// assert!(TargetMoment::new(2025, 2, 29, 10).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> Result<Self, AnalogueError> {
        let invalid = |reason| AnalogueError::InvalidTarget {
            target: format!("{year:04}-{month:02}-{day:02} {hour:02}:00"),
            reason,
        };
        if !(1..=12).contains(&month) {
            return Err(invalid("month must be between 1 and 12"));
        }
        if hour > 23 {
            return Err(invalid("hour must be between 0 and 23"));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("day does not exist in that month"))?;
        Ok(Self { date, hour })
    }

    pub fn from_date(date: NaiveDate, hour: u32) -> Result<Self, AnalogueError> {
        Self::new(date.year(), date.month(), date.day(), hour)
    }

    /// Uses the date and hour of `datetime`; minutes and seconds are ignored.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            date: datetime.date(),
            hour: datetime.hour(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Day of the week, Monday = 0.
    pub fn day_of_week(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }

    pub fn is_daytime(&self) -> bool {
        is_daytime(self.hour)
    }

    /// The same calendar slot without the year, for analogue search.
    pub fn day_of_year(&self) -> TargetDay {
        TargetDay {
            month: self.month(),
            day: self.day(),
            hour: self.hour,
        }
    }
}

impl fmt::Display for TargetMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.date.format("%Y-%m-%d"), self.hour)
    }
}

/// A (month, day, hour) slot searched for in every year of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetDay {
    month: u32,
    day: u32,
    hour: u32,
}

impl TargetDay {
    /// Creates a slot from raw fields. February 29 is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AnalogueError::InvalidTarget`] for an out-of-range month, hour, or day.
    pub fn new(month: u32, day: u32, hour: u32) -> Result<Self, AnalogueError> {
        let invalid = |reason| AnalogueError::InvalidTarget {
            target: format!("{month:02}-{day:02} {hour:02}:00"),
            reason,
        };
        // 2000 is a leap year, so this is the longest possible length of the month.
        let max_day = days_in_month(2000, month)
            .ok_or_else(|| invalid("month must be between 1 and 12"))?;
        if hour > 23 {
            return Err(invalid("hour must be between 0 and 23"));
        }
        if day == 0 || day > max_day {
            return Err(invalid("day does not exist in that month"));
        }
        Ok(Self { month, day, hour })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

impl fmt::Display for TargetDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02} {:02}:00", self.month, self.day, self.hour)
    }
}
