use chrono::{Datelike, Duration, NaiveDate};
use std::ops::RangeInclusive;

/// Hours of the day (inclusive) that count as daytime.
pub const DAYTIME_HOURS: RangeInclusive<u32> = 6..=18;

pub fn is_daytime(hour: u32) -> bool {
    DAYTIME_HOURS.contains(&hour)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}
