//! Working-day calendar.
//!
//! A working day is Monday to Friday. Holidays are not modelled.
//!
//! Counting walks the calendar one day at a time. Horizons are at most a few
//! months, so the scan stays small.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};

/// Whether the date falls on a weekday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count working days from the calendar date of `start` through the calendar
/// date of `end`, both inclusive.
///
/// Dates are taken in the time zone the instants carry. Returns 0 when `end`
/// is before `start`.
pub fn count_working_days<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> u32 {
    if end < start {
        return 0;
    }

    let last = end.date_naive();
    let mut day = start.date_naive();
    let mut count = 0;
    while day <= last {
        if is_working_day(day) {
            count += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}

/// Working days between `now` and `now + days`.
pub fn horizon_working_days<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> u32 {
    let end = now.clone() + Duration::days(days as i64);
    count_working_days(now, &end)
}

/// Working days in the coming calendar week, counted from `now`.
pub fn next_week_working_days<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    horizon_working_days(now, 7)
}
