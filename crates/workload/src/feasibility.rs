//! Hour estimates and the feasibility predicate.
//!
//! Every place that turns word/line totals into hours, or hours into a
//! feasible/not-feasible flag, goes through these functions.

use transload_core::{Rates, Time};

use crate::calendar::{count_working_days, horizon_working_days};
use crate::config::WorkloadConfig;

/// Hours needed for the given totals, rounded to one decimal place.
pub fn estimate_hours(words: u64, lines: u64, rates: Rates) -> f64 {
    let raw = words as f64 / rates.words_per_hour.max(1) as f64
        + lines as f64 / rates.lines_per_hour.max(1) as f64;
    round_tenth(raw)
}

/// Round hours to one decimal place.
pub(crate) fn round_tenth(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

/// Whether `hours` fit into `working_days` of `hours_per_day` each.
pub fn fits(hours: f64, working_days: u32, hours_per_day: u32) -> bool {
    hours <= (working_days as u64 * hours_per_day as u64) as f64
}

/// Whether `hours` can be done by `deadline`. No deadline is always feasible.
pub fn feasible_by(hours: f64, now: Time, deadline: Option<Time>, config: &WorkloadConfig) -> bool {
    let Some(deadline) = deadline else {
        return true;
    };
    let offset = config.offset();
    let days = count_working_days(&now.with_timezone(&offset), &deadline.with_timezone(&offset));
    fits(hours, days, config.hours_per_day)
}

/// Whether `hours` fit into the working days of the short-term horizon.
///
/// Compared against the horizon's fixed capacity whether or not anything is
/// actually due within it.
pub fn feasible_within_horizon(hours: f64, now: Time, config: &WorkloadConfig) -> bool {
    let days = horizon_working_days(&now.with_timezone(&config.offset()), config.horizon_days);
    fits(hours, days, config.hours_per_day)
}
