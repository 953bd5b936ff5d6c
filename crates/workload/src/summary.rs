//! Roster-wide workload statistics.

use serde::{Deserialize, Serialize};

use crate::estimator::Workload;
use crate::feasibility::round_tenth;

/// Workload statistics across the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    /// Translators on the roster
    pub translators: usize,
    /// Translators with at least one project
    pub busy: usize,
    /// Translators who cannot make their earliest deadline
    pub infeasible: usize,
    /// Translators whose next-week work exceeds the week's capacity
    pub next_week_infeasible: usize,
    /// Sum of estimated hours
    pub total_estimated_hours: f64,
    /// Sum of next-week estimated hours
    pub next_week_estimated_hours: f64,
}

impl WorkloadSummary {
    /// Summarize a set of workloads.
    pub fn from_workloads<'a>(workloads: impl IntoIterator<Item = &'a Workload>) -> Self {
        let mut summary = workloads.into_iter().fold(Self::default(), |mut acc, w| {
            acc.translators += 1;
            if w.is_busy() {
                acc.busy += 1;
            }
            if !w.is_feasible {
                acc.infeasible += 1;
            }
            if !w.next_week_is_feasible {
                acc.next_week_infeasible += 1;
            }
            acc.total_estimated_hours += w.estimated_hours;
            acc.next_week_estimated_hours += w.next_week_estimated_hours;
            acc
        });
        summary.total_estimated_hours = round_tenth(summary.total_estimated_hours);
        summary.next_week_estimated_hours = round_tenth(summary.next_week_estimated_hours);
        summary
    }
}
