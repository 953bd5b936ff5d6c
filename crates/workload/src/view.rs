//! Target-date views over a computed workload.
//!
//! Screens that let the user pick "count work due before this date" derive
//! their numbers from [`Workload::projects`] instead of recomputing the whole
//! roster.

use serde::{Deserialize, Serialize};
use transload_core::Time;

use crate::config::WorkloadConfig;
use crate::estimator::{earliest, Workload};
use crate::feasibility::{estimate_hours, feasible_by};

/// A workload restricted to project contributions due by a target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredWorkload {
    /// Target date, `None` keeps everything
    pub target: Option<Time>,
    /// Number of project contributions kept
    pub project_count: usize,
    /// Words kept
    pub total_words: u64,
    /// Lines kept
    pub total_lines: u64,
    /// Hours for the kept work
    pub estimated_hours: f64,
    /// Earliest deadline among the kept work
    pub earliest_deadline: Option<Time>,
    /// Whether the kept work fits before its earliest deadline
    pub is_feasible: bool,
}

impl Workload {
    /// Restrict to contributions due on or before `target`.
    ///
    /// Contributions without a deadline are always kept. With no target the
    /// view covers the whole workload.
    pub fn until(&self, target: Option<Time>, now: Time, config: &WorkloadConfig) -> FilteredWorkload {
        let kept = self.projects.iter().filter(|p| match (target, p.deadline) {
            (Some(target), Some(deadline)) => deadline <= target,
            _ => true,
        });

        let mut view = FilteredWorkload {
            target,
            project_count: 0,
            total_words: 0,
            total_lines: 0,
            estimated_hours: 0.0,
            earliest_deadline: None,
            is_feasible: true,
        };
        for share in kept {
            view.project_count += 1;
            view.total_words = view.total_words.saturating_add(share.words_share);
            view.total_lines = view.total_lines.saturating_add(share.lines_share);
            view.earliest_deadline = earliest(view.earliest_deadline, share.deadline);
        }

        view.estimated_hours = estimate_hours(view.total_words, view.total_lines, self.rates);
        view.is_feasible = feasible_by(view.estimated_hours, now, view.earliest_deadline, config);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::compute_workloads;
    use chrono::{Duration, TimeZone, Utc};
    use transload_core::{Assignment, Project, Translator};

    fn now() -> Time {
        Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap()
    }

    fn workload() -> Workload {
        let anna = Translator::new("Anna");
        let specs = [
            ("Soon", 1000, Some(now() + Duration::days(1))),
            ("Later", 2000, Some(now() + Duration::days(16))),
            ("Open", 500, None),
        ];
        let projects: Vec<Project> = specs
            .iter()
            .map(|(name, words, deadline)| {
                let mut p = Project::new(*name, "SAP");
                p.words = Some(*words);
                p.final_deadline = *deadline;
                p.assignments.push(Assignment::new(anna.to_ref()));
                p
            })
            .collect();

        let mut workloads = compute_workloads(&[anna.clone()], &projects, now());
        workloads.remove(&anna.id).unwrap()
    }

    #[test]
    fn test_until_target_date() {
        let w = workload();
        let view = w.until(Some(now() + Duration::days(6)), now(), &WorkloadConfig::default());

        assert_eq!(view.project_count, 2);
        assert_eq!(view.total_words, 1500);
        assert_eq!(view.estimated_hours, 3.0);
        assert_eq!(view.earliest_deadline, Some(now() + Duration::days(1)));
        assert!(view.is_feasible);
    }

    #[test]
    fn test_until_without_target_matches_workload() {
        let w = workload();
        let view = w.until(None, now(), &WorkloadConfig::default());

        assert_eq!(view.project_count, w.projects.len());
        assert_eq!(view.total_words, w.total_words);
        assert_eq!(view.estimated_hours, w.estimated_hours);
        assert_eq!(view.earliest_deadline, w.earliest_deadline);
        assert_eq!(view.is_feasible, w.is_feasible);
    }

    #[test]
    fn test_until_past_target_keeps_only_open_work() {
        let w = workload();
        let view = w.until(Some(now() - Duration::days(1)), now(), &WorkloadConfig::default());

        assert_eq!(view.project_count, 1);
        assert_eq!(view.total_words, 500);
        assert_eq!(view.earliest_deadline, None);
        assert!(view.is_feasible);
    }
}
