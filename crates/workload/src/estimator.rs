//! Per-translator workload estimation.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;
use transload_core::{
    Project, ProjectId, Rates, Time, Translator, TranslatorId, TranslatorRef,
};

use crate::config::WorkloadConfig;
use crate::feasibility::{estimate_hours, feasible_by, feasible_within_horizon};

/// A translator's workload, derived from the current project snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Translator this workload belongs to
    pub translator_id: TranslatorId,
    /// Translator display name
    pub translator_name: String,
    /// Effective throughput rates
    pub rates: Rates,

    /// Words across all assigned projects
    pub total_words: u64,
    /// Lines across all assigned projects
    pub total_lines: u64,
    /// Words on projects due within the horizon
    pub next_week_words: u64,
    /// Lines on projects due within the horizon
    pub next_week_lines: u64,

    /// Hours to finish everything
    pub estimated_hours: f64,
    /// Hours to finish what is due within the horizon
    pub next_week_estimated_hours: f64,

    /// Earliest final deadline across assigned projects
    pub earliest_deadline: Option<Time>,
    /// Whether `estimated_hours` fit before `earliest_deadline`
    pub is_feasible: bool,
    /// Whether `next_week_estimated_hours` fit into the horizon
    pub next_week_is_feasible: bool,

    /// This translator's share of each assigned project
    pub projects: Vec<ProjectShare>,
}

impl Workload {
    fn empty(translator: &Translator, fallback: Rates) -> Self {
        Self {
            translator_id: translator.id,
            translator_name: translator.name.clone(),
            rates: translator.rates(fallback),
            total_words: 0,
            total_lines: 0,
            next_week_words: 0,
            next_week_lines: 0,
            estimated_hours: 0.0,
            next_week_estimated_hours: 0.0,
            earliest_deadline: None,
            is_feasible: true,
            next_week_is_feasible: true,
            projects: Vec::new(),
        }
    }

    fn add(&mut self, share: ProjectShare) {
        self.total_words = self.total_words.saturating_add(share.words_share);
        self.total_lines = self.total_lines.saturating_add(share.lines_share);
        if share.due_next_week {
            self.next_week_words = self.next_week_words.saturating_add(share.words_share);
            self.next_week_lines = self.next_week_lines.saturating_add(share.lines_share);
        }
        self.earliest_deadline = earliest(self.earliest_deadline, share.deadline);
        self.projects.push(share);
    }

    fn finish(&mut self, now: Time, config: &WorkloadConfig) {
        self.estimated_hours = estimate_hours(self.total_words, self.total_lines, self.rates);
        self.next_week_estimated_hours =
            estimate_hours(self.next_week_words, self.next_week_lines, self.rates);
        self.is_feasible = feasible_by(self.estimated_hours, now, self.earliest_deadline, config);
        self.next_week_is_feasible =
            feasible_within_horizon(self.next_week_estimated_hours, now, config);
    }

    /// Whether any project is assigned.
    pub fn is_busy(&self) -> bool {
        !self.projects.is_empty()
    }
}

/// One translator's portion of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectShare {
    /// Project ID
    pub project_id: ProjectId,
    /// Project name
    pub name: String,
    /// System tag
    pub system: String,
    /// Words attributed to this translator
    pub words_share: u64,
    /// Lines attributed to this translator
    pub lines_share: u64,
    /// Initial deadline, for display
    pub initial_deadline: Option<Time>,
    /// Interim deadline, for display
    pub interim_deadline: Option<Time>,
    /// Final deadline, for display
    pub final_deadline: Option<Time>,
    /// Deadline used for workload math
    pub deadline: Option<Time>,
    /// Whether the deadline falls within the horizon
    pub due_next_week: bool,
    /// Everyone assigned to the project, this translator included
    pub translators: Vec<TranslatorRef>,
}

/// Workload estimator.
///
/// Stateless apart from its configuration; every call to
/// [`WorkloadEstimator::compute`] builds a fresh map.
#[derive(Debug, Clone, Default)]
pub struct WorkloadEstimator {
    config: WorkloadConfig,
}

impl WorkloadEstimator {
    /// Create an estimator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: WorkloadConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Compute one workload per roster translator.
    ///
    /// `projects` must already exclude complete projects. Work on a project is
    /// split equally between its live assignments, rounding each share up.
    /// The final deadline is the only one that counts.
    pub fn compute(
        &self,
        translators: &[Translator],
        projects: &[Project],
        now: Time,
    ) -> HashMap<TranslatorId, Workload> {
        let fallback = self.config.default_rates();
        let horizon_end = now + Duration::days(self.config.horizon_days as i64);

        let mut workloads: HashMap<TranslatorId, Workload> = translators
            .iter()
            .map(|t| (t.id, Workload::empty(t, fallback)))
            .collect();

        for project in projects {
            let assignees: Vec<TranslatorRef> = project
                .live_assignments()
                .map(|a| a.translator.clone())
                .collect();
            if assignees.is_empty() {
                continue;
            }

            let translator_count = assignees.len() as u64;
            let words_share = project.word_count().div_ceil(translator_count);
            let lines_share = project.line_count().div_ceil(translator_count);

            let deadline = project.final_deadline;
            let due_next_week = deadline.is_some_and(|d| d <= horizon_end);

            for assignee in &assignees {
                let Some(workload) = workloads.get_mut(&assignee.id) else {
                    debug!(
                        "Project {} is assigned to {} who is not on the roster",
                        project.id, assignee.id
                    );
                    continue;
                };

                workload.add(ProjectShare {
                    project_id: project.id,
                    name: project.name.clone(),
                    system: project.system.clone(),
                    words_share,
                    lines_share,
                    initial_deadline: project.initial_deadline,
                    interim_deadline: project.interim_deadline,
                    final_deadline: project.final_deadline,
                    deadline,
                    due_next_week,
                    translators: assignees.clone(),
                });
            }
        }

        for workload in workloads.values_mut() {
            workload.finish(now, &self.config);
        }

        debug!("Computed {} workloads from {} projects", workloads.len(), projects.len());
        workloads
    }
}

/// Compute workloads with the default configuration.
pub fn compute_workloads(
    translators: &[Translator],
    projects: &[Project],
    now: Time,
) -> HashMap<TranslatorId, Workload> {
    WorkloadEstimator::default().compute(translators, projects, now)
}

pub(crate) fn earliest(current: Option<Time>, candidate: Option<Time>) -> Option<Time> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use transload_core::Assignment;

    /// Tuesday 2024-06-04 10:00 UTC
    fn now() -> Time {
        Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap()
    }

    fn project(name: &str, words: Option<i64>, deadline: Option<Time>, team: &[&Translator]) -> Project {
        let mut p = Project::new(name, "SAP");
        p.words = words;
        p.final_deadline = deadline;
        for t in team {
            p.assignments.push(Assignment::new(t.to_ref()));
        }
        p
    }

    #[test]
    fn test_sole_assignee_scenario() {
        let t = Translator::new("Anna");
        // Wednesday: two working days from Tuesday
        let deadline = now() + Duration::days(1);
        let a = project("A", Some(1000), Some(deadline), &[&t]);

        let workloads = compute_workloads(&[t.clone()], &[a], now());
        let w = &workloads[&t.id];

        assert_eq!(w.total_words, 1000);
        assert_eq!(w.estimated_hours, 2.0);
        assert_eq!(w.earliest_deadline, Some(deadline));
        assert!(w.is_feasible);
        assert_eq!(w.next_week_words, 1000);
        assert_eq!(w.next_week_estimated_hours, 2.0);
        assert!(w.next_week_is_feasible);
        assert_eq!(w.projects.len(), 1);
        assert_eq!(w.projects[0].translators, vec![t.to_ref()]);
    }

    #[test]
    fn test_shared_project_rounds_shares_up() {
        let anna = Translator::new("Anna");
        let ben = Translator::new("Ben");
        let b = project("B", Some(999), None, &[&anna, &ben]);

        let workloads = compute_workloads(&[anna.clone(), ben.clone()], &[b], now());
        assert_eq!(workloads[&anna.id].total_words, 500);
        assert_eq!(workloads[&ben.id].total_words, 500);
        assert_eq!(workloads[&anna.id].projects[0].translators.len(), 2);
    }

    #[test]
    fn test_shares_never_underestimate() {
        let team: Vec<Translator> = (0..5).map(|i| Translator::new(format!("T{}", i))).collect();
        for n in 1..=team.len() {
            let members: Vec<&Translator> = team.iter().take(n).collect();
            for (words, lines) in [(0i64, 0i64), (1, 3), (7, 1), (999, 101), (1000, 40), (12_345, 7)] {
                let mut p = project("P", Some(words), None, &members);
                p.lines = Some(lines);
                let workloads = compute_workloads(&team, &[p], now());
                let word_shares: Vec<u64> = members.iter().map(|t| workloads[&t.id].total_words).collect();
                let line_shares: Vec<u64> = members.iter().map(|t| workloads[&t.id].total_lines).collect();

                let expected_words = (words as u64).div_ceil(n as u64);
                let expected_lines = (lines as u64).div_ceil(n as u64);
                assert!(word_shares.iter().all(|s| *s == expected_words));
                assert!(line_shares.iter().all(|s| *s == expected_lines));
                assert!(word_shares.iter().sum::<u64>() >= words as u64);
                assert!(line_shares.iter().sum::<u64>() >= lines as u64);
            }
        }
    }

    #[test]
    fn test_unassigned_translator_is_idle_and_feasible() {
        let anna = Translator::new("Anna");
        let idle = Translator::new("Idle");
        let a = project("A", Some(5000), Some(now() + Duration::days(1)), &[&anna]);

        let workloads = compute_workloads(&[anna, idle.clone()], &[a], now());
        let w = &workloads[&idle.id];
        assert_eq!(w.total_words, 0);
        assert_eq!(w.estimated_hours, 0.0);
        assert_eq!(w.earliest_deadline, None);
        assert!(w.is_feasible);
        assert!(w.next_week_is_feasible);
        assert!(!w.is_busy());
    }

    #[test]
    fn test_project_without_assignments_contributes_nothing() {
        let anna = Translator::new("Anna");
        let c = project("C", Some(4000), Some(now() + Duration::days(2)), &[]);

        let workloads = compute_workloads(&[anna.clone()], &[c], now());
        assert_eq!(workloads[&anna.id].total_words, 0);
        assert!(workloads[&anna.id].projects.is_empty());
    }

    #[test]
    fn test_overdue_project() {
        let anna = Translator::new("Anna");
        let ben = Translator::new("Ben");
        let past = Some(now() - Duration::days(3));
        let d = project("D", Some(1000), past, &[&anna]);
        let empty = project("D2", Some(0), past, &[&ben]);

        let workloads = compute_workloads(&[anna.clone(), ben.clone()], &[d, empty], now());
        assert_eq!(workloads[&anna.id].estimated_hours, 2.0);
        assert!(!workloads[&anna.id].is_feasible);
        assert_eq!(workloads[&ben.id].estimated_hours, 0.0);
        assert!(workloads[&ben.id].is_feasible);
    }

    #[test]
    fn test_only_final_deadline_counts() {
        let anna = Translator::new("Anna");
        let mut p = project("E", Some(1000), None, &[&anna]);
        p.initial_deadline = Some(now() - Duration::days(5));
        p.interim_deadline = Some(now() + Duration::days(1));

        let workloads = compute_workloads(&[anna.clone()], &[p], now());
        let w = &workloads[&anna.id];
        assert_eq!(w.earliest_deadline, None);
        assert!(w.is_feasible);
        assert_eq!(w.next_week_words, 0);
        assert_eq!(w.projects[0].interim_deadline, Some(now() + Duration::days(1)));
    }

    #[test]
    fn test_next_week_split() {
        let anna = Translator::new("Anna");
        let soon = project("Soon", Some(1000), Some(now() + Duration::days(3)), &[&anna]);
        let edge = project("Edge", Some(500), Some(now() + Duration::days(7)), &[&anna]);
        let later = project("Later", Some(4000), Some(now() + Duration::days(20)), &[&anna]);

        let workloads = compute_workloads(&[anna.clone()], &[soon, edge, later], now());
        let w = &workloads[&anna.id];
        assert_eq!(w.total_words, 5500);
        assert_eq!(w.next_week_words, 1500);
        assert_eq!(w.estimated_hours, 11.0);
        assert_eq!(w.next_week_estimated_hours, 3.0);
        assert_eq!(w.earliest_deadline, Some(now() + Duration::days(3)));
        assert!(w.projects.iter().filter(|p| p.due_next_week).count() == 2);
    }

    #[test]
    fn test_next_week_capacity_applies_without_deadlines_in_range() {
        let anna = Translator::new("Anna");
        // 60 hours due tomorrow: two working days, six in the week
        let rush = project("Rush", Some(30_000), Some(now() + Duration::days(1)), &[&anna]);

        let workloads = compute_workloads(&[anna.clone()], &[rush], now());
        let w = &workloads[&anna.id];
        assert_eq!(w.estimated_hours, 60.0);
        assert!(!w.is_feasible);
        assert!(!w.next_week_is_feasible);
    }

    #[test]
    fn test_lines_and_custom_rates() {
        let mut anna = Translator::new("Anna");
        anna.words_per_hour = Some(250);
        anna.lines_per_hour = Some(-3);
        let mut p = project("Subtitles", None, None, &[&anna]);
        p.lines = Some(75);
        p.words = Some(500);

        let workloads = compute_workloads(&[anna.clone()], &[p], now());
        let w = &workloads[&anna.id];
        assert_eq!(w.rates, Rates { words_per_hour: 250, lines_per_hour: 50 });
        assert_eq!(w.total_lines, 75);
        assert_eq!(w.estimated_hours, 3.5);
    }

    #[test]
    fn test_unknown_and_deleted_assignees() {
        let anna = Translator::new("Anna");
        let stranger = Translator::new("Not on roster");
        let gone = Translator::new("Removed");
        let mut p = project("F", Some(900), None, &[&anna, &stranger, &gone]);
        p.assignments[2].deleted_at = Some(now());

        let workloads = compute_workloads(&[anna.clone(), gone.clone()], &[p], now());
        // Split between the two live assignments
        assert_eq!(workloads[&anna.id].total_words, 450);
        assert!(!workloads.contains_key(&stranger.id));
        assert!(workloads[&gone.id].projects.is_empty());
    }

    #[test]
    fn test_missing_counts_are_zero() {
        let anna = Translator::new("Anna");
        let mut p = project("Unmeasured", None, None, &[&anna]);
        p.lines = Some(-10);

        let workloads = compute_workloads(&[anna.clone()], &[p], now());
        assert_eq!(workloads[&anna.id].total_words, 0);
        assert_eq!(workloads[&anna.id].total_lines, 0);
        assert_eq!(workloads[&anna.id].projects.len(), 1);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let anna = Translator::new("Anna");
        // "1e30" decodes to the largest representable count
        let huge: Project = serde_json::from_value(serde_json::json!({
            "id": ProjectId::new(),
            "name": "Huge",
            "words": "1e30",
            "lines": "1e30",
            "final_deadline": now() + Duration::days(2),
        }))
        .unwrap();
        assert_eq!(huge.words, Some(i64::MAX));

        let projects: Vec<Project> = (0..3)
            .map(|_| {
                let mut p = huge.clone();
                p.id = ProjectId::new();
                p.assignments.push(Assignment::new(anna.to_ref()));
                p
            })
            .collect();

        let workloads = compute_workloads(&[anna.clone()], &projects, now());
        let w = &workloads[&anna.id];
        assert_eq!(w.total_words, u64::MAX);
        assert_eq!(w.total_lines, u64::MAX);
        assert_eq!(w.next_week_words, u64::MAX);
        assert!(w.estimated_hours.is_finite());
        assert!(!w.is_feasible);

        let view = w.until(None, now(), &WorkloadConfig::default());
        assert_eq!(view.total_words, u64::MAX);
        assert!(!view.is_feasible);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let anna = Translator::new("Anna");
        let ben = Translator::new("Ben");
        let projects = vec![
            project("A", Some(1234), Some(now() + Duration::days(2)), &[&anna, &ben]),
            project("B", Some(77), None, &[&ben]),
        ];
        let roster = vec![anna, ben];

        let first = compute_workloads(&roster, &projects, now());
        let second = compute_workloads(&roster, &projects, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_hours_per_day() {
        let anna = Translator::new("Anna");
        // 20 hours over Tuesday and Wednesday
        let p = project("A", Some(10_000), Some(now() + Duration::days(1)), &[&anna]);
        let config = WorkloadConfig { hours_per_day: 10, ..Default::default() };

        let workloads = WorkloadEstimator::new()
            .with_config(config)
            .compute(&[anna.clone()], &[p], now());
        assert!(workloads[&anna.id].is_feasible);
    }

    #[test]
    fn test_earliest() {
        let a = now();
        let b = now() + Duration::days(1);
        assert_eq!(earliest(None, None), None);
        assert_eq!(earliest(Some(a), None), Some(a));
        assert_eq!(earliest(None, Some(b)), Some(b));
        assert_eq!(earliest(Some(b), Some(a)), Some(a));
    }
}
