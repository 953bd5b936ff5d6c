//! What-if estimates for adding a translator to a project.

use serde::{Deserialize, Serialize};
use transload_core::{Assignment, Project, ProjectId, Time, Translator, TranslatorId};

use crate::estimator::{Workload, WorkloadEstimator};

/// Workloads as they would be after an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPreview {
    /// The candidate's workload including the project
    pub candidate: Workload,
    /// Workloads of the translators already on the project, with their
    /// shares reduced by the extra assignee
    pub co_assignees: Vec<Workload>,
    /// The candidate already held an assignment, so nothing changed
    pub already_assigned: bool,
}

impl WorkloadEstimator {
    /// Estimate workloads as if `translator_id` were assigned to `project_id`.
    ///
    /// Returns `None` when either is unknown. The inputs are not modified.
    pub fn preview_assignment(
        &self,
        translators: &[Translator],
        projects: &[Project],
        project_id: ProjectId,
        translator_id: TranslatorId,
        now: Time,
    ) -> Option<AssignmentPreview> {
        let candidate = translators.iter().find(|t| t.id == translator_id)?;
        let index = projects.iter().position(|p| p.id == project_id)?;

        let mut projects = projects.to_vec();
        let project = &mut projects[index];
        let already_assigned = project.is_assigned(translator_id);
        if !already_assigned {
            project.assignments.push(Assignment::new(candidate.to_ref()));
        }
        let co_ids: Vec<TranslatorId> = project
            .live_assignments()
            .map(|a| a.translator.id)
            .filter(|id| *id != translator_id)
            .collect();

        let mut workloads = self.compute(translators, &projects, now);
        let candidate = workloads.remove(&translator_id)?;
        let co_assignees = co_ids.iter().filter_map(|id| workloads.remove(id)).collect();

        Some(AssignmentPreview {
            candidate,
            co_assignees,
            already_assigned,
        })
    }
}
