//! Workload tracking service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use transload_core::{ProjectId, Time, TranslatorId};
use transload_storage::{Result, Storage};

use crate::estimator::{Workload, WorkloadEstimator};
use crate::preview::AssignmentPreview;
use crate::summary::WorkloadSummary;

/// Workload tracking service.
#[async_trait]
pub trait WorkloadTracker: Send + Sync {
    /// Compute every translator's workload from the current store contents.
    async fn snapshot(&self, now: Time) -> Result<WorkloadSnapshot>;

    /// Get one translator's workload.
    async fn workload_for(&self, id: TranslatorId, now: Time) -> Result<Option<Workload>>;

    /// Estimate the effect of assigning a translator to a project.
    async fn preview_assignment(
        &self,
        project_id: ProjectId,
        translator_id: TranslatorId,
        now: Time,
    ) -> Result<Option<AssignmentPreview>>;
}

/// Workloads for the whole roster at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSnapshot {
    /// The `now` the workloads were computed against
    pub timestamp: Time,

    /// Workload by translator ID
    pub workloads: HashMap<TranslatorId, Workload>,

    /// Roster-wide statistics
    pub summary: WorkloadSummary,
}

impl WorkloadSnapshot {
    /// Workloads ordered by translator name.
    pub fn sorted(&self) -> Vec<&Workload> {
        let mut workloads: Vec<&Workload> = self.workloads.values().collect();
        workloads.sort_by(|a, b| {
            a.translator_name
                .cmp(&b.translator_name)
                .then(a.translator_id.cmp(&b.translator_id))
        });
        workloads
    }
}

/// Tracker that reads the roster and active projects from a [`Storage`].
pub struct StorageWorkloadTracker<S: Storage> {
    storage: Arc<S>,
    estimator: WorkloadEstimator,
}

impl<S: Storage> StorageWorkloadTracker<S> {
    /// Create a new workload tracker.
    pub fn new(storage: S) -> Self {
        Self::from_arc(Arc::new(storage))
    }

    /// Create a tracker over shared storage.
    pub fn from_arc(storage: Arc<S>) -> Self {
        Self {
            storage,
            estimator: WorkloadEstimator::default(),
        }
    }

    /// Set the estimator.
    pub fn with_estimator(mut self, estimator: WorkloadEstimator) -> Self {
        self.estimator = estimator;
        self
    }
}

#[async_trait]
impl<S: Storage + 'static> WorkloadTracker for StorageWorkloadTracker<S> {
    async fn snapshot(&self, now: Time) -> Result<WorkloadSnapshot> {
        let translators = self.storage.list_translators().await?;
        let projects = self.storage.list_active_projects().await?;

        let workloads = self.estimator.compute(&translators, &projects, now);
        let summary = WorkloadSummary::from_workloads(workloads.values());
        info!(
            "Workload snapshot: {} translators, {} active projects, {} infeasible",
            summary.translators,
            projects.len(),
            summary.infeasible
        );

        Ok(WorkloadSnapshot {
            timestamp: now,
            workloads,
            summary,
        })
    }

    async fn workload_for(&self, id: TranslatorId, now: Time) -> Result<Option<Workload>> {
        let mut snapshot = self.snapshot(now).await?;
        Ok(snapshot.workloads.remove(&id))
    }

    async fn preview_assignment(
        &self,
        project_id: ProjectId,
        translator_id: TranslatorId,
        now: Time,
    ) -> Result<Option<AssignmentPreview>> {
        let translators = self.storage.list_translators().await?;
        let projects = self.storage.list_active_projects().await?;
        Ok(self
            .estimator
            .preview_assignment(&translators, &projects, project_id, translator_id, now))
    }
}
