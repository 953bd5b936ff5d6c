//! Project model - translation work items and their assignments.

use serde::{Deserialize, Serialize};
use crate::id::{AssignmentId, ProjectId, TranslatorId};
use crate::lenient;
use crate::translator::TranslatorRef;
use crate::Time;

/// A translation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// System tag (source system the job was imported from)
    #[serde(default)]
    pub system: String,

    /// Word count, `None` when not yet measured
    #[serde(default, deserialize_with = "lenient::count")]
    pub words: Option<i64>,

    /// Line count, `None` when not yet measured
    #[serde(default, deserialize_with = "lenient::count")]
    pub lines: Option<i64>,

    /// Initial deadline
    #[serde(default, deserialize_with = "lenient::time")]
    pub initial_deadline: Option<Time>,

    /// Interim deadline
    #[serde(default, deserialize_with = "lenient::time")]
    pub interim_deadline: Option<Time>,

    /// Final deadline
    #[serde(default, deserialize_with = "lenient::time")]
    pub final_deadline: Option<Time>,

    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,

    /// Translator assignments
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Project {
    /// Create an active project with no counts, deadlines or assignments.
    pub fn new(name: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            system: system.into(),
            words: None,
            lines: None,
            initial_deadline: None,
            interim_deadline: None,
            final_deadline: None,
            status: ProjectStatus::Active,
            assignments: Vec::new(),
        }
    }

    /// Whether the project is complete.
    pub fn is_complete(&self) -> bool {
        self.status == ProjectStatus::Complete
    }

    /// Word count with missing and negative values read as zero.
    pub fn word_count(&self) -> u64 {
        non_negative(self.words)
    }

    /// Line count with missing and negative values read as zero.
    pub fn line_count(&self) -> u64 {
        non_negative(self.lines)
    }

    /// Assignments that have not been deleted.
    pub fn live_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(|a| a.deleted_at.is_none())
    }

    /// Whether the translator holds a live assignment on this project.
    pub fn is_assigned(&self, translator: TranslatorId) -> bool {
        self.live_assignments().any(|a| a.translator.id == translator)
    }

    /// Deadline shown on overview screens.
    ///
    /// The nearest of the initial, interim and final deadlines that is not yet
    /// past; when all of them are past, the most recent one. Workload math uses
    /// `final_deadline` only.
    pub fn closest_deadline(&self, now: Time) -> Option<Time> {
        let deadlines = [self.initial_deadline, self.interim_deadline, self.final_deadline];
        let upcoming = deadlines.iter().flatten().filter(|d| **d >= now).min();
        upcoming
            .or_else(|| deadlines.iter().flatten().max())
            .copied()
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// In progress
    #[default]
    Active,
    /// Delivered
    Complete,
    /// Cancelled by the client
    Cancelled,
}

/// A translator's assignment to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,

    /// Assigned translator
    pub translator: TranslatorRef,

    /// Assignment status
    #[serde(default)]
    pub status: AssignmentStatus,

    /// Set when the assignment was removed
    #[serde(default, deserialize_with = "lenient::time")]
    pub deleted_at: Option<Time>,
}

impl Assignment {
    /// Create an unclaimed assignment.
    pub fn new(translator: TranslatorRef) -> Self {
        Self {
            id: AssignmentId::new(),
            translator,
            status: AssignmentStatus::Unclaimed,
            deleted_at: None,
        }
    }
}

/// Assignment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// Offered but not yet accepted
    #[default]
    Unclaimed,
    /// Accepted by the translator
    Claimed,
    /// Translator finished their part
    Done,
    /// Declined by the translator
    Rejected,
}

fn non_negative(value: Option<i64>) -> u64 {
    value.map(|v| v.max(0) as u64).unwrap_or(0)
}
