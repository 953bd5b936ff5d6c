//! Transload core data models.
//!
//! This crate defines the roster, project and assignment records that the
//! workload engine reads from the agency's store.

#![warn(missing_docs)]

// Core identities
mod id;

// Roster and work items
mod translator;
mod project;

pub mod lenient;

// Re-exports
pub use id::*;

pub use translator::{
    Translator, TranslatorRef, Rates, DEFAULT_WORDS_PER_HOUR, DEFAULT_LINES_PER_HOUR,
};
pub use project::{Project, ProjectStatus, Assignment, AssignmentStatus};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
