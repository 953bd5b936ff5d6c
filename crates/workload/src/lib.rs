//! Workload estimation (Layer 2)
//!
//! Per-translator workload, shared-work splitting, working-day calendar and
//! deadline feasibility.

#![warn(missing_docs)]

pub mod calendar;
pub mod config;
pub mod feasibility;
pub mod estimator;
pub mod view;
pub mod preview;
pub mod summary;
pub mod tracker;

pub use calendar::{count_working_days, next_week_working_days, horizon_working_days, is_working_day};
pub use config::{WorkloadConfig, ConfigError};
pub use estimator::{compute_workloads, WorkloadEstimator, Workload, ProjectShare};
pub use view::FilteredWorkload;
pub use preview::AssignmentPreview;
pub use summary::WorkloadSummary;
pub use tracker::{WorkloadTracker, WorkloadSnapshot, StorageWorkloadTracker};
