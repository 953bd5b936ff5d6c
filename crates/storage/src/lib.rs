//! Storage abstraction and implementations for Transload.
//!
//! This crate provides the read/update interface the workload engine is fed
//! from, with a JSON file reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
