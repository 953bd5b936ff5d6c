//! Storage trait abstraction.

use async_trait::async_trait;
use transload_core::{Project, ProjectId, Translator, TranslatorId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rates must be positive
    #[error("Invalid rates: {words_per_hour} words/h, {lines_per_hour} lines/h (both must be positive)")]
    InvalidRates {
        /// Requested words per hour
        words_per_hour: u32,
        /// Requested lines per hour
        lines_per_hour: u32,
    },
}

/// Storage abstraction for the agency's roster and projects.
///
/// The workload engine only reads through [`Storage::list_translators`] and
/// [`Storage::list_active_projects`]; everything else is used by the outer
/// tooling that maintains the records.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Translator operations ===

    /// Save a translator (create or update).
    async fn save_translator(&mut self, translator: &Translator) -> Result<()>;

    /// Load a translator by ID.
    async fn load_translator(&self, id: TranslatorId) -> Result<Option<Translator>>;

    /// List the full roster.
    async fn list_translators(&self) -> Result<Vec<Translator>>;

    /// Update a translator's throughput rates and return the updated record.
    async fn set_translator_rates(
        &mut self,
        id: TranslatorId,
        words_per_hour: u32,
        lines_per_hour: u32,
    ) -> Result<Translator> {
        if words_per_hour == 0 || lines_per_hour == 0 {
            return Err(StorageError::InvalidRates { words_per_hour, lines_per_hour });
        }

        let Some(mut translator) = self.load_translator(id).await? else {
            return Err(StorageError::NotFound(format!("translator {}", id)));
        };

        translator.words_per_hour = Some(words_per_hour as i64);
        translator.lines_per_hour = Some(lines_per_hour as i64);
        self.save_translator(&translator).await?;
        Ok(translator)
    }

    // === Project operations ===

    /// Save a project with its assignments (create or update).
    async fn save_project(&mut self, project: &Project) -> Result<()>;

    /// Load a project by ID.
    async fn load_project(&self, id: ProjectId) -> Result<Option<Project>>;

    /// List all projects regardless of status.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// List projects that are not complete, with their assignments embedded.
    async fn list_active_projects(&self) -> Result<Vec<Project>> {
        let projects = self.list_projects().await?;
        Ok(projects.into_iter().filter(|p| !p.is_complete()).collect())
    }
}
