//! JSON file storage implementation.
//!
//! Stores each record as a JSON file under the storage root and keeps small
//! per-object meta markers (version + updated_at).

use std::path::Path;
use transload_core::{Project, ProjectId, Translator, TranslatorId};
use super::{Storage, Result};
use tokio::fs;
use tracing::warn;

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: std::path::PathBuf,
}

impl JsonStorage {
    /// Create storage, creating the data and meta directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("translators")).await?;
        fs::create_dir_all(root.join("projects")).await?;

        fs::create_dir_all(root.join("meta").join("translators")).await?;
        fs::create_dir_all(root.join("meta").join("projects")).await?;

        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn translator_path(&self, id: TranslatorId) -> std::path::PathBuf {
        self.root.join("translators").join(format!("{}.json", id))
    }
    fn project_path(&self, id: ProjectId) -> std::path::PathBuf {
        self.root.join("projects").join(format!("{}.json", id))
    }

    fn meta_path(&self, kind: &str, id: &str) -> std::path::PathBuf {
        self.root.join("meta").join(kind).join(format!("{}.meta.json", id))
    }

    /// Read and increment per-object version, return new version.
    async fn bump_version(&self, kind: &str, id: &str) -> Result<u64> {
        let path = self.meta_path(kind, id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }

    /// Current version of a record, 0 if it was never saved.
    pub async fn version(&self, kind: &str, id: &str) -> Result<u64> {
        let meta: Option<serde_json::Value> = read_json(&self.meta_path(kind, id)).await?;
        Ok(meta
            .and_then(|m| m.get("version").and_then(|v| v.as_u64()))
            .unwrap_or(0))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_translator(&mut self, translator: &Translator) -> Result<()> {
        let path = self.translator_path(translator.id);
        let json = serde_json::to_string_pretty(translator)?;
        fs::write(&path, json.as_bytes()).await?;

        let id_str = format!("{}", translator.id);
        self.bump_version("translators", &id_str).await?;
        Ok(())
    }

    async fn load_translator(&self, id: TranslatorId) -> Result<Option<Translator>> {
        read_json(&self.translator_path(id)).await
    }

    async fn list_translators(&self) -> Result<Vec<Translator>> {
        let mut translators: Vec<Translator> = list_dir(&self.root.join("translators")).await?;
        translators.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(translators)
    }

    async fn save_project(&mut self, project: &Project) -> Result<()> {
        let path = self.project_path(project.id);
        let json = serde_json::to_string_pretty(project)?;
        fs::write(&path, json.as_bytes()).await?;

        let id_str = format!("{}", project.id);
        self.bump_version("projects", &id_str).await?;
        Ok(())
    }

    async fn load_project(&self, id: ProjectId) -> Result<Option<Project>> {
        read_json(&self.project_path(id)).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = list_dir(&self.root.join("projects")).await?;
        projects.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(projects)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &std::path::Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable record {}: {}", path.display(), e),
        }
    }
    Ok(items)
}
