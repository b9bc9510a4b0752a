//! File-system repository for human-confirmed column mappings.
//!
//! Confirmed mappings are stored as pretty-printed JSON, one file per
//! dataset (`{dataset_id}.json`), and are reloaded on later imports of the
//! same feed to serve as the previous-mapping oracle.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mcm_model::ColumnMapping;

/// Repository rooted at a directory; each stored mapping is one JSON file.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

/// A confirmed mapping plus storage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMapping {
    /// Identifier of the source dataset/feed this mapping was confirmed for.
    pub dataset_id: String,
    /// The confirmed mapping itself.
    pub mapping: ColumnMapping,
    /// When this mapping was saved (ISO 8601).
    pub saved_at: Option<String>,
    /// Optional reviewer notes.
    pub description: Option<String>,
    /// Storage format version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredMapping {
    pub fn new(dataset_id: impl Into<String>, mapping: ColumnMapping) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            mapping,
            saved_at: Some(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            description: None,
            version: default_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Summary of a stored mapping, as returned by [`MappingRepository::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingMetadata {
    pub dataset_id: String,
    pub file_path: PathBuf,
    pub mapped_count: usize,
    pub unmapped_count: usize,
}

impl MappingRepository {
    /// Opens (creating if needed) a repository at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("failed to create mapping repository: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a confirmed mapping, returning the file it was written to.
    pub fn save(&self, dataset_id: &str, mapping: &ColumnMapping) -> Result<PathBuf> {
        self.save_stored(&StoredMapping::new(dataset_id, mapping.clone()))
    }

    pub fn save_stored(&self, stored: &StoredMapping) -> Result<PathBuf> {
        let path = self.mapping_path(&stored.dataset_id);
        let json = serde_json::to_string_pretty(stored)
            .with_context(|| format!("failed to serialize mapping for {}", stored.dataset_id))?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write mapping to {}", path.display()))?;
        debug!(dataset_id = %stored.dataset_id, path = %path.display(), "saved mapping");
        Ok(path)
    }

    /// Loads the confirmed mapping for a dataset, `None` if absent.
    pub fn load(&self, dataset_id: &str) -> Result<Option<ColumnMapping>> {
        Ok(self.load_stored(dataset_id)?.map(|stored| stored.mapping))
    }

    pub fn load_stored(&self, dataset_id: &str) -> Result<Option<StoredMapping>> {
        let path = self.mapping_path(dataset_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read mapping from {}", path.display()))?;
        let stored: StoredMapping = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse mapping from {}", path.display()))?;
        Ok(Some(stored))
    }

    /// Lists every stored mapping, sorted by dataset id.
    pub fn list(&self) -> Result<Vec<MappingMetadata>> {
        let mut metadata = Vec::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("failed to read repository: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(stored) = serde_json::from_str::<StoredMapping>(&contents) {
                metadata.push(MappingMetadata {
                    dataset_id: stored.dataset_id,
                    file_path: path,
                    mapped_count: stored.mapping.mapped_count(),
                    unmapped_count: stored.mapping.unmapped_count(),
                });
            }
        }
        metadata.sort_by(|a, b| a.dataset_id.cmp(&b.dataset_id));
        Ok(metadata)
    }

    /// Deletes a stored mapping; returns whether one existed.
    pub fn delete(&self, dataset_id: &str) -> Result<bool> {
        let path = self.mapping_path(dataset_id);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to delete mapping: {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn exists(&self, dataset_id: &str) -> bool {
        self.mapping_path(dataset_id).exists()
    }

    fn mapping_path(&self, dataset_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_id(dataset_id)))
    }
}

/// Normalizes a dataset id for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
