//! Project persistence.
//!
//! Saved projects live as one serialized list under a single namespace key
//! (a JSON file path). Every mutation is a read-modify-write of the whole
//! list; there are no partial-record updates. Records are immutable once
//! written except by full replacement under the same id.

use crate::{FractalError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// A saved prompt/code pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Unique id within the persisted collection.
    pub id: String,

    /// User-facing title.
    pub title: String,

    /// The description the component was generated from.
    pub description: String,

    /// Sanitized component source.
    pub source_text: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Create a record with a fresh id and timestamp.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            source_text: source_text.into(),
            created_at: Utc::now(),
        }
    }

    /// Reuse an existing id, for full replacement of a saved record.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(FractalError::InvalidInput(
                "Project id must not be empty".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(FractalError::InvalidInput(
                "Project title must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// File-backed key/value store for the project list.
pub struct ProjectStore {
    path: PathBuf,

    // Serializes read-modify-write cycles.
    write_lock: tokio::sync::Mutex<()>,
}

impl ProjectStore {
    /// Create a store over the given namespace file. The file is created
    /// lazily on the first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// All saved records, newest first. A missing file reads as empty.
    pub async fn list(&self) -> Result<Vec<ProjectRecord>> {
        let mut records = self.read_all().await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Look up a record by id.
    pub async fn get(&self, id: &str) -> Result<Option<ProjectRecord>> {
        let records = self.read_all().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    /// Save a record, replacing any existing record with the same id.
    ///
    /// Idempotent by id: saving twice leaves exactly one record, with the
    /// second write's fields winning.
    pub async fn save(&self, record: ProjectRecord) -> Result<ProjectRecord> {
        record.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;

        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            *existing = record.clone();
        } else {
            records.push(record.clone());
        }

        self.write_all(&records).await?;
        debug!(id = %record.id, "saved project");
        Ok(record)
    }

    /// Delete a record by id. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;

        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() < before;

        if removed {
            self.write_all(&records).await?;
            debug!(id = %id, "deleted project");
        }
        Ok(removed)
    }

    async fn read_all(&self) -> Result<Vec<ProjectRecord>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| FractalError::Store(format!("Corrupt project store: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, records: &[ProjectRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let contents = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}
