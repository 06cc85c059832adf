//! Key-value blob storage the booking store persists into.
//!
//! The contract mirrors browser localStorage: a string value per string key,
//! where each `set` either fully lands or fails.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{DatebookError, DatebookResult};

pub trait KeyValueStore {
    /// Read the value under `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> DatebookResult<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> DatebookResult<()>;
}

/// In-memory store. Lives as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, like a browser with storage
    /// disabled or over quota.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DatebookResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DatebookResult<()> {
        if self.read_only {
            return Err(DatebookError::StorageWrite("storage is read-only".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object file on disk mapping keys to string values.
///
/// Every `set` rewrites the whole file through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> DatebookResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DatebookError::StorageRead(format!("{}: {e}", self.path.display()))
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            DatebookError::StorageRead(format!("{}: {e}", self.path.display()))
        })
    }

    /// Path an unreadable file is moved to before it gets replaced.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".corrupt");
        PathBuf::from(path)
    }

    /// Move an unreadable file out of the way so its content survives the
    /// next write.
    fn set_aside_unreadable(&self, read_error: &DatebookError) -> DatebookResult<()> {
        if !self.path.is_file() {
            tracing::warn!(error = %read_error, "storage path is not a readable file");
            return Ok(());
        }

        let backup = self.corrupt_path();
        std::fs::rename(&self.path, &backup).map_err(|e| self.write_error(e))?;
        tracing::warn!(
            error = %read_error,
            backup = %backup.display(),
            "storage file unreadable, moved aside before writing"
        );
        Ok(())
    }

    fn write_error(&self, e: impl std::fmt::Display) -> DatebookError {
        DatebookError::StorageWrite(format!("{}: {e}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DatebookResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> DatebookResult<()> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(e) => {
                self.set_aside_unreadable(&e)?;
                BTreeMap::new()
            }
        };
        values.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&values).map_err(|e| self.write_error(e))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, content).map_err(|e| self.write_error(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| self.write_error(e))?;

        tracing::debug!(path = %self.path.display(), key, "wrote storage file");
        Ok(())
    }
}
