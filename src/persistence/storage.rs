use super::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Key-value document storage.
///
/// Values are whole JSON documents. Writes are synchronous: when `write`
/// returns `Ok` the value is durable.
pub trait Storage {
    /// Read the document stored under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        let content = read_file(&path).with_context(|| format!("failed to read key {key}"))?;
        trace!(found = content.is_some(), "read document");
        Ok(content)
    }

    #[tracing::instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        atomic_write(&path, value).with_context(|| format!("failed to write key {key}"))?;
        debug!(path = %path.display(), "wrote document");
        Ok(())
    }
}

/// In-memory storage, used for tests and `--ephemeral` sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert_eq!(storage.read("todo-tasks").unwrap(), None);
        storage.write("todo-tasks", "[]").unwrap();
        assert_eq!(storage.read("todo-tasks").unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("todo-tasks.json").exists());
    }

    #[test]
    fn test_file_storage_write_error_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("gone"));

        let err = storage.write("dark-mode", "true").unwrap_err();
        assert!(format!("{err:#}").contains("dark-mode"));
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        storage.write("k", "1").unwrap();
        storage.write("k", "2").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.read("other").unwrap(), None);
    }
}
