//! Key-value persistence
//!
//! Bookmarks and the shopping list survive between sessions as JSON strings
//! stored under fixed keys. [`FileStore`] keeps one file per key in a data
//! directory; [`MemoryStore`] keeps everything in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Storage key for the bookmarked recipes
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// Storage key for the shopping list
pub const SHOPPING_KEY: &str = "shoppings";

/// Synchronous string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn clear(&mut self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by `<dir>/<key>.json` files
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path).map(Some).map_err(Error::from)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir)?;

        // Written next to the target, then renamed over it
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;

        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Keys become file names, so only alphanumerics, hyphens and underscores are allowed
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::Storage("Storage key cannot be empty".to_string()));
    }

    if !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::Storage(format!("Invalid storage key: {key}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("data"));

        store.set(BOOKMARKS_KEY, "[]").unwrap();

        assert_eq!(store.get(BOOKMARKS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("data/bookmarks.json").exists());
    }

    #[test]
    fn test_file_store_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get(SHOPPING_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set(SHOPPING_KEY, "[1]").unwrap();
        store.set(SHOPPING_KEY, "[2]").unwrap();

        assert_eq!(store.get(SHOPPING_KEY).unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_file_store_set_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set(BOOKMARKS_KEY, "[]").unwrap();
        store.set(BOOKMARKS_KEY, "[1]").unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["bookmarks.json"]);
    }

    #[test]
    fn test_file_store_clear() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set(BOOKMARKS_KEY, "[]").unwrap();
        store.clear(BOOKMARKS_KEY).unwrap();
        store.clear(BOOKMARKS_KEY).unwrap();

        assert_eq!(store.get(BOOKMARKS_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();

        assert_eq!(store.get(BOOKMARKS_KEY).unwrap(), None);
        store.set(BOOKMARKS_KEY, "[]").unwrap();
        assert_eq!(store.get(BOOKMARKS_KEY).unwrap().as_deref(), Some("[]"));
        store.clear(BOOKMARKS_KEY).unwrap();
        assert_eq!(store.get(BOOKMARKS_KEY).unwrap(), None);
    }
}
