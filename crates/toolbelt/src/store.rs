//! File-backed key-value store
//!
//! One `<key>.json` file per key inside the data directory. Writes go
//! through a temporary file in the same directory and are renamed into
//! place, so a crash never leaves a half-written list behind.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use toolbelt_core::storage::KeyValueStore;
use toolbelt_core::{Result, ToolError};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(ToolError::invalid(format!("'{key}' is not a valid storage key")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn storage_error(action: &str, path: &Path, e: impl std::fmt::Display) -> ToolError {
    ToolError::external(format!("Failed to {action} {}: {e}", path.display()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| storage_error("create", &self.dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| storage_error("create a temporary file in", &self.dir, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| storage_error("write", tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| storage_error("replace", &path, e.error))?;
        log::debug!("saved {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use toolbelt_core::track::todo::{TodoFilter, TodoList};
    use toolbelt_core::track::{quotes, todo};

    #[test]
    fn test_get_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-created-yet"));
        assert_eq!(store.get("todos").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("habits", "[]").unwrap();
        assert!(dir.path().join("habits.json").exists());
        assert_eq!(store.get("habits").unwrap().as_deref(), Some("[]"));

        store.remove("habits").unwrap();
        store.remove("habits").unwrap();
        assert_eq!(store.get("habits").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_todo_list_survives_a_new_process() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        {
            let mut todos = TodoList::open(FileStore::new(dir.path())).unwrap();
            todos.add("ship it", now).unwrap();
        }
        let todos = TodoList::open(FileStore::new(dir.path())).unwrap();
        assert_eq!(todos.list(TodoFilter::All)[0].text, "ship it");
    }

    #[test]
    fn test_clearing_one_tool_leaves_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let mut book = quotes::QuoteBook::open(FileStore::new(dir.path())).unwrap();
        book.add("Less is more.", "Mies").unwrap();

        let mut todos = TodoList::open(FileStore::new(dir.path())).unwrap();
        let item = todos.add("one", now).unwrap();
        todos.toggle(item.id).unwrap();
        todos.clear_completed().unwrap();

        let mut store = todos.into_store();
        store.remove(todo::KEY).unwrap();
        assert!(!dir.path().join("todos.json").exists());
        assert!(dir.path().join("favorite-quotes.json").exists());
    }
}
