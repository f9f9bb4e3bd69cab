//! Key-value persistence port
//!
//! Stateful tools never touch the filesystem directly. They are handed a
//! [`KeyValueStore`] and read or write whole lists under a key they own. The shell
//! provides a file-backed store; [`MemoryStore`] covers tests.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, ToolError};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
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

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A list of `T` mirrored to a single key.
///
/// The whole list is read on [`PersistedList::open`] and written back after every
/// mutation. Changes are made on a copy and only kept once the store accepts
/// them, so a failed write leaves [`PersistedList::items`] as it was. There is
/// no versioning: the last writer wins.
#[derive(Debug)]
pub struct PersistedList<S, T> {
    store: S,
    key: &'static str,
    items: Vec<T>,
}

impl<S, T> PersistedList<S, T>
where
    S: KeyValueStore,
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn open(store: S, key: &'static str) -> Result<Self> {
        let items = match store.get(key)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map_err(|e| ToolError::parse(format!("Stored data for '{key}' is corrupt: {e}")))?,
            _ => Vec::new(),
        };

        Ok(Self {
            store,
            key,
            items,
        })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        let mut next = self.items.clone();
        next.push(item);
        self.commit(next)
    }

    /// Applies `f` to a copy of the list and persists the result.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R> {
        let mut next = self.items.clone();
        let out = f(&mut next);
        self.commit(next)?;
        Ok(out)
    }

    /// Applies `f` to the first item matching `pred`. Returns `false` when
    /// nothing matched, in which case nothing is written.
    pub fn update(
        &mut self,
        pred: impl Fn(&T) -> bool,
        f: impl FnOnce(&mut T),
    ) -> Result<bool> {
        let Some(index) = self.items.iter().position(|item| pred(item)) else {
            return Ok(false);
        };
        let mut next = self.items.clone();
        f(&mut next[index]);
        self.commit(next)?;
        Ok(true)
    }

    /// Removes every item matching `pred` and returns how many went.
    pub fn remove(&mut self, pred: impl Fn(&T) -> bool) -> Result<usize> {
        let next: Vec<T> = self.items.iter().filter(|item| !pred(item)).cloned().collect();
        let removed = self.items.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    /// Drops the list's key from the store, then empties the list.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(self.key)?;
        self.items.clear();
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn commit(&mut self, next: Vec<T>) -> Result<()> {
        let raw = serde_json::to_string(&next)
            .map_err(|e| ToolError::external(format!("Failed to serialize '{}': {e}", self.key)))?;
        self.store.set(self.key, &raw)?;
        self.items = next;
        Ok(())
    }
}
