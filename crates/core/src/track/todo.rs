use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{next_id, not_found};
use crate::error::{require_input, Result, ToolError};
use crate::storage::{KeyValueStore, PersistedList};

pub const KEY: &str = "todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl FromStr for TodoFilter {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TodoFilter::All),
            "active" => Ok(TodoFilter::Active),
            "completed" | "done" => Ok(TodoFilter::Completed),
            other => Err(ToolError::invalid(format!("Unknown filter '{other}'"))),
        }
    }
}

impl TodoFilter {
    fn accepts(self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.done,
            TodoFilter::Completed => todo.done,
        }
    }
}

pub struct TodoList<S> {
    list: PersistedList<S, Todo>,
}

impl<S: KeyValueStore> TodoList<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            list: PersistedList::open(store, KEY)?,
        })
    }

    pub fn add(&mut self, text: &str, now: DateTime<Utc>) -> Result<Todo> {
        let text = require_input(text)?.trim().to_string();
        let todo = Todo {
            id: next_id(self.list.items(), |t| t.id),
            text,
            done: false,
            created_at: now,
        };
        self.list.push(todo.clone())?;
        Ok(todo)
    }

    /// Flips the done flag and returns its new value.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let mut done = false;
        let found = self.list.update(
            |t| t.id == id,
            |t| {
                t.done = !t.done;
                done = t.done;
            },
        )?;
        if !found {
            return Err(not_found("todo", id));
        }
        Ok(done)
    }

    pub fn edit(&mut self, id: u64, text: &str) -> Result<()> {
        let text = require_input(text)?.trim().to_string();
        if !self.list.update(|t| t.id == id, |t| t.text = text)? {
            return Err(not_found("todo", id));
        }
        Ok(())
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        match self.list.remove(|t| t.id == id)? {
            0 => Err(not_found("todo", id)),
            _ => Ok(()),
        }
    }

    /// Removes every finished item and returns how many went.
    pub fn clear_completed(&mut self) -> Result<usize> {
        self.list.remove(|t| t.done)
    }

    pub fn list(&self, filter: TodoFilter) -> Vec<&Todo> {
        self.list.items().iter().filter(|t| filter.accepts(t)).collect()
    }

    pub fn remaining(&self) -> usize {
        self.list.items().iter().filter(|t| !t.done).count()
    }

    pub fn into_store(self) -> S {
        self.list.into_store()
    }
}
