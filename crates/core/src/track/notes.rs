use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{next_id, not_found};
use crate::error::{require_input, Result, ToolError};
use crate::storage::{KeyValueStore, PersistedList};

pub const KEY: &str = "sticky-notes";

/// Note colors offered by the board.
pub const COLORS: [&str; 5] = ["yellow", "pink", "blue", "green", "purple"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub text: String,
    pub color: String,
    pub updated_at: DateTime<Utc>,
}

fn check_color(color: &str) -> Result<String> {
    let color = color.trim().to_ascii_lowercase();
    if COLORS.contains(&color.as_str()) {
        Ok(color)
    } else {
        Err(ToolError::invalid(format!(
            "Unknown note color '{color}', expected one of {}",
            COLORS.join(", ")
        )))
    }
}

pub struct NoteBoard<S> {
    list: PersistedList<S, Note>,
}

impl<S: KeyValueStore> NoteBoard<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            list: PersistedList::open(store, KEY)?,
        })
    }

    pub fn add(&mut self, text: &str, color: Option<&str>, now: DateTime<Utc>) -> Result<Note> {
        let text = require_input(text)?.trim().to_string();
        let color = check_color(color.unwrap_or(COLORS[0]))?;
        let note = Note {
            id: next_id(self.list.items(), |n| n.id),
            text,
            color,
            updated_at: now,
        };
        self.list.push(note.clone())?;
        Ok(note)
    }

    /// Replaces the text and, when given, the color. Bumps the timestamp.
    pub fn edit(
        &mut self,
        id: u64,
        text: &str,
        color: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let text = require_input(text)?.trim().to_string();
        let color = color.map(check_color).transpose()?;
        let found = self.list.update(
            |n| n.id == id,
            |n| {
                n.text = text;
                if let Some(color) = color {
                    n.color = color;
                }
                n.updated_at = now;
            },
        )?;
        if !found {
            return Err(not_found("note", id));
        }
        Ok(())
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        match self.list.remove(|n| n.id == id)? {
            0 => Err(not_found("note", id)),
            _ => Ok(()),
        }
    }

    /// Most recently touched first.
    pub fn list(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.list.items().iter().collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        notes
    }

    pub fn into_store(self) -> S {
        self.list.into_store()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::storage::MemoryStore;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap()
    }

    #[test]
    fn test_add_defaults_to_yellow() {
        let mut board = NoteBoard::open(MemoryStore::new()).unwrap();
        let note = board.add("call mom", None, at(0)).unwrap();
        assert_eq!(note.color, "yellow");
        assert_eq!(note.id, 1);
    }

    #[test]
    fn test_edit_moves_note_to_top() {
        let mut board = NoteBoard::open(MemoryStore::new()).unwrap();
        let first = board.add("first", Some("Blue"), at(0)).unwrap();
        board.add("second", Some("pink"), at(1)).unwrap();
        assert_eq!(board.list()[0].text, "second");

        board.edit(first.id, "first, edited", None, at(0) + Duration::minutes(5)).unwrap();
        let notes = board.list();
        assert_eq!(notes[0].text, "first, edited");
        assert_eq!(notes[0].color, "blue");
    }

    #[test]
    fn test_persisted_between_opens() {
        let mut board = NoteBoard::open(MemoryStore::new()).unwrap();
        board.add("keep", Some("green"), at(2)).unwrap();
        let store = board.into_store();
        assert!(store.get(KEY).unwrap().unwrap().contains("\"green\""));

        let mut board = NoteBoard::open(store).unwrap();
        board.delete(1).unwrap();
        assert!(board.list().is_empty());
    }

    #[test]
    fn test_rejects_unknown_color_and_missing_id() {
        let mut board = NoteBoard::open(MemoryStore::new()).unwrap();
        assert!(board.add("x", Some("orange"), at(0)).is_err());
        assert!(board.edit(3, "x", None, at(0)).is_err());
        assert!(board.delete(3).is_err());
    }
}
