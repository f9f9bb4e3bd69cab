use serde::{Deserialize, Serialize};

use crate::error::{require_input, Result};
use crate::storage::{KeyValueStore, PersistedList};

pub const KEY: &str = "favorite-quotes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    fn same_as(&self, other: &Quote) -> bool {
        normalize(&self.text) == normalize(&other.text)
            && normalize(&self.author) == normalize(&other.author)
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\u{201c}{}\u{201d} \u{2014} {}", self.text, self.author)
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A handful of quotes shown before any favorites exist.
pub const BUILT_IN: [(&str, &str); 5] = [
    ("The best way to get started is to quit talking and begin doing.", "Walt Disney"),
    ("Simplicity is prerequisite for reliability.", "Edsger W. Dijkstra"),
    ("Well done is better than well said.", "Benjamin Franklin"),
    ("It always seems impossible until it's done.", "Nelson Mandela"),
    ("Make it work, make it right, make it fast.", "Kent Beck"),
];

pub struct QuoteBook<S> {
    list: PersistedList<S, Quote>,
}

impl<S: KeyValueStore> QuoteBook<S> {
    pub fn open(store: S) -> Result<Self> {
        Ok(Self {
            list: PersistedList::open(store, KEY)?,
        })
    }

    /// Returns `false` when an equivalent quote is already saved.
    pub fn add(&mut self, text: &str, author: &str) -> Result<bool> {
        let text = require_input(text)?.trim();
        let author = match author.trim() {
            "" => "Unknown",
            a => a,
        };
        let quote = Quote::new(text, author);
        if self.contains(&quote) {
            return Ok(false);
        }
        self.list.push(quote)?;
        Ok(true)
    }

    /// Removes the quote at `index` (0-based, in saved order).
    pub fn remove_at(&mut self, index: usize) -> Result<Option<Quote>> {
        self.list.mutate(|items| (index < items.len()).then(|| items.remove(index)))
    }

    pub fn contains(&self, quote: &Quote) -> bool {
        self.list.items().iter().any(|q| q.same_as(quote))
    }

    pub fn quotes(&self) -> &[Quote] {
        self.list.items()
    }

    pub fn into_store(self) -> S {
        self.list.into_store()
    }
}
