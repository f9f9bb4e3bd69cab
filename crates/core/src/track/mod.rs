//! Stateful local trackers
//!
//! Each tracker owns exactly one key in a [`crate::storage::KeyValueStore`]
//! and rewrites it after every mutation. The stopwatch keeps no state on
//! disk and is driven by the caller's clock.

pub mod habits;
pub mod notes;
pub mod quotes;
pub mod stopwatch;
pub mod todo;
pub mod water;
pub mod world_clock;

use crate::error::ToolError;

/// One past the largest id in use, starting at 1.
pub(crate) fn next_id<T>(items: &[T], id: impl Fn(&T) -> u64) -> u64 {
    items.iter().map(id).max().unwrap_or(0) + 1
}

pub(crate) fn not_found(what: &str, id: u64) -> ToolError {
    ToolError::invalid(format!("No {what} with id {id}"))
}
