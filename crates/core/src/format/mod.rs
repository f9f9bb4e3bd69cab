//! Text-to-text formatters
//!
//! Each formatter either returns the transformed text or a [`crate::ToolError`];
//! none of them produce partial output. Format and minify operations are
//! idempotent: running them twice gives the same result as running them once.

pub mod css;
pub mod json;
pub mod markdown;
pub mod sql;
