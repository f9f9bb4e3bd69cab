//! Core library for toolbelt
//!
//! This crate implements the **Functional Core** of the toolbelt application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The toolbelt project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`toolbelt_core`** (this crate): Pure transformation functions with zero I/O
//! - **`toolbelt`**: I/O operations and orchestration (the Imperative Shell)
//!
//! Every tool follows the same contract: raw input goes in, a pure function transforms
//! it, and the output (or a [`ToolError`]) comes back. Anything that would need the
//! outside world is expressed as a port the shell injects:
//!
//! - [`storage::KeyValueStore`]: durable per-tool lists (todo, notes, habits, ...)
//! - [`random::RandomSource`]: identifiers, palettes, passwords and blobs
//! - `now` parameters: clocks are plain values passed in by the caller
//!
//! # Module Organization
//!
//! - [`format`]: JSON, SQL, CSS and Markdown formatters
//! - [`encode`]: Base64, hex, URL, HTML entity, JWT and hash encoders
//! - [`convert`]: Roman numerals, number bases, units, currency, colors, timestamps
//! - [`calc`]: Tip, aspect ratio, percentage, loan, salary, BMI and age calculators
//! - [`text`]: Case conversion, slugs, statistics and line utilities
//! - [`inspect`]: Cron expressions, IP addresses and user agent strings
//! - [`generate`]: UUIDs, passwords, palettes, gradients, lorem ipsum, ASCII art, SVG blobs
//! - [`draw`]: Draw plans for placeholder images, favicons and barcodes
//! - [`track`]: Stateful trackers backed by a key-value store, plus the stopwatch
//! - [`net`]: Response parsing for the network diagnostics tools
//!
//! # Example Usage
//!
//! ```rust
//! use toolbelt_core::calc::tip::{calculate_tip, TipInput};
//!
//! let result = calculate_tip(&TipInput { bill: 100.0, tip_percent: 15.0, split: 4 }).unwrap();
//! assert_eq!(result.per_person.to_string(), "28.75");
//! ```

pub mod calc;
pub mod config;
pub mod convert;
pub mod draw;
pub mod encode;
pub mod error;
pub mod format;
pub mod generate;
pub mod inspect;
pub mod net;
pub mod random;
pub mod storage;
pub mod text;
pub mod track;

pub use error::{Result, ToolError};
