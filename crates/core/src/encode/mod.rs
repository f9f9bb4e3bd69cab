//! Encoders and decoders
//!
//! Decoders validate their input and return [`crate::ToolError::Parse`] when it
//! is malformed. Anything decoded to bytes must be valid UTF-8 before it is
//! handed back as text.

pub mod base;
pub mod hash;
pub mod html;
pub mod jwt;
pub mod url;
