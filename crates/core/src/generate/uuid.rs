use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use uuid::{Builder, Uuid};

use crate::error::{require_input, Result, ToolError};
use crate::random::RandomSource;

pub const MAX_COUNT: usize = 1000;

static V4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid regex")
});

pub fn generate_uuid(rng: &mut impl RandomSource) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// `count` version-4 UUIDs in lowercase hyphenated form.
pub fn generate_uuids(rng: &mut impl RandomSource, count: usize) -> Result<Vec<String>> {
    if count == 0 || count > MAX_COUNT {
        return Err(ToolError::invalid(format!("Count must be between 1 and {MAX_COUNT}")));
    }
    Ok((0..count)
        .map(|_| generate_uuid(rng).hyphenated().to_string())
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UuidCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// Accepts any RFC 4122 UUID (braces, urn prefix and uppercase allowed) and
/// reports its version and variant.
pub fn validate_uuid(input: &str) -> Result<UuidCheck> {
    let input = require_input(input)?.trim();
    Ok(match Uuid::parse_str(input) {
        Ok(uuid) => UuidCheck {
            valid: true,
            version: Some(uuid.get_version_num()),
            variant: Some(format!("{:?}", uuid.get_variant())),
        },
        Err(_) => UuidCheck {
            valid: false,
            version: None,
            variant: None,
        },
    })
}

/// Strict check for the canonical lowercase v4 shape.
pub fn is_canonical_v4(input: &str) -> bool {
    V4_RE.is_match(input)
}
