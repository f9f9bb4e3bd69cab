use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{require_input, Result, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// RFC 4648 base64 with padding.
    Base64,
    /// RFC 4648 base64url without padding.
    Base64Url,
    Hex,
    /// Space-separated 8-bit groups, e.g. `01001000 01101001`.
    Binary,
}

impl FromStr for Encoding {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(Encoding::Base64),
            "base64url" | "base64-url" => Ok(Encoding::Base64Url),
            "hex" => Ok(Encoding::Hex),
            "binary" | "bin" => Ok(Encoding::Binary),
            other => Err(ToolError::invalid(format!("Unknown encoding '{other}'"))),
        }
    }
}

pub fn encode(input: &str, encoding: Encoding) -> String {
    let bytes = input.as_bytes();
    match encoding {
        Encoding::Base64 => STANDARD.encode(bytes),
        Encoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        Encoding::Hex => bytes.iter().map(|b| format!("{b:02x}")).collect(),
        Encoding::Binary => bytes
            .iter()
            .map(|b| format!("{b:08b}"))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

pub fn decode(input: &str, encoding: Encoding) -> Result<String> {
    let bytes = decode_bytes(input, encoding)?;
    String::from_utf8(bytes)
        .map_err(|_| ToolError::parse("Decoded bytes are not valid UTF-8 text"))
}

pub fn decode_bytes(input: &str, encoding: Encoding) -> Result<Vec<u8>> {
    let input = require_input(input)?.trim();
    match encoding {
        Encoding::Base64 => {
            let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map_err(|e| ToolError::parse(format!("Invalid base64: {e}")))
        }
        Encoding::Base64Url => decode_base64url(input),
        Encoding::Hex => decode_hex(input),
        Encoding::Binary => decode_binary(input),
    }
}

/// Decode base64url, tolerating both padded and unpadded input.
pub fn decode_base64url(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| ToolError::parse(format!("Invalid base64url: {e}")))
}

fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let digits: String = input
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ToolError::parse(format!("Invalid hex digit '{bad}'")));
    }
    if digits.len() % 2 != 0 {
        return Err(ToolError::parse("Hex input must have an even number of digits"));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = &digits[i..i + 2];
            u8::from_str_radix(pair, 16)
                .map_err(|_| ToolError::parse(format!("Invalid hex digits '{pair}'")))
        })
        .collect()
}

fn decode_binary(input: &str) -> Result<Vec<u8>> {
    input
        .split_whitespace()
        .map(|group| {
            if group.len() > 8 {
                return Err(ToolError::parse(format!("Binary group '{group}' is longer than 8 bits")));
            }
            u8::from_str_radix(group, 2)
                .map_err(|_| ToolError::parse(format!("Invalid binary group '{group}'")))
        })
        .collect()
}
