use serde::Serialize;

use crate::error::{require_input, Result, ToolError};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseConversion {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    pub hexadecimal: String,
}

fn check_radix(radix: u32) -> Result<()> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(ToolError::invalid(format!("Base must be between 2 and 36, got {radix}")))
    }
}

/// Parse a signed integer written in `radix`. Underscores and the usual
/// `0b`/`0o`/`0x` prefixes are accepted when they match the radix.
pub fn parse_in_base(input: &str, radix: u32) -> Result<i128> {
    check_radix(radix)?;
    let raw = require_input(input)?.trim().replace('_', "");
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.as_str()),
    };
    let lower = digits.to_ascii_lowercase();
    let digits = match (radix, lower.get(..2)) {
        (2, Some("0b")) | (8, Some("0o")) | (16, Some("0x")) => &lower[2..],
        _ => lower.as_str(),
    };

    if digits.is_empty() {
        return Err(ToolError::parse("No digits to convert"));
    }

    let magnitude = u128::from_str_radix(digits, radix).map_err(|e| {
        ToolError::parse(format!("'{}' is not a valid base-{radix} number: {e}", input.trim()))
    })?;
    let magnitude = i128::try_from(magnitude)
        .map_err(|_| ToolError::invalid("Number is too large"))?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Render `value` in `radix` using lowercase digits.
pub fn format_in_base(value: i128, radix: u32) -> Result<String> {
    check_radix(radix)?;
    if value == 0 {
        return Ok("0".to_string());
    }

    let mut magnitude = value.unsigned_abs();
    let mut out = Vec::new();
    while magnitude > 0 {
        out.push(DIGITS[(magnitude % u128::from(radix)) as usize]);
        magnitude /= u128::from(radix);
    }
    if value < 0 {
        out.push(b'-');
    }
    out.reverse();
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn convert_base(input: &str, from: u32, to: u32) -> Result<String> {
    format_in_base(parse_in_base(input, from)?, to)
}

/// Show `input` (written in `from`) in the four common bases.
pub fn convert_all(input: &str, from: u32) -> Result<BaseConversion> {
    let value = parse_in_base(input, from)?;
    Ok(BaseConversion {
        binary: format_in_base(value, 2)?,
        octal: format_in_base(value, 8)?,
        decimal: value.to_string(),
        hexadecimal: format_in_base(value, 16)?,
    })
}
