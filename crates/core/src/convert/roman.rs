use crate::error::{require_input, Result, ToolError};

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub const MIN: u32 = 1;
pub const MAX: u32 = 3999;

/// Render `n` in canonical subtractive notation. Only 1..=3999 is representable.
pub fn to_roman(n: u32) -> Result<String> {
    if !(MIN..=MAX).contains(&n) {
        return Err(ToolError::invalid(format!(
            "Roman numerals cover {MIN} to {MAX}, got {n}"
        )));
    }

    let mut remaining = n;
    let mut out = String::new();
    for (value, symbol) in NUMERALS {
        while remaining >= value {
            out.push_str(symbol);
            remaining -= value;
        }
    }
    Ok(out)
}

/// Parse a canonical Roman numeral (case-insensitive).
///
/// Non-canonical spellings such as `IIII` or `IC` are rejected: the value is
/// accepted only if rendering it back yields the same numeral.
pub fn from_roman(input: &str) -> Result<u32> {
    let numeral = require_input(input)?.trim().to_ascii_uppercase();

    let mut total = 0u32;
    let mut prev = 0u32;
    for ch in numeral.chars().rev() {
        let value = symbol_value(ch)
            .ok_or_else(|| ToolError::parse(format!("'{ch}' is not a Roman numeral symbol")))?;
        if value < prev {
            total = total.saturating_sub(value);
        } else {
            total = total.saturating_add(value);
            prev = value;
        }
    }

    match to_roman(total) {
        Ok(canonical) if canonical == numeral => Ok(total),
        _ => Err(ToolError::parse(format!("'{numeral}' is not a canonical Roman numeral"))),
    }
}

fn symbol_value(ch: char) -> Option<u32> {
    Some(match ch {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_roman_examples() {
        assert_eq!(to_roman(1).unwrap(), "I");
        assert_eq!(to_roman(4).unwrap(), "IV");
        assert_eq!(to_roman(1994).unwrap(), "MCMXCIV");
        assert_eq!(to_roman(3999).unwrap(), "MMMCMXCIX");
    }

    #[test]
    fn test_to_roman_rejects_out_of_range() {
        assert!(matches!(to_roman(0), Err(ToolError::Validation(_))));
        assert!(matches!(to_roman(4000), Err(ToolError::Validation(_))));
    }

    #[test]
    fn test_round_trip_all_values() {
        for n in MIN..=MAX {
            let numeral = to_roman(n).unwrap();
            assert_eq!(from_roman(&numeral).unwrap(), n, "{numeral}");
            assert_eq!(to_roman(from_roman(&numeral).unwrap()).unwrap(), numeral);
        }
    }

    #[test]
    fn test_from_roman_case_insensitive() {
        assert_eq!(from_roman("mcmxciv").unwrap(), 1994);
    }

    #[test]
    fn test_from_roman_rejects_non_canonical() {
        for bad in ["IIII", "IC", "VV", "MMMM", "IIV", "XM"] {
            assert!(from_roman(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_from_roman_rejects_bad_symbols() {
        assert!(matches!(from_roman("XIZ"), Err(ToolError::Parse(_))));
        assert!(from_roman("").unwrap_err().is_empty_input());
    }
}
