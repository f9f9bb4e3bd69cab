use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::random::RandomSource;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";
const AMBIGUOUS: &str = "Il1O0o|`'\"";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub exclude_ambiguous: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
            exclude_ambiguous: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strength {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordEstimate {
    pub entropy_bits: f64,
    pub strength: Strength,
}

fn classes(options: &PasswordOptions) -> Vec<Vec<char>> {
    [
        (options.lowercase, LOWER),
        (options.uppercase, UPPER),
        (options.digits, DIGITS),
        (options.symbols, SYMBOLS),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, set)| {
        set.chars()
            .filter(|c| !(options.exclude_ambiguous && AMBIGUOUS.contains(*c)))
            .collect()
    })
    .collect()
}

/// Generates a password with at least one character from every enabled class.
pub fn generate_password(rng: &mut impl RandomSource, options: &PasswordOptions) -> Result<String> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(ToolError::invalid(format!(
            "Length must be between {MIN_LENGTH} and {MAX_LENGTH}"
        )));
    }
    let classes = classes(options);
    if classes.is_empty() {
        return Err(ToolError::invalid("Select at least one character class"));
    }

    let pool: Vec<char> = classes.iter().flatten().copied().collect();
    let mut chars: Vec<char> = classes.iter().map(|set| set[rng.below(set.len())]).collect();
    while chars.len() < options.length {
        chars.push(pool[rng.below(pool.len())]);
    }

    // Fisher-Yates so the guaranteed characters are not always up front
    for i in (1..chars.len()).rev() {
        let j = rng.below(i + 1);
        chars.swap(i, j);
    }
    Ok(chars.into_iter().collect())
}

/// Entropy from length and the character classes actually present.
pub fn estimate_strength(password: &str) -> PasswordEstimate {
    let mut pool = 0usize;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        pool += 26;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        pool += 26;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        pool += 10;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        pool += 33;
    }

    let length = password.chars().count();
    let entropy_bits = if pool == 0 {
        0.0
    } else {
        (length as f64 * (pool as f64).log2() * 10.0).round() / 10.0
    };
    let strength = match entropy_bits {
        e if e < 28.0 => Strength::VeryWeak,
        e if e < 36.0 => Strength::Weak,
        e if e < 60.0 => Strength::Fair,
        e if e < 128.0 => Strength::Strong,
        _ => Strength::VeryStrong,
    };

    PasswordEstimate {
        entropy_bits,
        strength,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_every_class_present() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let pw = generate_password(&mut rng, &PasswordOptions::default()).unwrap();
            assert_eq!(pw.len(), 16);
            assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
            assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
            assert!(pw.chars().any(|c| c.is_ascii_digit()));
            assert!(pw.chars().any(|c| SYMBOLS.contains(c)));
        }
    }

    #[test]
    fn test_excludes_ambiguous() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = PasswordOptions {
            length: MAX_LENGTH,
            exclude_ambiguous: true,
            ..PasswordOptions::default()
        };
        let pw = generate_password(&mut rng, &options).unwrap();
        assert!(!pw.chars().any(|c| AMBIGUOUS.contains(c)));
    }

    #[test]
    fn test_digits_only() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = PasswordOptions {
            length: 6,
            lowercase: false,
            uppercase: false,
            symbols: false,
            ..PasswordOptions::default()
        };
        let pin = generate_password(&mut rng, &options).unwrap();
        assert!(pin.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_rejects_bad_options() {
        let mut rng = StdRng::seed_from_u64(5);
        let none = PasswordOptions {
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
            ..PasswordOptions::default()
        };
        assert!(generate_password(&mut rng, &none).is_err());
        let short = PasswordOptions {
            length: 2,
            ..PasswordOptions::default()
        };
        assert!(generate_password(&mut rng, &short).is_err());
    }

    #[test]
    fn test_strength() {
        assert_eq!(estimate_strength("abc").strength, Strength::VeryWeak);
        assert_eq!(estimate_strength("correcthorse").strength, Strength::Fair);
        assert_eq!(estimate_strength("Tr0ub4dor&3xyzQ!").strength, Strength::Strong);
        assert_eq!(estimate_strength("").entropy_bits, 0.0);
    }
}
