//! Case conversion
//!
//! The identifier styles (camel, pascal, snake, kebab, constant) split input
//! into words on any non-alphanumeric character and on lower-to-upper
//! transitions, so `"XMLHttpRequest"`, `"xml_http_request"` and
//! `"xml http request"` all produce the same words. The prose styles (upper,
//! lower, title, sentence, alternating) keep the original spacing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Constant,
    Alternating,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 10] = [
        CaseStyle::Upper,
        CaseStyle::Lower,
        CaseStyle::Title,
        CaseStyle::Sentence,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Snake,
        CaseStyle::Kebab,
        CaseStyle::Constant,
        CaseStyle::Alternating,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CaseStyle::Upper => "upper",
            CaseStyle::Lower => "lower",
            CaseStyle::Title => "title",
            CaseStyle::Sentence => "sentence",
            CaseStyle::Camel => "camel",
            CaseStyle::Pascal => "pascal",
            CaseStyle::Snake => "snake",
            CaseStyle::Kebab => "kebab",
            CaseStyle::Constant => "constant",
            CaseStyle::Alternating => "alternating",
        }
    }
}

impl FromStr for CaseStyle {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        CaseStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ToolError::invalid(format!("Unknown case style '{s}'")))
    }
}

pub fn convert_case(input: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => input.to_uppercase(),
        CaseStyle::Lower => input.to_lowercase(),
        CaseStyle::Title => to_title_case(input),
        CaseStyle::Sentence => to_sentence_case(input),
        CaseStyle::Camel => to_camel_case(input),
        CaseStyle::Pascal => to_pascal_case(input),
        CaseStyle::Snake => to_snake_case(input),
        CaseStyle::Kebab => to_kebab_case(input),
        CaseStyle::Constant => to_constant_case(input),
        CaseStyle::Alternating => to_alternating_case(input),
    }
}

/// Every style applied to `input`, in [`CaseStyle::ALL`] order.
pub fn convert_all(input: &str) -> Vec<(CaseStyle, String)> {
    CaseStyle::ALL
        .into_iter()
        .map(|style| (style, convert_case(input, style)))
        .collect()
}

/// Split into lowercase words.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // "fooBar" splits before B; "HTTPServer" splits before the S.
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn to_title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

pub fn to_sentence_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut capitalize_next = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if capitalize_next {
                out.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            if matches!(c, '.' | '!' | '?') {
                capitalize_next = true;
            } else if c.is_numeric() {
                capitalize_next = false;
            }
            out.push(c);
        }
    }
    out
}

pub fn to_camel_case(input: &str) -> String {
    let words = words(input);
    let mut iter = words.iter();
    let mut out = iter.next().cloned().unwrap_or_default();
    for word in iter {
        out.push_str(&capitalize(word));
    }
    out
}

pub fn to_pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

pub fn to_snake_case(input: &str) -> String {
    words(input).join("_")
}

pub fn to_kebab_case(input: &str) -> String {
    words(input).join("-")
}

pub fn to_constant_case(input: &str) -> String {
    to_snake_case(input).to_uppercase()
}

/// Letters alternate lower/upper starting with lower; other characters are
/// kept and do not advance the alternation.
pub fn to_alternating_case(input: &str) -> String {
    let mut upper = false;
    input
        .chars()
        .flat_map(|c| {
            let mapped: Vec<char> = if !c.is_alphabetic() {
                vec![c]
            } else if upper {
                c.to_uppercase().collect()
            } else {
                c.to_lowercase().collect()
            };
            if c.is_alphabetic() {
                upper = !upper;
            }
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_styles() {
        assert_eq!(to_snake_case("Hello World"), "hello_world");
        assert_eq!(to_camel_case("hello world"), "helloWorld");
        assert_eq!(to_kebab_case("Hello World"), "hello-world");
        assert_eq!(to_pascal_case("hello world"), "HelloWorld");
        assert_eq!(to_constant_case("hello world"), "HELLO_WORLD");
    }

    #[test]
    fn test_word_splitting() {
        assert_eq!(words("XMLHttpRequest"), ["xml", "http", "request"]);
        assert_eq!(words("already_snake-and-kebab"), ["already", "snake", "and", "kebab"]);
        assert_eq!(words("version2Beta"), ["version2", "beta"]);
        assert_eq!(words("  --  "), Vec::<String>::new());
    }

    #[test]
    fn test_round_trips_between_identifier_styles() {
        let camel = to_camel_case("user account id");
        assert_eq!(camel, "userAccountId");
        assert_eq!(to_snake_case(&camel), "user_account_id");
        assert_eq!(to_kebab_case(&to_pascal_case(&camel)), "user-account-id");
    }

    #[test]
    fn test_prose_styles() {
        assert_eq!(to_title_case("the quick BROWN fox"), "The Quick Brown Fox");
        assert_eq!(
            to_sentence_case("HELLO THERE. how are you? fine!"),
            "Hello there. How are you? Fine!"
        );
        assert_eq!(convert_case("MiXeD", CaseStyle::Upper), "MIXED");
        assert_eq!(convert_case("MiXeD", CaseStyle::Lower), "mixed");
    }

    #[test]
    fn test_alternating() {
        assert_eq!(to_alternating_case("hello world"), "hElLo WoRlD");
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("Kebab".parse::<CaseStyle>().unwrap(), CaseStyle::Kebab);
        assert!("spongebob".parse::<CaseStyle>().is_err());
    }

    #[test]
    fn test_convert_all_order() {
        let all = convert_all("a b");
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], (CaseStyle::Upper, "A B".to_string()));
        assert_eq!(all[6], (CaseStyle::Snake, "a_b".to_string()));
    }
}
