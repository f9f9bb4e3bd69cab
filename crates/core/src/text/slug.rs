use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugOptions {
    pub separator: char,
    pub lowercase: bool,
    /// Truncate to at most this many characters, never ending on a separator.
    pub max_length: Option<usize>,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            separator: '-',
            lowercase: true,
            max_length: None,
        }
    }
}

/// URL-safe slug: diacritics stripped, runs of anything that is not an ASCII
/// letter or digit collapsed into one separator, separators trimmed.
pub fn slugify(input: &str, options: &SlugOptions) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(options.separator);
            }
            pending_separator = false;
            slug.push(if options.lowercase {
                c.to_ascii_lowercase()
            } else {
                c
            });
        } else {
            pending_separator = true;
        }
    }

    if let Some(max) = options.max_length {
        if slug.len() > max {
            slug.truncate(max);
            let trimmed_len = slug.trim_end_matches(options.separator).len();
            slug.truncate(trimmed_len);
        }
    }
    slug
}
