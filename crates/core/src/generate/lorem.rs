use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::random::RandomSource;

const CLASSIC_OPENING: &str =
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur", "excepteur",
    "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum",
];

pub const MAX_UNITS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoremUnit {
    Words,
    Sentences,
    Paragraphs,
}

fn random_words(rng: &mut impl RandomSource, count: usize) -> Vec<&'static str> {
    (0..count).map(|_| WORDS[rng.below(WORDS.len())]).collect()
}

fn sentence(rng: &mut impl RandomSource) -> String {
    let length = 6 + rng.below(10);
    let mut words = random_words(rng, length).join(" ");
    // a comma somewhere in the middle of longer sentences
    if length > 9 {
        if let Some(idx) = words.match_indices(' ').nth(length / 2).map(|(i, _)| i) {
            words.insert(idx, ',');
        }
    }
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn paragraph(rng: &mut impl RandomSource, classic: bool) -> String {
    let count = 4 + rng.below(4);
    let mut sentences: Vec<String> = Vec::with_capacity(count);
    if classic {
        sentences.push(CLASSIC_OPENING.to_string());
    }
    while sentences.len() < count {
        sentences.push(sentence(rng));
    }
    sentences.join(" ")
}

/// `count` words, sentences or paragraphs. With `start_classic` the text
/// opens with "Lorem ipsum dolor sit amet".
pub fn lorem(
    rng: &mut impl RandomSource,
    unit: LoremUnit,
    count: usize,
    start_classic: bool,
) -> Result<String> {
    if count == 0 || count > MAX_UNITS {
        return Err(ToolError::invalid(format!("Count must be between 1 and {MAX_UNITS}")));
    }

    Ok(match unit {
        LoremUnit::Words => {
            let mut words = random_words(rng, count);
            if start_classic {
                for (slot, word) in words.iter_mut().zip(WORDS.iter().copied().take(5)) {
                    *slot = word;
                }
            }
            words.join(" ")
        }
        LoremUnit::Sentences => {
            let mut sentences: Vec<String> = Vec::with_capacity(count);
            if start_classic {
                sentences.push(CLASSIC_OPENING.to_string());
            }
            while sentences.len() < count {
                sentences.push(sentence(rng));
            }
            sentences.join(" ")
        }
        LoremUnit::Paragraphs => (0..count)
            .map(|i| paragraph(rng, start_classic && i == 0))
            .collect::<Vec<_>>()
            .join("\n\n"),
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_words() {
        let text = lorem(&mut rng(), LoremUnit::Words, 12, true).unwrap();
        assert_eq!(text.split(' ').count(), 12);
        assert!(text.starts_with("lorem ipsum dolor sit amet"));
    }

    #[test]
    fn test_few_words_classic() {
        let text = lorem(&mut rng(), LoremUnit::Words, 2, true).unwrap();
        assert_eq!(text, "lorem ipsum");
    }

    #[test]
    fn test_sentences() {
        let text = lorem(&mut rng(), LoremUnit::Sentences, 3, true).unwrap();
        assert!(text.starts_with(CLASSIC_OPENING));
        assert_eq!(text.matches('.').count(), 3);
    }

    #[test]
    fn test_paragraphs() {
        let text = lorem(&mut rng(), LoremUnit::Paragraphs, 3, false).unwrap();
        assert_eq!(text.split("\n\n").count(), 3);
        assert!(!text.starts_with("Lorem ipsum dolor sit amet"));
    }

    #[test]
    fn test_count_bounds() {
        assert!(lorem(&mut rng(), LoremUnit::Words, 0, false).is_err());
        assert!(lorem(&mut rng(), LoremUnit::Words, MAX_UNITS + 1, false).is_err());
    }
}
