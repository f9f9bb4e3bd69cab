use serde::Serialize;

pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lines: usize,
    /// Whole minutes at [`WORDS_PER_MINUTE`], rounded up. Zero for no words.
    pub reading_minutes: usize,
}

pub fn text_stats(input: &str) -> TextStats {
    if input.is_empty() {
        return TextStats::default();
    }

    let words = input.split_whitespace().count();
    let sentences = input
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count();
    let paragraphs = input
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();

    TextStats {
        characters: input.chars().count(),
        characters_no_spaces: input.chars().filter(|c| !c.is_whitespace()).count(),
        words,
        sentences,
        paragraphs,
        lines: input.lines().count(),
        reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let stats = text_stats("Hello world. How are you?\n\nFine, thanks!");
        assert_eq!(stats.characters, 40);
        assert_eq!(stats.characters_no_spaces, 33);
        assert_eq!(stats.words, 7);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn test_empty() {
        assert_eq!(text_stats(""), TextStats::default());
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(401);
        assert_eq!(text_stats(&text).reading_minutes, 3);
    }

    #[test]
    fn test_trailing_punctuation_is_not_a_sentence() {
        assert_eq!(text_stats("Wait... what?!").sentences, 2);
    }
}
