//! Line and whitespace utilities.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Reverses by `char`; combining sequences are not kept together.
pub fn reverse_text(input: &str) -> String {
    input.chars().rev().collect()
}

/// Keep the first occurrence of every line, in original order.
pub fn dedupe_lines(input: &str, ignore_case: bool) -> String {
    let mut seen = HashSet::new();
    input
        .lines()
        .filter(|line| {
            let key = if ignore_case {
                line.to_lowercase()
            } else {
                line.to_string()
            };
            seen.insert(key)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub descending: bool,
    pub ignore_case: bool,
    pub numeric: bool,
}

pub fn sort_lines(input: &str, options: SortOptions) -> String {
    let mut lines: Vec<&str> = input.lines().collect();
    lines.sort_by(|a, b| {
        let ord = if options.numeric {
            match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                (Ok(x), Ok(y)) => x.total_cmp(&y),
                (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            }
        } else if options.ignore_case {
            a.to_lowercase().cmp(&b.to_lowercase())
        } else {
            a.cmp(b)
        };
        if options.descending {
            ord.reverse()
        } else {
            ord
        }
    });
    lines.join("\n")
}

/// Collapse runs of spaces and tabs, trim every line and drop blank lines
/// beyond a single separator between paragraphs.
pub fn remove_extra_whitespace(input: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in input.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() && out.last().map_or(true, String::is_empty) {
            continue;
        }
        out.push(collapsed);
    }
    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    out.join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "line", rename_all = "lowercase")]
pub enum DiffLine {
    Same(String),
    Added(String),
    Removed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub lines: Vec<DiffLine>,
}

/// Line diff via longest common subsequence.
pub fn diff_lines(before: &str, after: &str) -> DiffSummary {
    let a: Vec<&str> = before.lines().collect();
    let b: Vec<&str> = after.lines().collect();

    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut summary = DiffSummary::default();
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        if i < a.len() && j < b.len() && a[i] == b[j] {
            summary.lines.push(DiffLine::Same(a[i].to_string()));
            summary.unchanged += 1;
            i += 1;
            j += 1;
        } else if j < b.len() && (i == a.len() || lcs[i][j + 1] >= lcs[i + 1][j]) {
            summary.lines.push(DiffLine::Added(b[j].to_string()));
            summary.added += 1;
            j += 1;
        } else {
            summary.lines.push(DiffLine::Removed(a[i].to_string()));
            summary.removed += 1;
            i += 1;
        }
    }
    summary
}

/// Frequency of each word, most common first, ties alphabetical.
pub fn word_frequency(input: &str, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in input
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
    {
        *counts.entry(word.to_lowercase()).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse() {
        assert_eq!(reverse_text("abc déf"), "féd cba");
    }

    #[test]
    fn test_dedupe() {
        assert_eq!(dedupe_lines("a\nb\na\nB", false), "a\nb\nB");
        assert_eq!(dedupe_lines("a\nb\na\nB", true), "a\nb");
    }

    #[test]
    fn test_sort() {
        assert_eq!(sort_lines("b\nA\nc", SortOptions::default()), "A\nb\nc");
        let ci = SortOptions {
            ignore_case: true,
            descending: true,
            ..SortOptions::default()
        };
        assert_eq!(sort_lines("b\nA\nc", ci), "c\nb\nA");
        let numeric = SortOptions {
            numeric: true,
            ..SortOptions::default()
        };
        assert_eq!(sort_lines("10\n9\nx\n-1", numeric), "-1\n9\n10\nx");
    }

    #[test]
    fn test_remove_extra_whitespace() {
        let input = "  hello    world \n\n\n\tsecond\t\tline  \n\n";
        assert_eq!(remove_extra_whitespace(input), "hello world\n\nsecond line");
    }

    #[test]
    fn test_diff() {
        let summary = diff_lines("a\nb\nc", "a\nc\nd");
        assert_eq!(summary.unchanged, 2);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.added, 1);
        assert_eq!(
            summary.lines,
            vec![
                DiffLine::Same("a".into()),
                DiffLine::Removed("b".into()),
                DiffLine::Same("c".into()),
                DiffLine::Added("d".into()),
            ]
        );
    }

    #[test]
    fn test_word_frequency() {
        let top = word_frequency("the cat and the hat. The end", 2);
        assert_eq!(top, vec![("the".to_string(), 3), ("and".to_string(), 1)]);
    }
}
