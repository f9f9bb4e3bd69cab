use std::sync::LazyLock;

use regex::Regex;

use crate::error::{require_input, Result};

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("css whitespace regex"));
static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([{}:;,>])\s*").expect("css punctuation regex"));
static SEMICOLONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";+(\})|;{2,}").expect("css semicolon regex"));

/// A stretch of stylesheet source: quoted strings are kept byte for byte.
#[derive(Debug, PartialEq)]
enum Segment {
    Code(String),
    Quoted(String),
}

/// Split `input` into code and quoted strings, dropping comments.
///
/// A comment becomes a single space so the tokens on either side stay apart.
/// An unterminated string runs to the end of the input.
fn segments(input: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut code = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                code.push(' ');
            }
            '"' | '\'' => {
                if !code.is_empty() {
                    out.push(Segment::Code(std::mem::take(&mut code)));
                }
                let mut quoted = String::from(ch);
                while let Some(c) = chars.next() {
                    quoted.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            quoted.push(escaped);
                        }
                    } else if c == ch {
                        break;
                    }
                }
                out.push(Segment::Quoted(quoted));
            }
            _ => code.push(ch),
        }
    }
    if !code.is_empty() {
        out.push(Segment::Code(code));
    }
    out
}

fn minify_code(code: &str) -> String {
    let code = WHITESPACE_RE.replace_all(code, " ");
    let code = PUNCT_RE.replace_all(&code, "$1");
    SEMICOLONS_RE
        .replace_all(&code, |caps: &regex::Captures| match caps.get(1) {
            Some(close) => close.as_str().to_string(),
            None => ";".to_string(),
        })
        .into_owned()
}

/// Strip comments and every byte of optional whitespace.
///
/// Quoted strings pass through untouched. Spaces around `+` and `~` are kept
/// because `calc()` needs them.
pub fn minify_css(input: &str) -> Result<String> {
    let input = require_input(input)?;
    let css: String = segments(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Code(code) => minify_code(&code),
            Segment::Quoted(quoted) => quoted,
        })
        .collect();
    Ok(css.trim().to_string())
}

/// Re-indent a stylesheet: one declaration per line, `indent` spaces per
/// nesting level, a blank line between top-level rules.
pub fn beautify_css(input: &str, indent: usize) -> Result<String> {
    let compact = minify_css(input)?;
    let unit = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut depth = 0usize;
    let mut parens = 0usize;
    let mut quote: Option<char> = None;

    for ch in compact.chars() {
        if let Some(q) = quote {
            buf.push(ch);
            if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                buf.push(ch);
            }
            '(' => {
                parens += 1;
                buf.push(ch);
            }
            ')' => {
                parens = parens.saturating_sub(1);
                buf.push(ch);
            }
            '{' if parens == 0 => {
                let selector = buf.trim().replace(',', ", ");
                lines.push(format!("{}{} {{", unit.repeat(depth), selector));
                buf.clear();
                depth += 1;
            }
            ';' if parens == 0 => {
                push_declaration(&mut lines, &unit, depth, &buf);
                buf.clear();
            }
            '}' if parens == 0 => {
                push_declaration(&mut lines, &unit, depth, &buf);
                buf.clear();
                depth = depth.saturating_sub(1);
                lines.push(format!("{}}}", unit.repeat(depth)));
                if depth == 0 {
                    lines.push(String::new());
                }
            }
            _ => buf.push(ch),
        }
    }

    // Top-level statements such as `@import url(x);` end with a semicolon and
    // are handled above; anything left over is emitted verbatim.
    if !buf.trim().is_empty() {
        lines.push(buf.trim().to_string());
    }

    Ok(lines.join("\n").trim_end().to_string())
}

fn push_declaration(lines: &mut Vec<String>, unit: &str, depth: usize, raw: &str) {
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }
    let declaration = match raw.split_once(':') {
        Some((prop, value)) if depth > 0 => format!("{}: {};", prop.trim(), value.trim()),
        _ => format!("{raw};"),
    };
    lines.push(format!("{}{}", unit.repeat(depth), declaration));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_minify_css_is_idempotent(css in "[a-z0-9{}:;,>+~() \n\t\"']{1,48}") {
            prop_assume!(!css.trim().is_empty());
            let once = minify_css(&css).unwrap();
            prop_assert_eq!(minify_css(&once).unwrap(), once);
        }

        #[test]
        fn prop_minify_css_keeps_quoted_text(text in "[a-z ;:{}]{0,16}") {
            let css = format!("a {{ content: \"{text}\" ; }}");
            prop_assert_eq!(minify_css(&css).unwrap(), format!("a{{content:\"{text}\"}}"));
        }
    }

    #[test]
    fn test_minify_css() {
        let css = "/* header */\nbody {\n  color: red;\n  margin : 0 auto ;\n}\n\na > b, c { padding: 1px; }";
        assert_eq!(
            minify_css(css).unwrap(),
            "body{color:red;margin:0 auto}a>b,c{padding:1px}"
        );
    }

    #[test]
    fn test_minify_css_keeps_calc_spaces() {
        let out = minify_css("div { width: calc(100% - 2px + 1em); }").unwrap();
        assert_eq!(out, "div{width:calc(100% - 2px + 1em)}");
    }

    #[test]
    fn test_minify_css_idempotent() {
        let css = "a { color: blue; } @media (max-width: 600px) { a { color: red; } }";
        let once = minify_css(css).unwrap();
        assert_eq!(minify_css(&once).unwrap(), once);
    }

    #[test]
    fn test_minify_css_leaves_strings_alone() {
        let out = minify_css(r#"a::before { content: "x  /* y */  z"; }"#).unwrap();
        assert_eq!(out, r#"a::before{content:"x  /* y */  z"}"#);

        let out = minify_css(r#"q { quotes: '\'' " ; } "; }"#).unwrap();
        assert_eq!(out, r#"q{quotes:'\'' " ; } "}"#);
    }

    #[test]
    fn test_minify_css_repeated_semicolons() {
        let once = minify_css("a { color: red;; margin: 0;;; }").unwrap();
        assert_eq!(once, "a{color:red;margin:0}");
        assert_eq!(minify_css(&once).unwrap(), once);
    }

    #[test]
    fn test_minify_css_comment_separates_tokens() {
        assert_eq!(minify_css("a{margin:0/**/auto}").unwrap(), "a{margin:0 auto}");
    }

    #[test]
    fn test_beautify_css() {
        let out = beautify_css("a,b{color:red;margin:0}c{padding:1px}", 2).unwrap();
        assert_eq!(
            out,
            "a, b {\n  color: red;\n  margin: 0;\n}\n\nc {\n  padding: 1px;\n}"
        );
    }

    #[test]
    fn test_beautify_css_nested_media() {
        let out = beautify_css("@media (max-width:600px){a{color:red}}", 4).unwrap();
        assert_eq!(
            out,
            "@media (max-width:600px) {\n    a {\n        color: red;\n    }\n}"
        );
    }

    #[test]
    fn test_beautify_css_data_uri_semicolon() {
        let out = beautify_css("a{background:url(data:image/png;base64,AAA)}", 2).unwrap();
        assert!(out.contains("background: url(data:image/png;base64,AAA);"));
    }

    #[test]
    fn test_css_empty_input() {
        assert!(minify_css("").unwrap_err().is_empty_input());
        assert!(beautify_css(" ", 2).unwrap_err().is_empty_input());
    }
}
