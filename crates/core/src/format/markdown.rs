use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*?)\s*#*\s*$").expect("heading regex"));
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:\*\s*){3,}|(?:-\s*){3,}|(?:_\s*){3,})$").expect("rule regex")
});
static UL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").expect("unordered list regex"));
static OL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*)$").expect("ordered list regex"));
static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code span regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)\s]+)\)").expect("link regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("bold regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*|\b_([^_]+)_\b").expect("italic regex"));
static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~").expect("strikethrough regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Convert Markdown to an HTML fragment.
///
/// Supports ATX headings, paragraphs, emphasis, inline code, fenced code
/// blocks, links, images, flat lists, blockquotes and horizontal rules. Raw
/// HTML in the source is escaped rather than passed through.
pub fn markdown_to_html(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    render_blocks(&lines).join("\n")
}

fn render_blocks(lines: &[&str]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            flush_paragraph(&mut paragraph, &mut blocks);
            let lang = trimmed.trim_start_matches('`').trim();
            let mut body = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                body.push(lines[i]);
                i += 1;
            }
            let class = if lang.is_empty() {
                String::new()
            } else {
                format!(" class=\"language-{}\"", html_escape::encode_double_quoted_attribute(lang))
            };
            blocks.push(format!(
                "<pre><code{class}>{}</code></pre>",
                html_escape::encode_text(&body.join("\n"))
            ));
            i += 1;
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            i += 1;
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let level = caps[1].len();
            blocks.push(format!("<h{level}>{}</h{level}>", render_inline(&caps[2])));
            i += 1;
            continue;
        }

        if RULE_RE.is_match(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push("<hr>".to_string());
            i += 1;
            continue;
        }

        if trimmed.starts_with('>') {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut quoted = Vec::new();
            while i < lines.len() && lines[i].trim_start().starts_with('>') {
                let inner = lines[i].trim_start().trim_start_matches('>');
                quoted.push(inner.strip_prefix(' ').unwrap_or(inner));
                i += 1;
            }
            blocks.push(format!(
                "<blockquote>\n{}\n</blockquote>",
                render_blocks(&quoted).join("\n")
            ));
            continue;
        }

        if let Some(kind) = list_kind(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut items = Vec::new();
            while i < lines.len() && list_kind(lines[i]) == Some(kind) {
                let re = match kind {
                    ListKind::Unordered => &*UL_RE,
                    ListKind::Ordered => &*OL_RE,
                };
                if let Some(caps) = re.captures(lines[i]) {
                    items.push(format!("<li>{}</li>", render_inline(&caps[1])));
                }
                i += 1;
            }
            let tag = match kind {
                ListKind::Unordered => "ul",
                ListKind::Ordered => "ol",
            };
            blocks.push(format!("<{tag}>\n{}\n</{tag}>", items.join("\n")));
            continue;
        }

        paragraph.push(trimmed);
        i += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn list_kind(line: &str) -> Option<ListKind> {
    if RULE_RE.is_match(line) {
        None
    } else if UL_RE.is_match(line) {
        Some(ListKind::Unordered)
    } else if OL_RE.is_match(line) {
        Some(ListKind::Ordered)
    } else {
        None
    }
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join("\n");
    blocks.push(format!("<p>{}</p>", render_inline(&text)));
    paragraph.clear();
}

/// Inline formatting. Code spans are cut out first so nothing inside them is
/// interpreted.
fn render_inline(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;

    for caps in CODE_SPAN_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&render_spans(&text[last..whole.start()]));
        out.push_str(&format!("<code>{}</code>", html_escape::encode_text(&caps[1])));
        last = whole.end();
    }
    out.push_str(&render_spans(&text[last..]));
    out
}

/// Links and images are cut out of the escaped text so their URLs are
/// emitted verbatim; emphasis applies to the text around them and to link
/// text.
fn render_spans(text: &str) -> String {
    let escaped = html_escape::encode_text(text).to_string();
    let mut out = String::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(&escaped) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(2), caps.get(3)) else {
            continue;
        };
        let is_image = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        if !is_image && label.as_str().is_empty() {
            continue;
        }
        out.push_str(&render_emphasis(&escaped[last..whole.start()]));
        let url = url.as_str().replace('"', "&quot;");
        if is_image {
            out.push_str(&format!(
                "<img src=\"{url}\" alt=\"{}\">",
                label.as_str().replace('"', "&quot;")
            ));
        } else {
            out.push_str(&format!("<a href=\"{url}\">{}</a>", render_emphasis(label.as_str())));
        }
        last = whole.end();
    }
    out.push_str(&render_emphasis(&escaped[last..]));
    out.replace("  \n", "<br>\n")
}

fn render_emphasis(html: &str) -> String {
    let html = BOLD_RE.replace_all(html, |caps: &regex::Captures| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        format!("<strong>{inner}</strong>")
    });
    let html = ITALIC_RE.replace_all(&html, |caps: &regex::Captures| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        format!("<em>{inner}</em>")
    });
    STRIKE_RE.replace_all(&html, "<del>$1</del>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(markdown_to_html("# Title"), "<h1>Title</h1>");
        assert_eq!(markdown_to_html("### Sub ###"), "<h3>Sub</h3>");
    }

    #[test]
    fn test_paragraphs_and_emphasis() {
        let html = markdown_to_html("Hello **bold** and *it* and `a*b*c`\n\nSecond");
        assert_eq!(
            html,
            "<p>Hello <strong>bold</strong> and <em>it</em> and <code>a*b*c</code></p>\n<p>Second</p>"
        );
    }

    #[test]
    fn test_snake_case_is_not_italic() {
        assert_eq!(markdown_to_html("my_var_name"), "<p>my_var_name</p>");
    }

    #[test]
    fn test_links_and_images() {
        let html = markdown_to_html("See [docs](https://x.dev/a?b=1&c=2) ![logo](/l.png)");
        assert_eq!(
            html,
            "<p>See <a href=\"https://x.dev/a?b=1&amp;c=2\">docs</a> <img src=\"/l.png\" alt=\"logo\"></p>"
        );
    }

    #[test]
    fn test_emphasis_markers_in_urls_are_literal() {
        assert_eq!(
            markdown_to_html("[a](http://x.com/a*b*c)"),
            "<p><a href=\"http://x.com/a*b*c\">a</a></p>"
        );
        assert_eq!(
            markdown_to_html("*see* ![x](/a__b__c.png) [**bold** link](/p~~q~~)"),
            "<p><em>see</em> <img src=\"/a__b__c.png\" alt=\"x\"> <a href=\"/p~~q~~\"><strong>bold</strong> link</a></p>"
        );
    }

    #[test]
    fn test_lists() {
        let html = markdown_to_html("- one\n- two\n\n1. first\n2. second");
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<ol>\n<li>first</li>\n<li>second</li>\n</ol>"
        );
    }

    #[test]
    fn test_fenced_code_block_is_escaped() {
        let html = markdown_to_html("```rust\nlet x = a < b;\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">let x = a &lt; b;</code></pre>"
        );
    }

    #[test]
    fn test_blockquote_and_rule() {
        let html = markdown_to_html("> quoted **text**\n\n---");
        assert_eq!(
            html,
            "<blockquote>\n<p>quoted <strong>text</strong></p>\n</blockquote>\n<hr>"
        );
    }

    #[test]
    fn test_raw_html_is_escaped() {
        assert_eq!(
            markdown_to_html("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(markdown_to_html("~~gone~~"), "<p><del>gone</del></p>");
    }
}
