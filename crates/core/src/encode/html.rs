/// Escape `&`, `<`, `>`, `"` and `'` so the text is safe in both element
/// content and quoted attributes.
pub fn encode_html(input: &str) -> String {
    html_escape::encode_quoted_attribute(input).into_owned()
}

/// Decode named, decimal and hexadecimal character references.
pub fn decode_html(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_html() {
        let out = encode_html(r#"<a href="x">Tom & 'Jerry'</a>"#);
        assert!(out.starts_with("&lt;a href=&quot;x&quot;&gt;Tom &amp; "));
        assert!(out.ends_with("&lt;/a&gt;"));
        assert!(!out.contains('\''));
        assert!(!out.contains('"'));
    }

    #[test]
    fn test_decode_html() {
        assert_eq!(decode_html("&lt;p&gt;&amp; 2024 &#65;&#x42;&lt;/p&gt;"), "<p>& 2024 AB</p>");
    }

    #[test]
    fn test_round_trip() {
        let text = "if (a < b && c > d) { \"quote\" }";
        assert_eq!(decode_html(&encode_html(text)), text);
    }
}
