use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{require_input, Result, ToolError};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*)://(?:(?P<userinfo>[^@/]*)@)?(?P<host>\[[^\]]+\]|[^:/?#]+)(?::(?P<port>\d+))?(?P<path>/[^?#]*)?(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>.*))?$",
    )
    .expect("url regex")
});

/// Percent-encode every character outside the unreserved set.
pub fn encode_url(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decode percent escapes. `+` is treated as a space, as in form bodies.
pub fn decode_url(input: &str) -> Result<String> {
    let input = require_input(input)?;
    urlencoding::decode(&input.replace('+', " "))
        .map(|s| s.into_owned())
        .map_err(|e| ToolError::parse(format!("Invalid percent-encoding: {e}")))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlParts {
    pub scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub path: String,
    pub query: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

/// Split an absolute URL into its components, decoding query pairs.
pub fn parse_url(input: &str) -> Result<UrlParts> {
    let input = require_input(input)?.trim();
    let caps = URL_RE
        .captures(input)
        .ok_or_else(|| ToolError::parse(format!("Not an absolute URL: {input}")))?;

    let port = caps
        .name("port")
        .map(|m| {
            m.as_str()
                .parse::<u16>()
                .map_err(|_| ToolError::invalid(format!("Port out of range: {}", m.as_str())))
        })
        .transpose()?;

    let query = match caps.name("query") {
        Some(q) if !q.as_str().is_empty() => q
            .as_str()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                Ok((decode_component(k)?, decode_component(v)?))
            })
            .collect::<Result<Vec<_>>>()?,
        _ => Vec::new(),
    };

    Ok(UrlParts {
        scheme: caps["scheme"].to_ascii_lowercase(),
        username: caps
            .name("userinfo")
            .map(|m| m.as_str().split(':').next().unwrap_or_default().to_string()),
        host: caps["host"].to_ascii_lowercase(),
        port,
        path: caps
            .name("path")
            .map_or_else(|| "/".to_string(), |m| m.as_str().to_string()),
        query,
        fragment: caps.name("fragment").map(|m| m.as_str().to_string()),
    })
}

fn decode_component(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    decode_url(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_url() {
        assert_eq!(encode_url("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
    }

    #[test]
    fn test_decode_url() {
        assert_eq!(decode_url("a%20b+c%26").unwrap(), "a b c&");
    }

    #[test]
    fn test_decode_url_invalid_utf8() {
        assert!(decode_url("%FF").is_err());
    }

    #[test]
    fn test_parse_url_full() {
        let parts =
            parse_url("HTTPS://user:pw@Example.com:8443/a/b?q=rust+lang&x=%2F&flag#top").unwrap();
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.username.as_deref(), Some("user"));
        assert_eq!(parts.host, "example.com");
        assert_eq!(parts.port, Some(8443));
        assert_eq!(parts.path, "/a/b");
        assert_eq!(
            parts.query,
            vec![
                ("q".to_string(), "rust lang".to_string()),
                ("x".to_string(), "/".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
        assert_eq!(parts.fragment.as_deref(), Some("top"));
    }

    #[test]
    fn test_parse_url_defaults_path() {
        let parts = parse_url("http://localhost").unwrap();
        assert_eq!(parts.path, "/");
        assert!(parts.query.is_empty());
        assert_eq!(parts.port, None);
    }

    #[test]
    fn test_parse_url_rejects_relative() {
        assert!(matches!(parse_url("/just/a/path"), Err(ToolError::Parse(_))));
    }

    #[test]
    fn test_parse_url_port_out_of_range() {
        assert!(matches!(
            parse_url("http://h:99999/"),
            Err(ToolError::Validation(_))
        ));
    }
}
