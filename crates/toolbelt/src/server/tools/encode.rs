use super::{json_result, parse_args, text_result, tool, unknown_tool, Tool, ToolOutcome};
use serde::Deserialize;
use serde_json::json;
use toolbelt_core::encode::base::{decode, encode, Encoding};
use toolbelt_core::encode::hash::{hash_all, hash_text, HashAlgorithm};
use toolbelt_core::encode::html::{decode_html, encode_html};
use toolbelt_core::encode::jwt::decode_jwt;
use toolbelt_core::encode::url::{decode_url, encode_url, parse_url};
use toolbelt_core::error::require_input;

pub fn tools() -> Vec<Tool> {
    let input_and_decode = |encoding: bool| {
        let mut properties = json!({
            "input": {"type": "string"},
            "decode": {"type": "boolean", "description": "Decode instead of encode"}
        });
        if encoding {
            properties["encoding"] = json!({"type": "string", "enum": ["base64", "base64url", "hex", "binary"]});
        }
        json!({"type": "object", "properties": properties, "required": ["input"]})
    };

    vec![
        tool(
            "encode_base",
            "Encode or decode text as base64, base64url, hex or binary.",
            input_and_decode(true),
        ),
        tool("encode_url", "Percent-encode or decode a URL component.", input_and_decode(false)),
        tool(
            "encode_url_parse",
            "Split a URL into scheme, host, port, path, query parameters and fragment.",
            json!({
                "type": "object",
                "properties": {"input": {"type": "string"}},
                "required": ["input"]
            }),
        ),
        tool("encode_html", "Escape or unescape HTML entities.", input_and_decode(false)),
        tool(
            "encode_jwt",
            "Decode a JWT header and payload without verifying the signature.",
            json!({
                "type": "object",
                "properties": {"input": {"type": "string", "description": "The token"}},
                "required": ["input"]
            }),
        ),
        tool(
            "encode_hash",
            "Hex digest of the input. Without an algorithm, returns MD5, SHA-256 and SHA-512.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "algorithm": {"type": "string", "enum": ["md5", "sha256", "sha512"]}
                },
                "required": ["input"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct EncodeArgs {
    input: String,
    #[serde(default)]
    decode: bool,
    encoding: Option<Encoding>,
    algorithm: Option<HashAlgorithm>,
}

pub fn call(name: &str, arguments: Option<serde_json::Value>) -> ToolOutcome {
    let args: EncodeArgs = parse_args(arguments)?;
    let input = args.input.as_str();
    match name {
        "encode_base" => {
            let encoding = args.encoding.unwrap_or(Encoding::Base64);
            text_result(if args.decode {
                decode(input, encoding)
            } else {
                require_input(input).map(|s| encode(s, encoding))
            })
        }
        "encode_url" => text_result(if args.decode {
            decode_url(input)
        } else {
            require_input(input).map(encode_url)
        }),
        "encode_url_parse" => json_result(parse_url(input)),
        "encode_html" => text_result(require_input(input).map(|s| {
            if args.decode {
                decode_html(s)
            } else {
                encode_html(s)
            }
        })),
        "encode_jwt" => json_result(decode_jwt(input, chrono::Utc::now())),
        "encode_hash" => match args.algorithm {
            Some(algorithm) => text_result(require_input(input).map(|s| hash_text(s, algorithm))),
            None => json_result(require_input(input).map(hash_all)),
        },
        _ => unknown_tool(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(outcome: ToolOutcome) -> String {
        outcome.unwrap()["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_base64_both_ways() {
        let encoded = text_of(call("encode_base", Some(json!({"input": "hello"}))));
        assert_eq!(encoded, "aGVsbG8=");
        let decoded = text_of(call("encode_base", Some(json!({"input": encoded, "decode": true}))));
        assert_eq!(decoded, "hello");
    }

    #[test]
    fn test_hash_single_algorithm() {
        let out = text_of(call("encode_hash", Some(json!({"input": "abc", "algorithm": "md5"}))));
        assert_eq!(out, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_unknown_encoding_is_invalid_params() {
        let err = call("encode_base", Some(json!({"input": "x", "encoding": "rot13"}))).unwrap_err();
        assert_eq!(err.code, super::super::INVALID_PARAMS);
    }
}
