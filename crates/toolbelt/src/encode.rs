use crate::input::read_input;
use crate::output::OutputArgs;
use crate::prelude::*;
use colored::Colorize;
use toolbelt_core::encode::base::{decode, encode, Encoding};
use toolbelt_core::encode::hash::{hash_all, hash_text, HashAlgorithm};
use toolbelt_core::encode::html::{decode_html, encode_html};
use toolbelt_core::encode::jwt::decode_jwt;
use toolbelt_core::encode::url::{decode_url, encode_url, parse_url};
use toolbelt_core::error::require_input;

#[derive(Debug, clap::Parser)]
#[command(name = "encode")]
#[command(about = "Base64, hex, URL, HTML entity, JWT and hash tools")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Encode or decode base64, base64url, hex or binary text
    #[clap(name = "base")]
    Base(BaseOptions),

    /// Percent-encode, decode or split a URL
    #[clap(name = "url")]
    Url(UrlOptions),

    /// Escape or unescape HTML entities
    #[clap(name = "html")]
    Html(DirectionOptions),

    /// Decode a JSON Web Token (the signature is not verified)
    #[clap(name = "jwt")]
    Jwt(JwtOptions),

    /// MD5, SHA-256 and SHA-512 digests
    #[clap(name = "hash")]
    Hash(HashOptions),
}

#[derive(Debug, clap::Args)]
pub struct DirectionOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Decode instead of encode
    #[arg(short, long)]
    pub decode: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct BaseOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// base64, base64url, hex or binary
    #[arg(short, long, default_value = "base64", value_parser = str::parse::<Encoding>)]
    pub encoding: Encoding,

    /// Decode instead of encode
    #[arg(short, long)]
    pub decode: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct UrlOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Decode instead of encode
    #[arg(short, long, conflicts_with = "parse")]
    pub decode: bool,

    /// Split the URL into scheme, host, path, query and fragment
    #[arg(short, long)]
    pub parse: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct JwtOptions {
    /// Encoded token (reads stdin when omitted or `-`)
    pub token: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct HashOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// md5, sha256 or sha512 (all three when omitted)
    #[arg(short, long, value_parser = str::parse::<HashAlgorithm>)]
    pub algorithm: Option<HashAlgorithm>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Base(options) => {
            let input = read_input(options.input)?;
            let result = if options.decode {
                decode(&input, options.encoding)?
            } else {
                encode(require_input(&input)?, options.encoding)
            };
            options.output.emit_text(&result)
        }
        Commands::Url(options) => {
            let input = read_input(options.input)?;
            if options.parse {
                let parts = parse_url(&input)?;
                return options.output.emit(&parts, |p| {
                    let mut table = new_table();
                    table.add_row(prettytable::row!["Scheme".bold(), p.scheme]);
                    if let Some(user) = &p.username {
                        table.add_row(prettytable::row!["User".bold(), user]);
                    }
                    table.add_row(prettytable::row!["Host".bold(), p.host]);
                    if let Some(port) = p.port {
                        table.add_row(prettytable::row!["Port".bold(), port]);
                    }
                    table.add_row(prettytable::row!["Path".bold(), p.path]);
                    for (key, value) in &p.query {
                        table.add_row(prettytable::row![f!("?{key}").bold(), value]);
                    }
                    if let Some(fragment) = &p.fragment {
                        table.add_row(prettytable::row!["Fragment".bold(), fragment]);
                    }
                    table.to_string()
                });
            }
            let result = if options.decode {
                decode_url(require_input(&input)?)?
            } else {
                encode_url(require_input(&input)?)
            };
            options.output.emit_text(&result)
        }
        Commands::Html(options) => {
            let input = read_input(options.input)?;
            let input = require_input(&input)?;
            let result = if options.decode {
                decode_html(input)
            } else {
                encode_html(input)
            };
            options.output.emit_text(&result)
        }
        Commands::Jwt(options) => {
            let token = read_input(options.token)?;
            let decoded = decode_jwt(&token, chrono::Utc::now())?;
            options.output.emit(&decoded, |d| {
                let mut out = String::new();
                out.push_str(&f!("{}\n{}\n\n", "Header".bold(), d.header_pretty()));
                out.push_str(&f!("{}\n{}\n\n", "Payload".bold(), d.payload_pretty()));
                out.push_str(&f!("{} {}\n", "Signature:".bold(), d.signature));
                if let Some(alg) = &d.algorithm {
                    out.push_str(&f!("{} {alg}\n", "Algorithm:".bold()));
                }
                for (label, value) in [
                    ("Issued at:", &d.times.issued_at),
                    ("Not before:", &d.times.not_before),
                    ("Expires at:", &d.times.expires_at),
                ] {
                    if let Some(value) = value {
                        out.push_str(&f!("{} {value}\n", label.bold()));
                    }
                }
                match d.expired {
                    Some(true) => out.push_str(&"Token has expired".red().to_string()),
                    Some(false) => out.push_str(&"Token is not expired".green().to_string()),
                    None => out.push_str(&"Token has no expiry".dimmed().to_string()),
                }
                out
            })
        }
        Commands::Hash(options) => {
            let input = read_input(options.input)?;
            let input = require_input(&input)?;
            match options.algorithm {
                Some(algorithm) => options.output.emit_text(&hash_text(input, algorithm)),
                None => options.output.emit(&hash_all(input), |digests| {
                    let mut table = new_table();
                    for digest in digests {
                        table.add_row(prettytable::row![digest.algorithm.name().bold(), digest.hex]);
                    }
                    table.to_string()
                }),
            }
        }
    }
}
