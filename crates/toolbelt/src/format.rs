use crate::config::{default_config_path, load_config};
use crate::input::read_input;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use colored::Colorize;
use toolbelt_core::error::require_input;
use toolbelt_core::format::css::{beautify_css, minify_css};
use toolbelt_core::format::json::{format_json, format_json_sorted, minify_json, validate_json};
use toolbelt_core::format::markdown::markdown_to_html;
use toolbelt_core::format::sql::{format_sql, minify_sql, SqlFormatOptions};

#[derive(Debug, clap::Parser)]
#[command(name = "format")]
#[command(about = "JSON, SQL, CSS and Markdown formatters")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Pretty-print, minify or validate JSON
    #[clap(name = "json")]
    Json(JsonOptions),

    /// Format or minify SQL
    #[clap(name = "sql")]
    Sql(SqlOptions),

    /// Beautify or minify CSS
    #[clap(name = "css")]
    Css(CssOptions),

    /// Render Markdown to HTML
    #[clap(name = "markdown")]
    Markdown(MarkdownOptions),
}

#[derive(Debug, clap::Args)]
pub struct JsonOptions {
    /// JSON document (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Spaces per indent level (defaults to `json_indent` from the config)
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Remove all insignificant whitespace
    #[arg(short, long, conflicts_with_all = ["validate", "sort_keys"])]
    pub minify: bool,

    /// Only report whether the document is valid
    #[arg(long)]
    pub validate: bool,

    /// Sort object keys alphabetically
    #[arg(long)]
    pub sort_keys: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct SqlOptions {
    /// SQL statement (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Spaces used to indent clause bodies (defaults to `sql_indent` from the config)
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Leave keyword case untouched
    #[arg(long)]
    pub keep_case: bool,

    /// Collapse to a single line
    #[arg(short, long)]
    pub minify: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct CssOptions {
    /// Stylesheet (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Spaces per indent level (defaults to `css_indent` from the config)
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Strip comments and whitespace
    #[arg(short, long)]
    pub minify: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct MarkdownOptions {
    /// Markdown source (reads stdin when omitted or `-`)
    pub input: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = load_config(global.config.as_deref(), default_config_path())?;

    match app.command {
        Commands::Json(options) => {
            let input = read_input(options.input)?;
            if options.validate {
                let report = validate_json(require_input(&input)?);
                return options.output.emit(&report, |r| match (&r.error, r.line, r.column) {
                    (None, ..) => "Valid JSON".green().to_string(),
                    (Some(error), Some(line), Some(column)) => {
                        f!("{} at line {line}, column {column}: {error}", "Invalid JSON".red())
                    }
                    (Some(error), ..) => f!("{}: {error}", "Invalid JSON".red()),
                });
            }

            let indent = options.indent.unwrap_or(config.json_indent);
            let formatted = if options.minify {
                minify_json(&input)?
            } else if options.sort_keys {
                format_json_sorted(&input, indent)?
            } else {
                format_json(&input, indent)?
            };
            print_raw(&options.output, &formatted)
        }
        Commands::Sql(options) => {
            let input = read_input(options.input)?;
            let formatted = if options.minify {
                minify_sql(&input)?
            } else {
                format_sql(
                    &input,
                    SqlFormatOptions {
                        indent: options.indent.unwrap_or(config.sql_indent),
                        uppercase_keywords: !options.keep_case,
                    },
                )?
            };
            options.output.emit_text(&formatted)
        }
        Commands::Css(options) => {
            let input = read_input(options.input)?;
            let formatted = if options.minify {
                minify_css(&input)?
            } else {
                beautify_css(&input, options.indent.unwrap_or(config.css_indent))?
            };
            options.output.emit_text(&formatted)
        }
        Commands::Markdown(options) => {
            let input = read_input(options.input)?;
            options
                .output
                .emit_text(&markdown_to_html(require_input(&input)?))
        }
    }
}

/// Formatted JSON is already JSON; `--json` must not wrap it in a string.
fn print_raw(output: &OutputArgs, text: &str) -> Result<()> {
    println!("{text}");
    if output.copy {
        crate::output::copy_to_clipboard(text);
    }
    Ok(())
}
