use crate::input::read_input;
use crate::output::OutputArgs;
use crate::prelude::*;
use colored::Colorize;
use std::path::PathBuf;
use toolbelt_core::error::require_input;
use toolbelt_core::text::case::{convert_all, convert_case, CaseStyle};
use toolbelt_core::text::lines::{
    dedupe_lines, diff_lines, remove_extra_whitespace, reverse_text, sort_lines, word_frequency,
    DiffLine, SortOptions,
};
use toolbelt_core::text::slug::{slugify, SlugOptions};
use toolbelt_core::text::stats::text_stats;

#[derive(Debug, clap::Parser)]
#[command(name = "text")]
#[command(about = "Case conversion, statistics and line utilities")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Convert text between cases (all styles unless --style is given)
    #[clap(name = "case")]
    Case(CaseOptions),

    /// Count characters, words, sentences and reading time
    #[clap(name = "stats")]
    Stats(PlainOptions),

    /// Reverse the characters of the input
    #[clap(name = "reverse")]
    Reverse(PlainOptions),

    /// Remove duplicate lines, keeping the first occurrence
    #[clap(name = "dedupe")]
    Dedupe(DedupeOptions),

    /// Sort lines
    #[clap(name = "sort")]
    Sort(SortArgs),

    /// Collapse runs of spaces and trim every line
    #[clap(name = "squeeze")]
    Squeeze(PlainOptions),

    /// URL-friendly slug
    #[clap(name = "slug")]
    Slug(SlugArgs),

    /// Most frequent words
    #[clap(name = "words")]
    Words(WordsOptions),

    /// Line diff between two files
    #[clap(name = "diff")]
    Diff(DiffOptions),
}

#[derive(Debug, clap::Args)]
pub struct PlainOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct CaseOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// upper, lower, title, sentence, camel, pascal, snake, kebab, constant or alternating
    #[arg(short, long, value_parser = str::parse::<CaseStyle>)]
    pub style: Option<CaseStyle>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct DedupeOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Treat lines differing only in case as duplicates
    #[arg(short, long)]
    pub ignore_case: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct SortArgs {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Largest first
    #[arg(short, long)]
    pub descending: bool,

    /// Compare without regard to case
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Compare lines as numbers where they parse
    #[arg(short, long)]
    pub numeric: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct SlugArgs {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// Separator between words
    #[arg(long, default_value = "-")]
    pub separator: char,

    /// Keep the original letter case
    #[arg(long)]
    pub keep_case: bool,

    /// Maximum slug length
    #[arg(long)]
    pub max_length: Option<usize>,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct WordsOptions {
    /// Input text (reads stdin when omitted or `-`)
    pub input: Option<String>,

    /// How many words to show
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, clap::Args)]
pub struct DiffOptions {
    /// The original file
    pub before: PathBuf,

    /// The changed file
    pub after: PathBuf,

    /// Only print the counts
    #[arg(long)]
    pub summary: bool,

    #[clap(flatten)]
    pub output: OutputArgs,
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Case(options) => {
            let input = read_input(options.input)?;
            require_input(&input)?;
            match options.style {
                Some(style) => options.output.emit_text(&convert_case(&input, style)),
                None => {
                    let all: Vec<(&str, String)> = convert_all(&input)
                        .into_iter()
                        .map(|(style, text)| (style.name(), text))
                        .collect();
                    options.output.emit(&all, |all| {
                        let mut table = new_table();
                        for (name, text) in all {
                            table.add_row(prettytable::row![name.bold(), text]);
                        }
                        table.to_string()
                    })
                }
            }
        }
        Commands::Stats(options) => {
            let input = read_input(options.input)?;
            let stats = text_stats(&input);
            options.output.emit(&stats, |s| {
                let mut table = new_table();
                table.add_row(prettytable::row!["Characters", s.characters]);
                table.add_row(prettytable::row!["Characters (no spaces)", s.characters_no_spaces]);
                table.add_row(prettytable::row!["Words", s.words]);
                table.add_row(prettytable::row!["Sentences", s.sentences]);
                table.add_row(prettytable::row!["Paragraphs", s.paragraphs]);
                table.add_row(prettytable::row!["Lines", s.lines]);
                table.add_row(prettytable::row!["Reading time", f!("{} min", s.reading_minutes)]);
                table.to_string()
            })
        }
        Commands::Reverse(options) => {
            let input = read_input(options.input)?;
            options.output.emit_text(&reverse_text(require_input(&input)?))
        }
        Commands::Dedupe(options) => {
            let input = read_input(options.input)?;
            options
                .output
                .emit_text(&dedupe_lines(require_input(&input)?, options.ignore_case))
        }
        Commands::Sort(args) => {
            let input = read_input(args.input)?;
            let sort = SortOptions {
                descending: args.descending,
                ignore_case: args.ignore_case,
                numeric: args.numeric,
            };
            args.output.emit_text(&sort_lines(require_input(&input)?, sort))
        }
        Commands::Squeeze(options) => {
            let input = read_input(options.input)?;
            options
                .output
                .emit_text(&remove_extra_whitespace(require_input(&input)?))
        }
        Commands::Slug(args) => {
            let input = read_input(args.input)?;
            let slug = slugify(
                require_input(&input)?,
                &SlugOptions {
                    separator: args.separator,
                    lowercase: !args.keep_case,
                    max_length: args.max_length,
                },
            );
            args.output.emit_text(&slug)
        }
        Commands::Words(options) => {
            let input = read_input(options.input)?;
            let frequency = word_frequency(require_input(&input)?, options.limit);
            options.output.emit(&frequency, |words| {
                let mut table = new_table();
                for (word, count) in words {
                    table.add_row(prettytable::row![word, count]);
                }
                table.to_string()
            })
        }
        Commands::Diff(options) => {
            let before = std::fs::read_to_string(&options.before)
                .with_context(|| f!("Failed to read {}", options.before.display()))?;
            let after = std::fs::read_to_string(&options.after)
                .with_context(|| f!("Failed to read {}", options.after.display()))?;
            let diff = diff_lines(&before, &after);
            let summary_only = options.summary;
            options.output.emit(&diff, |d| {
                let mut out = String::new();
                if !summary_only {
                    for line in &d.lines {
                        let rendered = match line {
                            DiffLine::Same(l) => f!("  {l}"),
                            DiffLine::Added(l) => f!("+ {l}").green().to_string(),
                            DiffLine::Removed(l) => f!("- {l}").red().to_string(),
                        };
                        out.push_str(&rendered);
                        out.push('\n');
                    }
                }
                out.push_str(&f!(
                    "{} added, {} removed, {} unchanged",
                    d.added, d.removed, d.unchanged
                ));
                out
            })
        }
    }
}
