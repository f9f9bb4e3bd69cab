use super::open_store;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use colored::Colorize;
use rand::seq::SliceRandom;
use toolbelt_core::track::quotes::{Quote, QuoteBook, BUILT_IN};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Show a random quote from the built-in set and your favorites
    #[clap(name = "random")]
    Random(OutputArgs),

    /// Save a favorite quote
    #[clap(name = "add")]
    Add {
        text: String,

        #[arg(short, long, default_value = "")]
        author: String,
    },

    /// List saved favorites
    #[clap(name = "list")]
    List(OutputArgs),

    /// Remove a favorite by its position in the list
    #[clap(name = "rm")]
    Remove {
        /// 1-based position as shown by `list`
        position: usize,
    },
}

/// Built-in quotes followed by saved favorites not already among them.
fn pool(saved: &[Quote]) -> Vec<Quote> {
    let mut quotes: Vec<Quote> = BUILT_IN.iter().map(|(t, a)| Quote::new(*t, *a)).collect();
    let extra: Vec<Quote> = saved.iter().filter(|q| !quotes.contains(q)).cloned().collect();
    quotes.extend(extra);
    quotes
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let (store, _) = open_store(&global)?;
    let mut book = QuoteBook::open(store)?;

    match cmd {
        Commands::Random(output) => {
            let quotes = pool(book.quotes());
            let quote = quotes
                .choose(&mut rand::thread_rng())
                .ok_or_eyre("No quotes available")?;
            output.emit(quote, |q| {
                let saved = if book.contains(q) { " ★" } else { "" };
                f!("{}{saved}", q.to_string().italic())
            })?;
        }
        Commands::Add { text, author } => {
            if book.add(&text, &author)? {
                println!("{}", "Saved to favorites".green());
            } else {
                println!("{}", "Already in favorites".yellow());
            }
        }
        Commands::List(output) => {
            output.emit(&book.quotes(), |quotes| {
                if quotes.is_empty() {
                    return "No favorites yet".dimmed().to_string();
                }
                quotes
                    .iter()
                    .enumerate()
                    .map(|(i, q)| f!("{:>3}. {q}", i + 1))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Commands::Remove { position } => {
            let removed = match position.checked_sub(1) {
                Some(index) => book.remove_at(index)?,
                None => None,
            };
            match removed {
                Some(quote) => println!("{} {quote}", "Removed".green()),
                None => return Err(eyre!("No favorite at position {position}")),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_skips_saved_built_ins() {
        let (text, author) = BUILT_IN[0];
        let saved = vec![Quote::new(text, author), Quote::new("Ship it.", "Anon")];
        let quotes = pool(&saved);
        assert_eq!(quotes.len(), BUILT_IN.len() + 1);
        assert_eq!(quotes.last().map(|q| q.author.as_str()), Some("Anon"));
    }
}
