use super::open_store;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use colored::{Color, Colorize};
use toolbelt_core::track::notes::{Note, NoteBoard, COLORS};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Pin a new note
    #[clap(name = "add")]
    Add(NoteText),

    /// Show every note, most recently touched first
    #[clap(name = "list")]
    List(OutputArgs),

    /// Rewrite a note and optionally recolor it
    #[clap(name = "edit")]
    Edit {
        id: u64,
        #[clap(flatten)]
        note: NoteText,
    },

    /// Remove a note
    #[clap(name = "rm")]
    Remove { id: u64 },
}

#[derive(Debug, clap::Args)]
pub struct NoteText {
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// yellow, pink, blue, green or purple
    #[arg(short, long)]
    pub color: Option<String>,
}

fn paint(color: &str) -> Color {
    match color {
        "pink" => Color::Magenta,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "purple" => Color::BrightMagenta,
        _ => Color::Yellow,
    }
}

fn render(notes: &[&Note]) -> String {
    if notes.is_empty() {
        return f!("No notes. Colors: {}", COLORS.join(", ")).dimmed().to_string();
    }
    notes
        .iter()
        .map(|n| {
            f!(
                "{} {}\n  {}",
                f!("#{}", n.id).color(paint(&n.color)).bold(),
                n.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                n.text.replace('\n', "\n  ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let (store, _) = open_store(&global)?;
    let mut board = NoteBoard::open(store)?;
    let now = chrono::Utc::now();

    match cmd {
        Commands::Add(note) => {
            let added = board.add(&note.text.join(" "), note.color.as_deref(), now)?;
            println!("{} note #{} ({})", "Pinned".green(), added.id, added.color);
        }
        Commands::List(output) => {
            let notes = board.list();
            output.emit(&notes, |n| render(n))?;
        }
        Commands::Edit { id, note } => {
            board.edit(id, &note.text.join(" "), note.color.as_deref(), now)?;
            println!("{} note #{id}", "Updated".green());
        }
        Commands::Remove { id } => {
            board.delete(id)?;
            println!("{} note #{id}", "Removed".green());
        }
    }
    Ok(())
}
