use super::open_store;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use chrono::NaiveDate;
use colored::Colorize;
use toolbelt_core::calc::age::parse_date;
use toolbelt_core::track::habits::{HabitStatus, HabitTracker};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Start tracking a habit
    #[clap(name = "add")]
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Today's status, current and best streaks
    #[clap(name = "list")]
    List(OutputArgs),

    /// Flip a habit between done and not done
    #[clap(name = "check")]
    Check {
        id: u64,

        /// Day to flip as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Stop tracking a habit
    #[clap(name = "rm")]
    Remove { id: u64 },
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn render(statuses: &[HabitStatus]) -> String {
    if statuses.is_empty() {
        return "No habits yet".dimmed().to_string();
    }
    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold(),
        "Habit".bold(),
        "Today".bold(),
        "Streak".bold(),
        "Best".bold()
    ]);
    for status in statuses {
        let today = if status.done_today {
            "done".green()
        } else {
            "-".dimmed()
        };
        table.add_row(prettytable::row![
            status.id,
            status.name,
            today,
            status.streak,
            status.best_streak
        ]);
    }
    table.to_string()
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let (store, _) = open_store(&global)?;
    let mut tracker = HabitTracker::open(store)?;

    match cmd {
        Commands::Add { name } => {
            let habit = tracker.add(&name.join(" "))?;
            println!("{} habit #{} {}", "Tracking".green(), habit.id, habit.name);
        }
        Commands::List(output) => {
            output.emit(&tracker.status(today()), |s| render(s))?;
        }
        Commands::Check { id, date } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today(),
            };
            let done = tracker.toggle(id, date)?;
            let streak = tracker.get(id).map(|h| h.streak(today())).unwrap_or_default();
            let state = if done { "done".green() } else { "not done".yellow() };
            println!("#{id} {state} on {date}, streak {}", streak.to_string().bold());
        }
        Commands::Remove { id } => {
            tracker.delete(id)?;
            println!("{} habit #{id}", "Removed".green());
        }
    }
    Ok(())
}
