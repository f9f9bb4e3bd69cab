use super::open_store;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use chrono::NaiveDate;
use colored::Colorize;
use toolbelt_core::calc::age::parse_date;
use toolbelt_core::track::water::{WaterLog, WaterSummary};

const BAR_WIDTH: usize = 30;

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Log a drink
    #[clap(name = "log")]
    Log {
        /// Amount in milliliters
        #[arg(default_value = "250")]
        ml: u32,

        #[clap(flatten)]
        day: DayArgs,
    },

    /// Progress towards the daily goal
    #[clap(name = "status")]
    Status {
        /// Daily goal in milliliters (overrides the configured goal)
        #[arg(long)]
        goal: Option<u32>,

        #[clap(flatten)]
        day: DayArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Remove the latest drink of the day
    #[clap(name = "undo")]
    Undo(DayArgs),

    /// Forget every drink of the day
    #[clap(name = "reset")]
    Reset(DayArgs),
}

#[derive(Debug, clap::Args)]
pub struct DayArgs {
    /// Day as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

impl DayArgs {
    fn resolve(&self) -> Result<NaiveDate> {
        match &self.date {
            Some(raw) => Ok(parse_date(raw)?),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    f!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn render(summary: &WaterSummary) -> String {
    let bar = progress_bar(summary.percent);
    let bar = if summary.remaining_ml == 0 {
        bar.green()
    } else {
        bar.cyan()
    };
    let mut out = f!(
        "{}  {bar} {}%\n{} / {} ml in {} glass(es)",
        summary.date,
        summary.percent,
        summary.total_ml.to_string().bold(),
        summary.goal_ml,
        summary.glasses
    );
    if summary.remaining_ml == 0 {
        out.push_str(&f!("\n{}", "Goal reached".green()));
    } else {
        out.push_str(&f!("\n{} ml to go", summary.remaining_ml));
    }
    out
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let (store, settings) = open_store(&global)?;
    let mut log = WaterLog::open(store)?;
    let goal = settings.config.water_goal_ml;

    match cmd {
        Commands::Log { ml, day } => {
            let date = day.resolve()?;
            log.log(date, ml, chrono::Utc::now())?;
            println!("{}", render(&log.summary(date, goal)?));
        }
        Commands::Status {
            goal: override_goal,
            day,
            output,
        } => {
            let summary = log.summary(day.resolve()?, override_goal.unwrap_or(goal))?;
            output.emit(&summary, render)?;
        }
        Commands::Undo(day) => match log.undo(day.resolve()?)? {
            Some(ml) => println!("{} {ml} ml", "Removed".green()),
            None => println!("{}", "Nothing logged for that day".dimmed()),
        },
        Commands::Reset(day) => {
            let removed = log.reset_day(day.resolve()?)?;
            println!("Removed {removed} entr{}", if removed == 1 { "y" } else { "ies" });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), f!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100.0), f!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50.0).matches('#').count(), 15);
    }
}
