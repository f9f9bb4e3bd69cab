use crate::config::Settings;
use crate::prelude::*;
use crate::store::FileStore;

pub mod clock;
pub mod habits;
pub mod notes;
pub mod quotes;
pub mod stopwatch;
pub mod todo;
pub mod water;

/// Trackers that keep their state in the data directory
#[derive(Debug, clap::Parser)]
#[command(name = "track")]
#[command(about = "Todo list, sticky notes, habits, water intake, quotes, world clock and stopwatch")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Todo list
    #[clap(subcommand)]
    Todo(todo::Commands),

    /// Sticky notes
    #[clap(subcommand)]
    Notes(notes::Commands),

    /// Daily habits and streaks
    #[clap(subcommand)]
    Habits(habits::Commands),

    /// Daily water intake
    #[clap(subcommand)]
    Water(water::Commands),

    /// Favorite quotes
    #[clap(subcommand)]
    Quotes(quotes::Commands),

    /// Current time in saved cities
    #[clap(subcommand)]
    Clock(clock::Commands),

    /// Interactive stopwatch with laps
    #[clap(name = "stopwatch")]
    Stopwatch,
}

/// Opens the file store for the configured data directory.
pub(crate) fn open_store(global: &crate::Global) -> Result<(FileStore, Settings)> {
    let settings = Settings::load(global)?;
    log::debug!("tracker data in {}", settings.data_dir.display());
    Ok((FileStore::new(settings.data_dir.clone()), settings))
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Todo(cmd) => todo::run(cmd, global).await,
        Commands::Notes(cmd) => notes::run(cmd, global).await,
        Commands::Habits(cmd) => habits::run(cmd, global).await,
        Commands::Water(cmd) => water::run(cmd, global).await,
        Commands::Quotes(cmd) => quotes::run(cmd, global).await,
        Commands::Clock(cmd) => clock::run(cmd, global).await,
        Commands::Stopwatch => stopwatch::run().await,
    }
}
