use super::open_store;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use colored::Colorize;
use std::time::Duration;
use toolbelt_core::track::world_clock::{city_time, City, CityTime, WorldClock, Zone, KNOWN_CITIES};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Current time in every saved city
    #[clap(name = "show")]
    Show {
        /// Keep refreshing every second until Ctrl-C
        #[arg(short, long)]
        watch: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Add a city
    #[clap(name = "add")]
    Add {
        name: String,

        /// IANA zone such as Europe/Lisbon, or a fixed UTC offset such as +05:30
        /// (required for cities not in `known`)
        #[arg(long, alias = "offset", allow_hyphen_values = true)]
        zone: Option<String>,
    },

    /// Remove a city
    #[clap(name = "rm")]
    Remove { name: String },

    /// Cities that can be added by name alone
    #[clap(name = "known")]
    Known,
}

fn render(times: &[CityTime]) -> String {
    if times.is_empty() {
        return "No cities yet. Try `track clock add Tokyo`".dimmed().to_string();
    }
    let mut table = new_table();
    for t in times {
        let day = match t.day_delta {
            0 => String::new(),
            d if d > 0 => f!("+{d}d"),
            d => f!("{d}d"),
        };
        table.add_row(prettytable::row![t.name.bold(), t.time, t.date, t.offset.dimmed(), day]);
    }
    table.to_string()
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let (store, _) = open_store(&global)?;
    let mut clock = WorldClock::open(store)?;

    match cmd {
        Commands::Show { watch, output } => {
            if !watch {
                let times = clock.times(chrono::Utc::now())?;
                return output.emit(&times, |t| render(t));
            }
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let times = clock.times(chrono::Utc::now())?;
                        println!("\x1b[2J\x1b[H{}", render(&times));
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
        Commands::Add { name, zone } => {
            let city = clock.add(&name, zone.as_deref())?;
            let now = city_time(&city, chrono::Utc::now())?;
            println!("{} {} ({})", "Added".green(), city.name, now.offset);
        }
        Commands::Remove { name } => {
            clock.remove(&name)?;
            println!("{} {}", "Removed".green(), name.trim());
        }
        Commands::Known => {
            let now = chrono::Utc::now();
            let mut table = new_table();
            for (name, zone) in KNOWN_CITIES {
                let city = City {
                    name: name.to_string(),
                    zone: Zone::Named(zone.to_string()),
                };
                let time = city_time(&city, now)?;
                table.add_row(prettytable::row![name, zone.dimmed(), time.offset]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
