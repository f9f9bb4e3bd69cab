use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use toolbelt_core::track::stopwatch::{format_duration, Stopwatch, StopwatchState};

/// One redraw per displayed centisecond.
const TICK: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Toggle,
    Lap,
    Reset,
    Quit,
}

fn parse_key(line: &str) -> Option<Key> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "p" | "start" | "pause" => Some(Key::Toggle),
        "l" | "lap" => Some(Key::Lap),
        "r" | "reset" => Some(Key::Reset),
        "q" | "quit" | "exit" => Some(Key::Quit),
        _ => None,
    }
}

/// Applies one key press. Returns `false` when the session should end.
fn apply(watch: &mut Stopwatch, key: Key, now: Duration) -> Result<bool> {
    match key {
        Key::Toggle => match watch.state() {
            StopwatchState::Running => watch.pause(now)?,
            StopwatchState::Idle | StopwatchState::Paused => watch.start(now)?,
        },
        Key::Lap => {
            let lap = watch.lap(now)?;
            println!(
                "\r{} {:>3}  {}  {}",
                "Lap".bold(),
                lap.number,
                format_duration(lap.split),
                format_duration(lap.total).dimmed()
            );
        }
        Key::Reset => watch.reset(),
        Key::Quit => return Ok(false),
    }
    Ok(true)
}

fn redraw(watch: &Stopwatch, now: Duration) {
    let state = match watch.state() {
        StopwatchState::Running => "running".green(),
        StopwatchState::Paused => "paused".yellow(),
        StopwatchState::Idle => "idle".dimmed(),
    };
    let mut out = std::io::stdout();
    let _ = write!(out, "\r{}  {state}   ", format_duration(watch.elapsed(now)).bold());
    let _ = out.flush();
}

pub async fn run() -> Result<()> {
    println!(
        "{}",
        "Enter: start/pause   l: lap   r: reset   q: quit".dimmed()
    );

    let origin = Instant::now();
    let mut watch = Stopwatch::new();
    watch.start(origin.elapsed())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK);
    loop {
        tokio::select! {
            _ = ticker.tick() => redraw(&watch, origin.elapsed()),
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let Some(key) = parse_key(&line) else {
                    log::warn!("Unknown key '{}'", line.trim());
                    continue;
                };
                match apply(&mut watch, key, origin.elapsed()) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("{} {e}", "warning:".yellow().bold()),
                }
            }
        }
    }

    let now = origin.elapsed();
    println!("\r{} {}", "Total".bold(), format_duration(watch.elapsed(now)));
    Ok(())
}
