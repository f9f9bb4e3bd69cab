use crate::http::HttpClient;
use crate::prelude::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use toolbelt_core::net::{ping_stats, speed_report, SpeedReport, DOWNLOAD_TARGETS, PING_TARGET};

fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// Takes `pings` latency samples, then downloads every target in turn.
///
/// Bytes are counted from what actually arrived, not from the advertised size.
pub async fn measure(
    client: &impl HttpClient,
    pings: usize,
    spinner: Option<&ProgressBar>,
) -> Result<SpeedReport> {
    let mut samples = Vec::with_capacity(pings);
    for i in 0..pings {
        set_spinner_msg(spinner, f!("Measuring latency ({}/{pings})", i + 1));
        let started = Instant::now();
        client.get_bytes(PING_TARGET).await?;
        samples.push(started.elapsed());
    }
    let ping = if samples.is_empty() {
        None
    } else {
        Some(ping_stats(&samples)?)
    };

    let mut downloads: Vec<(u64, Duration)> = Vec::with_capacity(DOWNLOAD_TARGETS.len());
    for (url, size) in DOWNLOAD_TARGETS {
        set_spinner_msg(spinner, f!("Downloading {} MB", size / 1_000_000));
        let started = Instant::now();
        let body = client.get_bytes(url).await?;
        let elapsed = started.elapsed();
        log::debug!("{} bytes in {elapsed:?}", body.len());
        downloads.push((body.len() as u64, elapsed));
    }

    Ok(speed_report(&downloads, ping)?)
}

pub async fn run(client: &impl HttpClient, pings: usize) -> Result<SpeedReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = measure(client, pings, Some(&spinner)).await;
    spinner.finish_and_clear();
    report
}

pub fn render(report: &SpeedReport) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Download".bold(),
        f!("{} Mbps", report.download_mbps).green()
    ]);
    if let Some(ping) = &report.ping {
        table.add_row(prettytable::row!["Ping".bold(), f!("{} ms", ping.avg_ms)]);
        table.add_row(prettytable::row!["Jitter".bold(), f!("{} ms", ping.jitter_ms)]);
        table.add_row(prettytable::row![
            "Range".bold(),
            f!("{} - {} ms", ping.min_ms, ping.max_ms)
        ]);
    }
    table.add_row(prettytable::row![
        "Transferred".bold(),
        f!("{:.1} MB in {} s", report.bytes as f64 / 1_000_000.0, report.seconds)
    ]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeClient;

    fn client() -> FakeClient {
        DOWNLOAD_TARGETS
            .iter()
            .fold(FakeClient::new().with(PING_TARGET, Vec::new()), |c, (url, _)| {
                c.with(url, vec![0u8; 4096])
            })
    }

    #[tokio::test]
    async fn test_measure_counts_received_bytes() {
        let client = client();
        let report = measure(&client, 3, None).await.unwrap();
        assert_eq!(report.bytes, 3 * 4096);
        assert_eq!(report.ping.as_ref().map(|p| p.samples), Some(3));
        assert_eq!(client.calls.borrow().len(), 6);
    }

    #[tokio::test]
    async fn test_no_pings() {
        let report = measure(&client(), 0, None).await.unwrap();
        assert!(report.ping.is_none());
    }

    #[tokio::test]
    async fn test_download_failure_stops() {
        let client = FakeClient::new()
            .with(PING_TARGET, Vec::new())
            .failing(DOWNLOAD_TARGETS[0].0, "timed out");
        let err = measure(&client, 1, None).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert_eq!(client.calls.borrow().len(), 2);
    }
}
