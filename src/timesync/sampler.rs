//! Sequential probe series with averaged offset and round-trip time

use std::io::{self, Write};
use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use crate::timesync::client::TimeSyncClient;

/// Default number of probes in a series.
pub const DEFAULT_REQUESTS: usize = 5;

/// Delay between consecutive probes.
const PROBE_DELAY: Duration = Duration::from_secs(1);

/// Aggregate of a probe series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReport {
    /// Number of successful probes.
    pub samples: usize,
    /// Number of failed probes.
    pub failures: usize,
    /// Mean clock offset in seconds, when at least one probe succeeded.
    pub mean_offset: Option<f64>,
    /// Mean round-trip time in seconds, when at least one probe succeeded.
    pub mean_rtt: Option<f64>,
}

/// Local clock as unix seconds.
fn unix_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Run `requests` sequential probes, one second apart, writing per-probe
/// results and the series summary to `out`.
///
/// Failed probes are logged and skipped; a series with zero successes is
/// reported, not an error.
pub async fn run_series<W: Write>(
    client: &TimeSyncClient,
    requests: usize,
    out: &mut W,
) -> io::Result<SeriesReport> {
    let mut offsets = Vec::with_capacity(requests);
    let mut rtts = Vec::with_capacity(requests);
    let mut failures = 0usize;

    for probe in 0..requests {
        if probe > 0 {
            tokio::time::sleep(PROBE_DELAY).await;
        }

        writeln!(out, "Probe #{}:", probe + 1)?;
        match client.fetch().await {
            Ok(sample) => {
                // show the server's own view of the clock once per series
                if offsets.is_empty() {
                    if let Some(formatted) = sample.formatted_utc() {
                        writeln!(out, "  server time: {} ({})", formatted, sample.timezone_id)?;
                    }
                }

                let offset = sample.offset_from(unix_now());
                writeln!(
                    out,
                    "  clock offset: {:+.4} s, rtt: {:.4} s",
                    offset,
                    sample.rtt.as_secs_f64()
                )?;

                offsets.push(offset);
                rtts.push(sample.rtt.as_secs_f64());
            }
            Err(err) => {
                warn!("time probe failed: {err}");
                writeln!(out, "  failed: {err}")?;
                failures += 1;
            }
        }
    }

    let report = SeriesReport {
        samples: offsets.len(),
        failures,
        mean_offset: mean(&offsets),
        mean_rtt: mean(&rtts),
    };

    writeln!(out)?;
    match (report.mean_offset, report.mean_rtt) {
        (Some(offset), Some(rtt)) => {
            writeln!(
                out,
                "Mean clock offset over {} probes: {:+.4} s",
                report.samples, offset
            )?;
            writeln!(out, "Mean round-trip time: {rtt:.4} s")?;
        }
        _ => {
            writeln!(out, "No successful probes, nothing to average.")?;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn mean_of_empty_slice_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_averages_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[tokio::test]
    async fn run_series_reports_successful_probe() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/time/sync.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"timestamp": 1722772800.0, "timezone_id": "Europe/Moscow"}"#)
            .create_async()
            .await;

        let client = TimeSyncClient::new(&format!("{}/time/sync.json", server.url()));
        let mut out = Vec::new();
        let report = run_series(&client, 1, &mut out).await.unwrap();

        mock.assert_async().await;
        assert_eq!(report.samples, 1);
        assert_eq!(report.failures, 0);
        assert!(report.mean_offset.is_some());
        assert!(report.mean_rtt.is_some());

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Probe #1:"));
        assert!(output.contains("Europe/Moscow"));
        assert!(output.contains("Mean clock offset over 1 probes:"));
    }

    #[tokio::test]
    async fn run_series_counts_failures_and_averages_nothing() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/time/sync.json")
            .with_status(500)
            .create_async()
            .await;

        let client = TimeSyncClient::new(&format!("{}/time/sync.json", server.url()));
        let mut out = Vec::new();
        let report = run_series(&client, 1, &mut out).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            report,
            SeriesReport {
                samples: 0,
                failures: 1,
                mean_offset: None,
                mean_rtt: None,
            }
        );

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("No successful probes"));
    }
}
