//! HTTP client for the remote time-sync endpoint

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Default time-sync endpoint.
const DEFAULT_ENDPOINT: &str = "https://yandex.com/time/sync.json?geo=213";

#[derive(Debug, Error)]
pub enum TimeSyncError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("response is missing the '{0}' field")]
    MissingField(&'static str),
}

/// Body of a time-sync response. Both fields are optional on the wire;
/// absence is surfaced as [`TimeSyncError::MissingField`].
#[derive(Debug, Deserialize)]
struct TimeSyncResponse {
    timestamp: Option<f64>,
    timezone_id: Option<String>,
}

/// One successful probe of the time-sync endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSample {
    /// Server clock as unix seconds.
    pub timestamp: f64,
    /// Timezone identifier reported by the server.
    pub timezone_id: String,
    /// Round-trip time of the request.
    pub rtt: Duration,
}

impl TimeSample {
    /// Server clock minus the local clock, in seconds.
    pub fn offset_from(&self, local_unix_secs: f64) -> f64 {
        self.timestamp - local_unix_secs
    }

    /// Server time rendered as a UTC datetime, or None when the timestamp
    /// is outside the representable range.
    pub fn formatted_utc(&self) -> Option<String> {
        DateTime::<Utc>::from_timestamp_millis((self.timestamp * 1000.0) as i64)
            .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string())
    }
}

/// Client for one time-sync endpoint.
pub struct TimeSyncClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TimeSyncClient {
    /// Creates a new TimeSyncClient probing a custom endpoint
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("relutil")
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.to_string(),
        }
    }

    /// Fetch one sample, measuring round-trip time around the request.
    pub async fn fetch(&self) -> Result<TimeSample, TimeSyncError> {
        let started = Instant::now();

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;

        let body: TimeSyncResponse = response
            .json()
            .await
            .map_err(|e| TimeSyncError::InvalidResponse(e.to_string()))?;

        let rtt = started.elapsed();

        let timestamp = body
            .timestamp
            .ok_or(TimeSyncError::MissingField("timestamp"))?;
        let timezone_id = body
            .timezone_id
            .ok_or(TimeSyncError::MissingField("timezone_id"))?;

        Ok(TimeSample {
            timestamp,
            timezone_id,
            rtt,
        })
    }
}

impl Default for TimeSyncClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_returns_sample_for_valid_response() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/time/sync.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"timestamp": 1722772800.5, "timezone_id": "Europe/Moscow"}"#)
            .create_async()
            .await;

        let client = TimeSyncClient::new(&format!("{}/time/sync.json", server.url()));
        let sample = client.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(sample.timestamp, 1722772800.5);
        assert_eq!(sample.timezone_id, "Europe/Moscow");
    }

    #[tokio::test]
    async fn fetch_returns_missing_field_when_timestamp_is_absent() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/time/sync.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"timezone_id": "Europe/Moscow"}"#)
            .create_async()
            .await;

        let client = TimeSyncClient::new(&format!("{}/time/sync.json", server.url()));
        let result = client.fetch().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(TimeSyncError::MissingField("timestamp"))
        ));
    }

    #[tokio::test]
    async fn fetch_returns_network_error_for_server_failure() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/time/sync.json")
            .with_status(500)
            .create_async()
            .await;

        let client = TimeSyncClient::new(&format!("{}/time/sync.json", server.url()));
        let result = client.fetch().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(TimeSyncError::Network(_))));
    }

    #[tokio::test]
    async fn fetch_returns_invalid_response_for_unparseable_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/time/sync.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let client = TimeSyncClient::new(&format!("{}/time/sync.json", server.url()));
        let result = client.fetch().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(TimeSyncError::InvalidResponse(_))));
    }

    #[test]
    fn offset_from_is_server_minus_local() {
        let sample = TimeSample {
            timestamp: 100.5,
            timezone_id: "UTC".to_string(),
            rtt: Duration::from_millis(20),
        };

        assert_eq!(sample.offset_from(100.0), 0.5);
        assert_eq!(sample.offset_from(101.0), -0.5);
    }

    #[test]
    fn formatted_utc_renders_the_server_timestamp() {
        let sample = TimeSample {
            timestamp: 0.0,
            timezone_id: "UTC".to_string(),
            rtt: Duration::from_millis(20),
        };

        assert_eq!(
            sample.formatted_utc().unwrap(),
            "1970-01-01 00:00:00 UTC".to_string()
        );
    }
}
