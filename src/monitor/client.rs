use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::constants::{DATA_PATH, KILL_PATH};
use crate::models::{KillRequest, KillResponse, TelemetrySnapshot};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for the telemetry backend.
#[derive(Clone)]
pub struct MonitorClient {
    base_url: String,
    client: reqwest::Client,
}

impl MonitorClient {
    /// Create a client for the given base URL (without trailing slash).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /data`. Non-success statuses and undecodable bodies are errors.
    pub async fn fetch_snapshot(&self) -> Result<TelemetrySnapshot, ClientError> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, DATA_PATH))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `POST /kill_process`. A non-2xx answer whose body still decodes is
    /// returned as the backend's answer.
    pub async fn kill_process(&self, pid: u32) -> Result<KillResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, KILL_PATH))
            .json(&KillRequest { pid })
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        match serde_json::from_slice::<KillResponse>(&body) {
            Ok(answer) => {
                if !status.is_success() {
                    debug!(status = status.as_u16(), "kill_process answered with error status");
                }
                Ok(answer)
            }
            Err(e) if status.is_success() => Err(ClientError::Decode(e)),
            Err(_) => Err(ClientError::Status(status.as_u16())),
        }
    }
}
