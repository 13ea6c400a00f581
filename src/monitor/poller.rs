//! Background polling task.
//!
//! Fetches one snapshot per tick and hands the result to the UI loop. The
//! fetch is awaited before the next tick, so at most one request is in
//! flight; a slow fetch delays the schedule rather than bursting.

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::models::TelemetrySnapshot;

use super::client::{ClientError, MonitorClient};

/// Result of one poll round, tagged with its tick number.
#[derive(Debug)]
pub struct PollEvent {
    pub tick: u64,
    pub received_at: DateTime<Local>,
    pub result: Result<TelemetrySnapshot, ClientError>,
}

/// Spawn the poller. The first round runs immediately; the task ends once
/// the receiving side is dropped.
pub fn spawn_poller(
    client: MonitorClient,
    period: Duration,
    tx: mpsc::UnboundedSender<PollEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            interval.tick().await;
            tick += 1;

            let result = client.fetch_snapshot().await;
            match &result {
                Ok(snap) => debug!(tick, status = %snap.status, cpu = snap.cpu, "poll ok"),
                Err(e) => warn!(tick, error = %e, "poll failed"),
            }

            let event = PollEvent {
                tick,
                received_at: Local::now(),
                result,
            };
            if tx.send(event).is_err() {
                debug!("poll receiver dropped, stopping poller");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn first_round_runs_immediately_and_ticks_increase() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status":"WAITING","cpu":0,"memory":0,"reason":"warming up"}"#);
            })
            .await;

        let client = MonitorClient::new(&server.base_url(), Duration::from_millis(500));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_poller(client, Duration::from_millis(50), tx);

        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let second = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.tick, 1);
        assert_eq!(second.tick, 2);
        assert!(first.result.is_ok());

        drop(rx);
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn failures_are_reported_not_fatal() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(500);
            })
            .await;

        let client = MonitorClient::new(&server.base_url(), Duration::from_millis(500));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = spawn_poller(client, Duration::from_millis(20), tx);

        for expected in 1..=3 {
            let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(event.tick, expected);
            assert!(matches!(event.result, Err(ClientError::Status(500))));
        }
    }
}
