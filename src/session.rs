//! Monitoring session: the single owner of all client-side state.
//!
//! Every poll result and every remediation answer is applied here, on the UI
//! loop, one at a time. The renderer only reads from it.

use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::alerts::{AlarmCoordinator, AlertDecision};
use crate::constants::FETCH_ERROR_REASON;
use crate::models::{KillResponse, Status, TelemetrySnapshot};
use crate::monitor::{ClientError, PollEvent};
use crate::remediation::{ClosedProcess, RemediationController, RemediationError};
use crate::telemetry::{classify, Baseline, Classification, TimeSeriesWindow, TrendTracker};

const TIME_LABEL_FORMAT: &str = "%H:%M:%S";

/// Plain-data view of the latest poll, drawn by the dashboard.
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub status: Status,
    pub reason: String,
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub process_name: Option<String>,
    pub pid: Option<i64>,
    pub threads: Option<u32>,
    /// Snapshot timestamp, or local time when the backend sent none
    pub last_updated: Option<String>,
    /// Local time of the last successful poll
    pub update_time: Option<String>,
    /// Formatted load ratio against the baseline
    pub ratio: Option<String>,
    /// Whether any poll has been applied yet
    pub has_data: bool,
    /// Whether the latest applied poll got an answer from the backend
    pub backend_reachable: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            status: Status::Waiting,
            reason: String::new(),
            cpu: None,
            memory: None,
            process_name: None,
            pid: None,
            threads: None,
            last_updated: None,
            update_time: None,
            ratio: None,
            has_data: false,
            backend_reachable: false,
        }
    }
}

impl DisplayState {
    pub fn classification(&self) -> Classification {
        classify(&self.status)
    }
}

/// Running counters, exported through the metrics endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub polls: u64,
    pub fetch_errors: u64,
    pub stale_results: u64,
    pub alerts_raised: u64,
    pub alerts_suppressed: u64,
    pub remediation_closed: u64,
    pub remediation_rejected: u64,
    pub remediation_failed: u64,
}

/// What applying a poll event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The result was newer than the last applied one and is now displayed.
    Applied { alert: Option<AlertDecision> },
    /// An older or duplicate tick; ignored.
    Stale,
}

pub struct Session {
    pub display: DisplayState,
    pub window: TimeSeriesWindow,
    pub baseline: Baseline,
    pub trend: TrendTracker,
    pub alarm: AlarmCoordinator,
    pub remediation: RemediationController,
    pub stats: SessionStats,
    last_applied_tick: Option<u64>,
}

impl Session {
    pub fn new(window_capacity: usize) -> Self {
        Self {
            display: DisplayState::default(),
            window: TimeSeriesWindow::new(window_capacity),
            baseline: Baseline::default(),
            trend: TrendTracker::default(),
            alarm: AlarmCoordinator::default(),
            remediation: RemediationController::default(),
            stats: SessionStats::default(),
            last_applied_tick: None,
        }
    }

    /// Apply one poll result observed at `now`.
    pub fn apply(&mut self, event: PollEvent, now: Instant) -> TickOutcome {
        if self.last_applied_tick.is_some_and(|last| event.tick <= last) {
            self.stats.stale_results += 1;
            debug!(tick = event.tick, "discarding stale poll result");
            return TickOutcome::Stale;
        }
        self.last_applied_tick = Some(event.tick);
        self.stats.polls += 1;
        self.display.has_data = true;
        self.display.backend_reachable = event.result.is_ok();

        match event.result {
            Ok(snapshot) => {
                let alert = self.apply_snapshot(snapshot, event.received_at, now);
                TickOutcome::Applied { alert }
            }
            Err(_) => {
                // Window, baseline and trend history stay as they were.
                self.stats.fetch_errors += 1;
                self.display.status = Status::Error;
                self.display.reason = FETCH_ERROR_REASON.to_string();
                TickOutcome::Applied { alert: None }
            }
        }
    }

    fn apply_snapshot(
        &mut self,
        snap: TelemetrySnapshot,
        received_at: DateTime<Local>,
        now: Instant,
    ) -> Option<AlertDecision> {
        let local_time = received_at.format(TIME_LABEL_FORMAT).to_string();

        if snap.status.is_valid_sample() {
            self.window.push(local_time.clone(), snap.cpu, snap.memory);
            self.trend.observe(snap.cpu, snap.memory);
        } else {
            self.trend.mark_pending();
        }

        if snap.status == Status::Normal && self.baseline.latch(snap.cpu) {
            info!(cpu = snap.cpu, "baseline cpu latched");
        }

        let alert = if snap.status == Status::Anomaly {
            let decision = self.alarm.on_anomaly(&snap, now);
            match decision {
                AlertDecision::Raised { .. } => self.stats.alerts_raised += 1,
                AlertDecision::Suppressed => self.stats.alerts_suppressed += 1,
            }
            Some(decision)
        } else {
            None
        };

        let display = &mut self.display;
        display.ratio = self.baseline.ratio_label(snap.cpu);
        display.last_updated = Some(
            snap.timestamp
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| local_time.clone()),
        );
        display.update_time = Some(local_time);
        display.cpu = Some(snap.cpu);
        display.memory = Some(snap.memory);
        display.process_name = snap.process_name;
        display.pid = snap.pid;
        display.threads = snap.threads;
        display.reason = snap.reason;
        display.status = snap.status;

        alert
    }

    /// Start closing the process named in the active alert.
    pub fn request_close(&mut self) -> Result<u32, RemediationError> {
        let pid = self.alarm.active().and_then(|a| a.pid);
        self.remediation.begin(pid)
    }

    /// Reconcile a termination answer. Success closes the alert.
    pub fn complete_close(
        &mut self,
        result: Result<KillResponse, ClientError>,
    ) -> Result<ClosedProcess, RemediationError> {
        let outcome = self.remediation.finish(result);
        match &outcome {
            Ok(_) => {
                self.stats.remediation_closed += 1;
                self.alarm.resolve();
            }
            Err(RemediationError::Rejected(_)) => self.stats.remediation_rejected += 1,
            Err(_) => self.stats.remediation_failed += 1,
        }
        outcome
    }

    pub fn dismiss_alert(&mut self) {
        self.alarm.dismiss();
    }
}
