use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::constants::{ALERT_SUPPRESSION_MS, DEFAULT_PROCESS_LABEL, PLACEHOLDER};
use crate::models::TelemetrySnapshot;

use super::alarm::{AlarmSequence, Tone};

/// Content of the anomaly modal, captured when the alert is raised.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPayload {
    pub reason: String,
    pub process_name: String,
    /// Raw pid from the snapshot; validated by the remediation controller.
    pub pid: Option<i64>,
    pub cpu: f64,
    pub memory: f64,
}

impl AlertPayload {
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        let process_name = snapshot
            .process_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PROCESS_LABEL)
            .to_string();
        Self {
            reason: snapshot.reason.clone(),
            process_name,
            pid: snapshot.pid,
            cpu: snapshot.cpu,
            memory: snapshot.memory,
        }
    }

    pub fn pid_label(&self) -> String {
        self.pid
            .map(|p| p.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// What happened when an ANOMALY report reached the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDecision {
    /// Alert shown; `alarm_started` is false when a previous alarm was still playing.
    Raised { alarm_started: bool },
    /// Inside the suppression window; nothing changed.
    Suppressed,
}

#[derive(Debug, Clone, PartialEq)]
enum AlertState {
    Idle,
    Shown(AlertPayload),
}

/// Debounces anomaly alerts, owns modal visibility, and sequences the alarm.
///
/// State flow: Idle → Shown → (dismiss | resolve) → Idle. The alarm runs
/// independently of the modal and gates re-entrant triggers while playing.
pub struct AlarmCoordinator {
    state: AlertState,
    last_shown: Option<Instant>,
    suppression: Duration,
    audio: Option<AlarmSequence>,
}

impl Default for AlarmCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_millis(ALERT_SUPPRESSION_MS))
    }
}

impl AlarmCoordinator {
    pub fn new(suppression: Duration) -> Self {
        Self {
            state: AlertState::Idle,
            last_shown: None,
            suppression,
            audio: None,
        }
    }

    /// Handle an ANOMALY snapshot observed at `now`.
    pub fn on_anomaly(&mut self, snapshot: &TelemetrySnapshot, now: Instant) -> AlertDecision {
        if let Some(last) = self.last_shown {
            if now.saturating_duration_since(last) < self.suppression {
                debug!(
                    since_ms = now.saturating_duration_since(last).as_millis() as u64,
                    "anomaly alert suppressed"
                );
                return AlertDecision::Suppressed;
            }
        }

        let payload = AlertPayload::from_snapshot(snapshot);
        info!(
            process = %payload.process_name,
            pid = %payload.pid_label(),
            cpu = payload.cpu,
            memory = payload.memory,
            reason = %payload.reason,
            "anomaly alert raised"
        );
        self.state = AlertState::Shown(payload);
        self.last_shown = Some(now);

        let alarm_started = if self.audio.is_some() {
            false
        } else {
            self.audio = Some(AlarmSequence::start(now));
            true
        };
        AlertDecision::Raised { alarm_started }
    }

    /// User dismissal. The suppression timer keeps running.
    pub fn dismiss(&mut self) {
        if self.is_shown() {
            info!("anomaly alert dismissed");
        }
        self.state = AlertState::Idle;
    }

    /// Close after a successful remediation. The suppression timer keeps running.
    pub fn resolve(&mut self) {
        if self.is_shown() {
            info!("anomaly alert closed after remediation");
        }
        self.state = AlertState::Idle;
    }

    pub fn active(&self) -> Option<&AlertPayload> {
        match &self.state {
            AlertState::Shown(payload) => Some(payload),
            AlertState::Idle => None,
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, AlertState::Shown(_))
    }

    pub fn audio_playing(&self) -> bool {
        self.audio.is_some()
    }

    /// Advance the alarm. Returns the tones that became due; clears the
    /// playing flag once the last tone has ended.
    pub fn poll_audio(&mut self, now: Instant) -> Vec<Tone> {
        let Some(seq) = self.audio.as_mut() else {
            return Vec::new();
        };
        let tones = seq.due(now);
        if seq.is_finished(now) {
            self.audio = None;
        }
        tones
    }
}
