//! Termination request lifecycle for the process named in the active alert.
//!
//! `begin` validates the target and marks the controller busy, the network
//! round trip runs in a background task, and `finish` reconciles the answer.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::constants::{DEFAULT_PROCESS_LABEL, INVALID_PID_MESSAGE};
use crate::models::{valid_pid, KillResponse};
use crate::monitor::{ClientError, MonitorClient};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemediationError {
    #[error("{}", INVALID_PID_MESSAGE)]
    InvalidTarget,
    #[error("a close request is already in progress")]
    InFlight,
    #[error("{0}")]
    Rejected(String),
    #[error("could not reach the server: {0}")]
    Transport(String),
}

/// Identity of a process the backend reports as closed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedProcess {
    pub pid: Option<i64>,
    pub name: String,
    /// Memory the process held before closing (MB)
    pub memory_mb: Option<f64>,
    pub message: String,
}

impl ClosedProcess {
    fn from_response(resp: KillResponse, requested_pid: u32) -> Self {
        let name = resp
            .closed_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROCESS_LABEL.to_string());
        Self {
            pid: resp.closed_pid.or(Some(i64::from(requested_pid))),
            name,
            memory_mb: resp.closed_memory,
            message: resp.message,
        }
    }
}

/// Result of a background termination request.
#[derive(Debug)]
pub struct RemediationEvent {
    pub pid: u32,
    pub result: Result<KillResponse, ClientError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerState {
    Idle,
    Busy { pid: u32 },
}

/// Gates termination requests so that only one is in flight at a time.
#[derive(Debug)]
pub struct RemediationController {
    state: ControllerState,
}

impl Default for RemediationController {
    fn default() -> Self {
        Self {
            state: ControllerState::Idle,
        }
    }
}

impl RemediationController {
    /// Validate the target and enter the busy state.
    /// No request may be sent when this returns an error.
    pub fn begin(&mut self, pid: Option<i64>) -> Result<u32, RemediationError> {
        if let ControllerState::Busy { pid: busy } = self.state {
            warn!(pid = busy, "close request ignored, previous request still in flight");
            return Err(RemediationError::InFlight);
        }
        let Some(pid) = valid_pid(pid) else {
            warn!(pid = ?pid, "close request without a usable pid");
            return Err(RemediationError::InvalidTarget);
        };
        info!(pid, "user confirmed close, sending request");
        self.state = ControllerState::Busy { pid };
        Ok(pid)
    }

    /// Reconcile the backend answer and leave the busy state.
    pub fn finish(
        &mut self,
        result: Result<KillResponse, ClientError>,
    ) -> Result<ClosedProcess, RemediationError> {
        let pid = match self.state {
            ControllerState::Busy { pid } => pid,
            ControllerState::Idle => 0,
        };
        self.state = ControllerState::Idle;

        match result {
            Ok(resp) if resp.success => {
                let closed = ClosedProcess::from_response(resp, pid);
                info!(
                    pid = ?closed.pid,
                    name = %closed.name,
                    memory_mb = ?closed.memory_mb,
                    "process closed"
                );
                Ok(closed)
            }
            Ok(resp) => {
                warn!(pid, message = %resp.message, "close request rejected");
                Err(RemediationError::Rejected(resp.message))
            }
            Err(e) => {
                warn!(pid, error = %e, "close request failed");
                Err(RemediationError::Transport(e.to_string()))
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ControllerState::Busy { .. })
    }
}

/// Send the termination request in the background and report back on `tx`.
pub fn spawn_termination(
    client: MonitorClient,
    pid: u32,
    tx: mpsc::UnboundedSender<RemediationEvent>,
) {
    tokio::spawn(async move {
        let result = client.kill_process(pid).await;
        info!(pid, ok = result.is_ok(), "close response received");
        let _ = tx.send(RemediationEvent { pid, result });
    });
}
