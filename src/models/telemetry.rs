use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational status reported by the telemetry backend.
///
/// Unrecognized strings are kept verbatim in `Other` so they can still be
/// displayed; they classify as neutral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Normal,
    Anomaly,
    Waiting,
    Error,
    Other(String),
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "NORMAL" => Status::Normal,
            "ANOMALY" => Status::Anomaly,
            "WAITING" => Status::Waiting,
            "ERROR" => Status::Error,
            _ => Status::Other(raw),
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Status::from(raw.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Normal => "NORMAL",
            Status::Anomaly => "ANOMALY",
            Status::Waiting => "WAITING",
            Status::Error => "ERROR",
            Status::Other(raw) => raw,
        }
    }

    /// Whether a snapshot with this status carries chartable cpu/memory values.
    pub fn is_valid_sample(&self) -> bool {
        matches!(self, Status::Normal | Status::Anomaly)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One telemetry reading returned by `GET /data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub status: Status,
    /// CPU usage in percent (may exceed 100 on multi-core hosts)
    #[serde(default)]
    pub cpu: f64,
    /// Resident memory in megabytes
    #[serde(default)]
    pub memory: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default)]
    pub pid: Option<i64>,
    #[serde(default)]
    pub threads: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Positive pids that fit in a u32; everything else is not a usable target.
pub fn valid_pid(pid: Option<i64>) -> Option<u32> {
    pid.filter(|p| *p > 0).and_then(|p| u32::try_from(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_snapshot() {
        let json = r#"{
            "status": "ANOMALY",
            "cpu": 87.5,
            "memory": 1432.25,
            "reason": "High CPU due to multithreading or heavy background tasks",
            "process_name": "chrome",
            "pid": 4242,
            "threads": 31,
            "timestamp": "12:00:01"
        }"#;
        let snap: TelemetrySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.status, Status::Anomaly);
        assert_eq!(snap.cpu, 87.5);
        assert_eq!(snap.process_name.as_deref(), Some("chrome"));
        assert_eq!(valid_pid(snap.pid), Some(4242));
        assert_eq!(snap.threads, Some(31));
    }

    #[test]
    fn parses_minimal_waiting_snapshot() {
        let snap: TelemetrySnapshot =
            serde_json::from_str(r#"{"status":"WAITING","reason":"Learning baseline"}"#).unwrap();
        assert_eq!(snap.status, Status::Waiting);
        assert_eq!(snap.cpu, 0.0);
        assert!(snap.pid.is_none());
        assert!(snap.timestamp.is_none());
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let snap: TelemetrySnapshot =
            serde_json::from_str(r#"{"status":"DEGRADED","cpu":1,"memory":2,"reason":""}"#)
                .unwrap();
        assert_eq!(snap.status, Status::Other("DEGRADED".to_string()));
        assert_eq!(snap.status.to_string(), "DEGRADED");
        assert!(!snap.status.is_valid_sample());
    }

    #[test]
    fn status_is_case_sensitive() {
        assert_eq!(Status::from("normal"), Status::Other("normal".to_string()));
        assert_eq!(Status::from("NORMAL"), Status::Normal);
    }

    #[test]
    fn only_normal_and_anomaly_are_valid_samples() {
        assert!(Status::Normal.is_valid_sample());
        assert!(Status::Anomaly.is_valid_sample());
        assert!(!Status::Waiting.is_valid_sample());
        assert!(!Status::Error.is_valid_sample());
    }

    #[test]
    fn valid_pid_rejects_non_positive_and_oversized() {
        assert_eq!(valid_pid(None), None);
        assert_eq!(valid_pid(Some(0)), None);
        assert_eq!(valid_pid(Some(-7)), None);
        assert_eq!(valid_pid(Some(i64::from(u32::MAX) + 1)), None);
        assert_eq!(valid_pid(Some(1234)), Some(1234));
    }
}
