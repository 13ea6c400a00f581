//! Application-wide constants.
//!
//! Fixed timings, capacities, wire paths and user-facing fallback texts.
//! The polling cadence and the alert suppression window are deliberately not
//! configurable.

use std::path::PathBuf;

// ── Timing ────────────────────────────────────────────────────────
/// Interval between telemetry polls (ms).
pub const POLL_INTERVAL_MS: u64 = 2000;
/// Minimum time between two anomaly alerts shown to the user (ms).
pub const ALERT_SUPPRESSION_MS: u64 = 30_000;
/// Event poll timeout (ms) -- how often the UI checks for input and drains channels.
pub const EVENT_POLL_MS: u64 = 50;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;
/// Per-request HTTP timeout (ms). Kept below the poll interval.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1500;
/// Lower bound for the configurable request timeout (ms).
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

// ── Alarm ─────────────────────────────────────────────────────────
/// Tone frequencies of one alarm sequence (Hz), played in order.
pub const ALARM_PATTERN_HZ: [u32; 3] = [800, 1000, 800];
/// Duration of each alarm tone (ms).
pub const ALARM_TONE_MS: u64 = 500;
/// Offset between the starts of consecutive tones (ms).
pub const ALARM_TONE_SPACING_MS: u64 = 600;

// ── Capacities ────────────────────────────────────────────────────
/// Default number of samples kept in the chart window.
pub const DEFAULT_WINDOW_CAPACITY: usize = 20;
/// Smallest allowed chart window.
pub const MIN_WINDOW_CAPACITY: usize = 5;
/// Largest allowed chart window.
pub const MAX_WINDOW_CAPACITY: usize = 120;

// ── Backend ───────────────────────────────────────────────────────
/// Default telemetry backend base URL.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
/// Telemetry snapshot path.
pub const DATA_PATH: &str = "/data";
/// Process termination path.
pub const KILL_PATH: &str = "/kill_process";

// ── User-facing fallbacks ─────────────────────────────────────────
/// Reason shown when a poll fails.
pub const FETCH_ERROR_REASON: &str = "Failed to fetch data from server";
/// Error shown when remediation is attempted without a usable pid.
pub const INVALID_PID_MESSAGE: &str = "Process ID not available";
/// Process label used when the snapshot carries no name.
pub const DEFAULT_PROCESS_LABEL: &str = "Monitored process";
/// Placeholder for absent values.
pub const PLACEHOLDER: &str = "--";

// ── Prometheus Metrics ────────────────────────────────────────────
/// Prometheus metrics output buffer initial capacity.
pub const PROM_BUFFER_CAPACITY: usize = 2048;

// ── Popup Dimensions ──────────────────────────────────────────────
/// Anomaly alert popup width.
pub const ALERT_POPUP_WIDTH: u16 = 64;
/// Anomaly alert popup height.
pub const ALERT_POPUP_HEIGHT: u16 = 16;
/// Notice popup width.
pub const NOTICE_POPUP_WIDTH: u16 = 60;
/// Help overlay width.
pub const HELP_POPUP_WIDTH: u16 = 48;
/// Help overlay height.
pub const HELP_POPUP_HEIGHT: u16 = 16;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Supported Languages ───────────────────────────────────────────
/// Available UI languages for cycling.
pub const LANGUAGES: &[&str] = &["en", "es"];

// ── Logging ───────────────────────────────────────────────────────
/// Default tracing filter when RUST_LOG is unset.
pub const DEFAULT_LOG_FILTER: &str = "procwatch=info";
/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "procwatch.log";

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/procwatch/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("procwatch")
}

/// Returns `~/.config/procwatch/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.local/share/procwatch/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("procwatch")
}
