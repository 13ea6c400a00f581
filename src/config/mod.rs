use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/procwatch/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the telemetry backend (serves `/data` and `/kill_process`)
    pub server_url: String,
    /// Number of valid samples kept in the chart window
    pub window_capacity: usize,
    /// Per-request HTTP timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Whether the alarm rings the terminal bell
    pub alarm_sound: bool,
    /// Theme name (built-in)
    pub theme: String,
    /// UI language (en, es)
    pub lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            alarm_sound: true,
            theme: "default".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional; missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    server_url: Option<String>,
    window_capacity: Option<usize>,
    request_timeout_ms: Option<u64>,
    alarm_sound: Option<bool>,
    theme: Option<String>,
    lang: Option<String>,
}

impl Config {
    /// Load config from ~/.config/procwatch/config.toml, falling back to defaults
    /// for any missing fields. If the file doesn't exist, returns pure defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path. Unreadable or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Config::default(),
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(file_config) => Config::default().merge(file_config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Config::default()
            }
        }
    }

    /// Merge file values over defaults, clamping out-of-range numbers.
    fn merge(mut self, file: FileConfig) -> Self {
        if let Some(v) = file.server_url {
            let v = v.trim().trim_end_matches('/').to_string();
            if !v.is_empty() {
                self.server_url = v;
            }
        }
        if let Some(v) = file.window_capacity {
            self.window_capacity = v.clamp(MIN_WINDOW_CAPACITY, MAX_WINDOW_CAPACITY);
        }
        if let Some(v) = file.request_timeout_ms {
            // Never longer than one poll period.
            self.request_timeout_ms = v.clamp(MIN_REQUEST_TIMEOUT_MS, POLL_INTERVAL_MS);
        }
        if let Some(v) = file.alarm_sound {
            self.alarm_sound = v;
        }
        if let Some(v) = file.theme {
            if !v.is_empty() {
                self.theme = v;
            }
        }
        if let Some(v) = file.lang {
            if !v.is_empty() {
                self.lang = v;
            }
        }
        self
    }
}
