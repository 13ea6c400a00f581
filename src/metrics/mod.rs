//! Prometheus metrics exporter for procwatch.
//!
//! When enabled via `--prometheus <addr>`, a tiny HTTP server exposes the
//! latest telemetry and the session counters at `/metrics`. The UI loop
//! refreshes a shared [`MetricsSnapshot`] after each applied poll; the server
//! thread only reads it.

use std::sync::{Arc, Mutex};

use crate::constants::PROM_BUFFER_CAPACITY;
use crate::session::{Session, SessionStats};
use crate::telemetry::classify;

/// Shared state that the UI loop writes and the HTTP server reads.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Classified status token of the latest poll, if any
    pub status: Option<&'static str>,
    /// Whether the latest poll reached the backend, whatever status it reported
    pub backend_up: bool,
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub baseline: Option<f64>,
    pub window_len: usize,
    pub alert_shown: bool,
    pub remediation_busy: bool,
    pub stats: SessionStats,
}

impl MetricsSnapshot {
    pub fn from_session(session: &Session) -> Self {
        let display = &session.display;
        Self {
            status: display
                .has_data
                .then(|| classify(&display.status).token),
            backend_up: display.backend_reachable,
            cpu: display.cpu,
            memory: display.memory,
            baseline: session.baseline.value(),
            window_len: session.window.len(),
            alert_shown: session.alarm.is_shown(),
            remediation_busy: session.remediation.is_busy(),
            stats: session.stats,
        }
    }
}

/// Thread-safe handle to the metrics state.
pub type SharedMetrics = Arc<Mutex<MetricsSnapshot>>;

/// Start the metrics HTTP server on a background thread.
///
/// `GET /metrics` answers in Prometheus text format; every other path is 404.
pub fn start_server(addr: &str) -> Result<SharedMetrics, String> {
    let server = tiny_http::Server::http(addr)
        .map_err(|e| format!("Failed to bind Prometheus on {}: {}", addr, e))?;

    let metrics: SharedMetrics = Arc::new(Mutex::new(MetricsSnapshot::default()));
    let reader = Arc::clone(&metrics);

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let (code, content_type, body) = if request.url() == "/metrics" {
                let body = match reader.lock() {
                    Ok(snap) => render_metrics(&snap),
                    Err(_) => "# error: metrics lock poisoned\n".to_string(),
                };
                (200, "text/plain; version=0.0.4; charset=utf-8", body)
            } else {
                (404, "text/plain", "404 Not Found\n".to_string())
            };

            let mut response = tiny_http::Response::from_string(body).with_status_code(code);
            if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", content_type) {
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
    });

    Ok(metrics)
}

// ── Metric definitions ───────────────────────────────────────

struct MetricDef {
    name: &'static str,
    help: &'static str,
    kind: &'static str,
}

impl MetricDef {
    const fn gauge(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            kind: "gauge",
        }
    }

    const fn counter(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            kind: "counter",
        }
    }

    fn header(&self, out: &mut String) {
        out.push_str(&format!("# HELP {} {}\n", self.name, self.help));
        out.push_str(&format!("# TYPE {} {}\n", self.name, self.kind));
    }

    fn emit(&self, out: &mut String, value: f64) {
        self.header(out);
        push_sample(out, self.name, None, value);
    }
}

const M_UP: MetricDef = MetricDef::gauge(
    "procwatch_backend_up",
    "1 when the latest poll reached the telemetry backend.",
);
const M_STATUS: MetricDef =
    MetricDef::gauge("procwatch_status", "Latest classified status (one-hot).");
const M_CPU: MetricDef =
    MetricDef::gauge("procwatch_cpu_percent", "Latest reported CPU usage.");
const M_MEMORY: MetricDef =
    MetricDef::gauge("procwatch_memory_megabytes", "Latest reported memory usage.");
const M_BASELINE: MetricDef =
    MetricDef::gauge("procwatch_baseline_cpu_percent", "Session baseline CPU.");
const M_WINDOW: MetricDef =
    MetricDef::gauge("procwatch_window_samples", "Samples in the chart window.");
const M_ALERT_SHOWN: MetricDef =
    MetricDef::gauge("procwatch_alert_shown", "1 while the anomaly alert is visible.");
const M_REMEDIATION_BUSY: MetricDef = MetricDef::gauge(
    "procwatch_remediation_in_flight",
    "1 while a close request is in flight.",
);
const M_POLLS: MetricDef =
    MetricDef::counter("procwatch_polls_total", "Poll results applied.");
const M_FETCH_ERRORS: MetricDef =
    MetricDef::counter("procwatch_fetch_errors_total", "Polls that failed.");
const M_STALE: MetricDef =
    MetricDef::counter("procwatch_stale_results_total", "Poll results discarded as stale.");
const M_ALERTS: MetricDef = MetricDef::counter(
    "procwatch_alerts_total",
    "Anomaly reports by outcome (raised or suppressed).",
);
const M_REMEDIATION: MetricDef = MetricDef::counter(
    "procwatch_remediation_total",
    "Close requests by outcome.",
);

const STATUS_TOKENS: [&str; 5] = ["NORMAL", "ANOMALY", "WAITING", "ERROR", "UNKNOWN"];

// ── Rendering ────────────────────────────────────────────────

/// Render all metrics in Prometheus text exposition format.
fn render_metrics(snap: &MetricsSnapshot) -> String {
    let mut out = String::with_capacity(PROM_BUFFER_CAPACITY);
    out.push_str("# procwatch - Prometheus Metrics\n\n");

    M_UP.emit(&mut out, bool_value(snap.backend_up));

    if let Some(current) = snap.status {
        M_STATUS.header(&mut out);
        for token in STATUS_TOKENS {
            let value = if token == current { 1.0 } else { 0.0 };
            push_sample(&mut out, M_STATUS.name, Some(("status", token)), value);
        }
    }
    if let Some(cpu) = snap.cpu {
        M_CPU.emit(&mut out, cpu);
    }
    if let Some(memory) = snap.memory {
        M_MEMORY.emit(&mut out, memory);
    }
    if let Some(baseline) = snap.baseline {
        M_BASELINE.emit(&mut out, baseline);
    }
    M_WINDOW.emit(&mut out, snap.window_len as f64);
    M_ALERT_SHOWN.emit(&mut out, bool_value(snap.alert_shown));
    M_REMEDIATION_BUSY.emit(&mut out, bool_value(snap.remediation_busy));

    let s = &snap.stats;
    M_POLLS.emit(&mut out, s.polls as f64);
    M_FETCH_ERRORS.emit(&mut out, s.fetch_errors as f64);
    M_STALE.emit(&mut out, s.stale_results as f64);

    M_ALERTS.header(&mut out);
    for (outcome, count) in [("raised", s.alerts_raised), ("suppressed", s.alerts_suppressed)] {
        push_sample(&mut out, M_ALERTS.name, Some(("outcome", outcome)), count as f64);
    }

    M_REMEDIATION.header(&mut out);
    for (outcome, count) in [
        ("closed", s.remediation_closed),
        ("rejected", s.remediation_rejected),
        ("failed", s.remediation_failed),
    ] {
        push_sample(&mut out, M_REMEDIATION.name, Some(("outcome", outcome)), count as f64);
    }

    out
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Write one sample line. Label values here are fixed tokens, so no escaping.
fn push_sample(out: &mut String, name: &str, label: Option<(&str, &str)>, value: f64) {
    out.push_str(name);
    if let Some((key, val)) = label {
        out.push_str(&format!("{{{}=\"{}\"}}", key, val));
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        out.push_str(&format!(" {}\n", value as i64));
    } else {
        out.push_str(&format!(" {:.6}\n", value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TelemetrySnapshot;
    use crate::monitor::{ClientError, PollEvent};
    use std::time::Instant;

    #[test]
    fn empty_snapshot_reports_backend_down() {
        let text = render_metrics(&MetricsSnapshot::default());
        assert!(text.contains("procwatch_backend_up 0\n"));
        assert!(!text.contains("procwatch_status{"));
        assert!(!text.contains("procwatch_cpu_percent "));
        assert!(text.contains("procwatch_polls_total 0\n"));
    }

    #[test]
    fn renders_status_one_hot_and_values() {
        let snap = MetricsSnapshot {
            status: Some("ANOMALY"),
            backend_up: true,
            cpu: Some(87.5),
            memory: Some(1024.0),
            baseline: Some(20.0),
            window_len: 7,
            alert_shown: true,
            remediation_busy: false,
            stats: SessionStats {
                polls: 9,
                alerts_raised: 1,
                alerts_suppressed: 3,
                remediation_closed: 2,
                ..SessionStats::default()
            },
        };
        let text = render_metrics(&snap);
        assert!(text.contains("procwatch_backend_up 1\n"));
        assert!(text.contains("procwatch_status{status=\"ANOMALY\"} 1\n"));
        assert!(text.contains("procwatch_status{status=\"NORMAL\"} 0\n"));
        assert!(text.contains("procwatch_cpu_percent 87.500000\n"));
        assert!(text.contains("procwatch_memory_megabytes 1024\n"));
        assert!(text.contains("procwatch_window_samples 7\n"));
        assert!(text.contains("procwatch_alert_shown 1\n"));
        assert!(text.contains("procwatch_alerts_total{outcome=\"suppressed\"} 3\n"));
        assert!(text.contains("procwatch_remediation_total{outcome=\"closed\"} 2\n"));
        assert!(text.contains("# TYPE procwatch_polls_total counter\n"));
    }

    fn poll(tick: u64, result: Result<TelemetrySnapshot, ClientError>) -> PollEvent {
        PollEvent {
            tick,
            received_at: chrono::Local::now(),
            result,
        }
    }

    #[test]
    fn backend_reported_error_still_counts_as_up() {
        let mut session = Session::new(20);
        let snap: TelemetrySnapshot =
            serde_json::from_str(r#"{"status":"ERROR","reason":"collector crashed"}"#).unwrap();
        session.apply(poll(1, Ok(snap)), Instant::now());

        let text = render_metrics(&MetricsSnapshot::from_session(&session));
        assert!(text.contains("procwatch_backend_up 1\n"));
        assert!(text.contains("procwatch_status{status=\"ERROR\"} 1\n"));
        assert!(text.contains("procwatch_fetch_errors_total 0\n"));
    }

    #[test]
    fn failed_fetch_means_backend_down() {
        let mut session = Session::new(20);
        let ok: TelemetrySnapshot =
            serde_json::from_str(r#"{"status":"NORMAL","cpu":10.0,"memory":100.0}"#).unwrap();
        session.apply(poll(1, Ok(ok)), Instant::now());
        session.apply(poll(2, Err(ClientError::Status(503))), Instant::now());

        let text = render_metrics(&MetricsSnapshot::from_session(&session));
        assert!(text.contains("procwatch_backend_up 0\n"));
        assert!(text.contains("procwatch_status{status=\"ERROR\"} 1\n"));
        assert!(text.contains("procwatch_fetch_errors_total 1\n"));
    }

    #[test]
    fn snapshot_from_fresh_session() {
        let session = Session::new(20);
        let snap = MetricsSnapshot::from_session(&session);
        assert!(snap.status.is_none());
        assert_eq!(snap.window_len, 0);
        assert!(!snap.alert_shown);
    }
}
