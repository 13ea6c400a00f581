//! Application struct and event loop.
//!
//! Owns the terminal, the UI state, and the channels from the background
//! poller and termination tasks. All session mutation happens here, on the
//! UI loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::alerts::{AlarmSink, AlertDecision, Muted, TerminalBell};
use crate::config::Config;
use crate::constants::*;
use crate::metrics::{MetricsSnapshot, SharedMetrics};
use crate::monitor::{spawn_poller, MonitorClient, PollEvent};
use crate::remediation::{spawn_termination, RemediationError, RemediationEvent};
use crate::session::{Session, TickOutcome};
use crate::ui::{self, AppState, Notice};

/// Main application struct.
pub struct App {
    state: AppState,
    client: MonitorClient,
    bell: Box<dyn AlarmSink>,

    // Channels
    poll_rx: mpsc::UnboundedReceiver<PollEvent>,
    remediation_tx: mpsc::UnboundedSender<RemediationEvent>,
    remediation_rx: mpsc::UnboundedReceiver<RemediationEvent>,

    // Prometheus
    shared_metrics: Option<SharedMetrics>,
}

impl App {
    /// Create the app and start the background poller.
    pub fn new(config: &Config, prometheus_addr: Option<&str>) -> Result<Self> {
        let client = MonitorClient::new(
            &config.server_url,
            Duration::from_millis(config.request_timeout_ms),
        );

        let theme = ui::Theme::by_name(&config.theme).unwrap_or_else(|| {
            warn!(theme = %config.theme, "unknown theme, using default");
            ui::Theme::default()
        });

        let session = Session::new(config.window_capacity);
        let state = AppState::new(
            session,
            config.server_url.clone(),
            theme,
            !config.alarm_sound,
        );

        let (poll_tx, poll_rx) = mpsc::unbounded_channel::<PollEvent>();
        spawn_poller(
            client.clone(),
            Duration::from_millis(POLL_INTERVAL_MS),
            poll_tx,
        );
        let (remediation_tx, remediation_rx) = mpsc::unbounded_channel::<RemediationEvent>();

        let shared_metrics = match prometheus_addr {
            Some(addr) => match crate::metrics::start_server(addr) {
                Ok(m) => {
                    info!(%addr, "prometheus metrics available at /metrics");
                    Some(m)
                }
                Err(e) => {
                    warn!(error = %e, "prometheus endpoint disabled");
                    None
                }
            },
            None => None,
        };

        info!(
            url = %client.base_url(),
            window = config.window_capacity,
            "monitoring started"
        );

        Ok(Self {
            state,
            client,
            bell: Box::new(TerminalBell),
            poll_rx,
            remediation_tx,
            remediation_rx,
            shared_metrics,
        })
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        // Cleanup runs even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        println!("\n{}\n", t!("app.stopped"));
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            self.drain_poll_events();
            self.drain_remediation_events();
            self.tick_alarm(Instant::now());

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                }
            }

            self.state.tick_count = self.state.tick_count.wrapping_add(1);
        }
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_poll_events(&mut self) {
        let mut applied = false;
        while let Ok(event) = self.poll_rx.try_recv() {
            let outcome = self.state.session.apply(event, Instant::now());
            if let TickOutcome::Applied {
                alert: Some(AlertDecision::Raised { .. }),
            } = outcome
            {
                // A fresh alert supersedes whatever the help overlay covered.
                self.state.show_help = false;
            }
            applied |= outcome != TickOutcome::Stale;
        }
        if applied {
            self.publish_metrics();
        }
    }

    fn drain_remediation_events(&mut self) {
        while let Ok(event) = self.remediation_rx.try_recv() {
            let notice = match self.state.session.complete_close(event.result) {
                Ok(closed) => {
                    self.state.set_status(t!("status.closed", name = &closed.name).to_string());
                    Notice::closed(&closed)
                }
                Err(e) => Notice::failed(&e),
            };
            info!(pid = event.pid, "close flow finished");
            self.state.show_notice(notice);
            self.publish_metrics();
        }
    }

    fn tick_alarm(&mut self, now: Instant) {
        for tone in self.state.session.alarm.poll_audio(now) {
            if self.state.muted {
                Muted.play(tone);
            } else {
                self.bell.play(tone);
            }
        }
    }

    fn publish_metrics(&self) {
        if let Some(ref metrics) = self.shared_metrics {
            if let Ok(mut snap) = metrics.lock() {
                *snap = MetricsSnapshot::from_session(&self.state.session);
            }
        }
    }

    // ── Key handling ─────────────────────────────────────────────

    /// Handle a key press. Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Notice popup: any key closes it
        if self.state.notice.is_some() {
            self.state.notice = None;
            return false;
        }

        if self.state.show_help {
            return self.handle_key_help(key);
        }

        if self.state.session.alarm.is_shown() {
            match key.code {
                KeyCode::Char('k') | KeyCode::Enter => {
                    self.close_task();
                    return false;
                }
                KeyCode::Char('d') | KeyCode::Esc => {
                    self.state.session.dismiss_alert();
                    return false;
                }
                _ => {}
            }
        }

        self.handle_key_normal(key)
    }

    fn handle_key_help(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('?') => self.state.show_help = false,
            _ => {}
        }
        false
    }

    fn handle_key_normal(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.state.show_help = true,
            KeyCode::Char('m') => {
                self.state.muted = !self.state.muted;
                let msg = if self.state.muted {
                    t!("status.muted")
                } else {
                    t!("status.unmuted")
                };
                self.state.set_status(msg.to_string());
            }
            KeyCode::Char('T') => {
                self.state.cycle_theme();
                let msg = t!("status.theme", name = &self.state.theme.name).to_string();
                self.state.set_status(msg);
            }
            KeyCode::Char('L') => {
                self.state.cycle_lang();
                let msg = t!("status.lang", lang = &self.state.current_lang).to_string();
                self.state.set_status(msg);
            }
            _ => {}
        }
        false
    }

    /// Ask the backend to close the process named in the active alert.
    fn close_task(&mut self) {
        match self.state.session.request_close() {
            Ok(pid) => {
                spawn_termination(self.client.clone(), pid, self.remediation_tx.clone());
                self.state
                    .set_status(t!("status.closing", pid = pid).to_string());
            }
            // The button is disabled while a request is in flight.
            Err(RemediationError::InFlight) => {}
            Err(e) => self.state.show_notice(Notice::failed(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Status, TelemetrySnapshot};
    use httpmock::prelude::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_for(server: &MockServer) -> App {
        let config = Config {
            server_url: server.base_url(),
            ..Config::default()
        };
        App::new(&config, None).unwrap()
    }

    fn raise_alert(app: &mut App, pid: Option<i64>) {
        let snap = TelemetrySnapshot {
            status: Status::Anomaly,
            cpu: 97.0,
            memory: 2100.0,
            reason: "High CPU and memory usage".to_string(),
            process_name: Some("chrome".to_string()),
            pid,
            threads: None,
            timestamp: None,
        };
        let outcome = app.state.session.apply(
            PollEvent {
                tick: u64::MAX / 2,
                received_at: chrono::Local::now(),
                result: Ok(snap),
            },
            Instant::now(),
        );
        assert!(matches!(outcome, TickOutcome::Applied { .. }));
        assert!(app.state.session.alarm.is_shown());
    }

    #[tokio::test]
    async fn invalid_pid_makes_no_network_call() {
        let server = MockServer::start_async().await;
        let kill = server
            .mock_async(|when, then| {
                when.method(POST).path("/kill_process");
                then.status(200).body(r#"{"success":true,"message":"closed"}"#);
            })
            .await;

        let mut app = app_for(&server);
        raise_alert(&mut app, None);
        assert!(!app.handle_key(key(KeyCode::Char('k'))));

        let notice = app.state.notice.as_ref().unwrap();
        assert!(notice.lines[0].contains(INVALID_PID_MESSAGE));
        assert!(app.state.session.alarm.is_shown());
        assert!(!app.state.session.remediation.is_busy());
        kill.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn successful_close_resolves_alert() {
        let server = MockServer::start_async().await;
        let kill = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/kill_process")
                    .json_body(serde_json::json!({ "pid": 4242 }));
                then.status(200).header("content-type", "application/json").body(
                    r#"{"success":true,"message":"Closed heavy tab","closed_pid":4243,"closed_name":"chrome","closed_memory":640.0}"#,
                );
            })
            .await;

        let mut app = app_for(&server);
        raise_alert(&mut app, Some(4242));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.state.session.remediation.is_busy());

        // Second press while in flight is ignored
        app.handle_key(key(KeyCode::Char('k')));

        let event = tokio::time::timeout(Duration::from_secs(5), app.remediation_rx.recv())
            .await
            .unwrap()
            .unwrap();
        app.remediation_tx.send(event).unwrap();
        app.drain_remediation_events();

        kill.assert_hits_async(1).await;
        assert!(!app.state.session.alarm.is_shown());
        assert!(!app.state.session.remediation.is_busy());
        let notice = app.state.notice.as_ref().unwrap();
        assert_eq!(notice.lines[0], "✅ Closed heavy tab");

        // Any key closes the notice
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.state.notice.is_none());
    }

    #[tokio::test]
    async fn rejected_close_keeps_alert_open() {
        let server = MockServer::start_async().await;
        let _kill = server
            .mock_async(|when, then| {
                when.method(POST).path("/kill_process");
                then.status(404)
                    .header("content-type", "application/json")
                    .body(r#"{"success":false,"message":"No heavy tab found"}"#);
            })
            .await;

        let mut app = app_for(&server);
        raise_alert(&mut app, Some(4242));
        app.handle_key(key(KeyCode::Char('k')));

        let event = tokio::time::timeout(Duration::from_secs(5), app.remediation_rx.recv())
            .await
            .unwrap()
            .unwrap();
        app.remediation_tx.send(event).unwrap();
        app.drain_remediation_events();

        assert!(app.state.session.alarm.is_shown());
        let notice = app.state.notice.as_ref().unwrap();
        assert!(notice.lines[0].contains("No heavy tab found"));
    }

    #[tokio::test]
    async fn dismiss_and_quit_keys() {
        let server = MockServer::start_async().await;
        let mut app = app_for(&server);
        raise_alert(&mut app, Some(1));

        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(!app.state.session.alarm.is_shown());

        assert!(!app.handle_key(key(KeyCode::Char('?'))));
        assert!(app.state.show_help);
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(!app.state.show_help);

        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[tokio::test]
    async fn poll_events_reach_the_session() {
        let server = MockServer::start_async().await;
        let _data = server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status":"NORMAL","cpu":12.0,"memory":256.0,"reason":"Normal behavior"}"#);
            })
            .await;

        let mut app = app_for(&server);
        let deadline = Instant::now() + Duration::from_secs(5);
        while !app.state.session.display.has_data && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
            app.drain_poll_events();
        }
        assert_eq!(app.state.session.display.status, Status::Normal);
        assert_eq!(app.state.session.window.len(), 1);
        assert_eq!(app.state.session.baseline.value(), Some(12.0));
    }

    #[tokio::test]
    async fn mute_toggle_flips_state() {
        let server = MockServer::start_async().await;
        let mut app = app_for(&server);
        let before = app.state.muted;
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(app.state.muted, !before);
        assert!(app.state.status_message.is_some());
    }
}
