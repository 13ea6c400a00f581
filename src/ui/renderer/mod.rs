//! Renderer module: split into focused submodules.
//!
//! - `header`: logo, endpoint, live status
//! - `dashboard`: metric cards, baseline strip, charts
//! - `alert_modal`: anomaly alert popup
//! - `overlays`: notices and help
//! - `status_bar`: key hints and transient messages
//! - `helpers`: shared rendering utilities

mod alert_modal;
mod dashboard;
mod header;
pub mod helpers;
mod overlays;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::state::AppState;

/// Top-level render function. Overlays are drawn last, notice on top.
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header bar
            Constraint::Min(10),   // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    header::render_header(frame, main_chunks[0], state);
    dashboard::render_dashboard(frame, main_chunks[1], state);
    status_bar::render_status_bar(frame, main_chunks[2], state);

    if let Some(alert) = state.session.alarm.active() {
        alert_modal::render_alert_modal(frame, size, state, alert);
    }

    if state.show_help {
        overlays::render_help_overlay(frame, size, state);
    }

    if let Some(notice) = &state.notice {
        overlays::render_notice(frame, size, state, notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Status, TelemetrySnapshot};
    use crate::monitor::PollEvent;
    use crate::session::Session;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn state_with(status: &str) -> AppState {
        let mut session = Session::new(20);
        let snap = TelemetrySnapshot {
            status: Status::from(status),
            cpu: 93.4,
            memory: 1500.0,
            reason: "High CPU due to multithreading or heavy background tasks".to_string(),
            process_name: Some("chrome".to_string()),
            pid: Some(4242),
            threads: Some(48),
            timestamp: None,
        };
        session.apply(
            PollEvent {
                tick: 1,
                received_at: chrono::Local::now(),
                result: Ok(snap),
            },
            Instant::now(),
        );
        AppState::new(session, "http://127.0.0.1:5000".to_string(), Theme::default(), true)
    }

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn dashboard_renders_snapshot_values() {
        let text = draw(&state_with("NORMAL"));
        assert!(text.contains("NORMAL"));
        assert!(text.contains("93.40%"));
        assert!(text.contains("chrome"));
    }

    #[test]
    fn anomaly_shows_modal_with_pid() {
        let state = state_with("ANOMALY");
        assert!(state.session.alarm.is_shown());
        let text = draw(&state);
        assert!(text.contains("4242"));
        assert!(text.contains("[d]"));
    }

    #[test]
    fn unknown_status_is_shown_verbatim() {
        let state = state_with("DEGRADED");
        assert_eq!(state.session.display.classification().token, "UNKNOWN");
        let text = draw(&state);
        assert!(text.contains("DEGRADED"));
        assert!(!text.contains("UNKNOWN"));
    }

    #[test]
    fn empty_session_renders_without_panicking() {
        let state = AppState::new(
            Session::new(20),
            "http://127.0.0.1:5000".to_string(),
            Theme::default(),
            false,
        );
        draw(&state);
    }
}
