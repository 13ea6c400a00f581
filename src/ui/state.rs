use std::time::Instant;

use crate::constants::LANGUAGES;
use crate::remediation::{ClosedProcess, RemediationError};
use crate::session::Session;

use super::theme::Theme;

/// Tone of a notice popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Blocking message shown after a close attempt. Any key closes it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub lines: Vec<String>,
}

impl Notice {
    pub fn closed(closed: &ClosedProcess) -> Self {
        let mut lines = vec![format!("✅ {}", closed.message)];
        let memory = closed
            .memory_mb
            .map(|m| format!("{:.2} MB", m))
            .unwrap_or_else(|| crate::constants::PLACEHOLDER.to_string());
        lines.push(
            t!(
                "notice.closed_detail",
                name = &closed.name,
                pid = crate::utils::or_placeholder(closed.pid),
                memory = &memory
            )
            .to_string(),
        );
        lines.push(String::new());
        lines.push(t!("notice.monitoring_continues").to_string());
        Self {
            kind: NoticeKind::Success,
            title: t!("notice.closed_title").to_string(),
            lines,
        }
    }

    pub fn failed(err: &RemediationError) -> Self {
        match err {
            RemediationError::Rejected(message) => Self {
                kind: NoticeKind::Warning,
                title: t!("notice.rejected_title").to_string(),
                lines: vec![
                    format!("⚠️ {}", message),
                    String::new(),
                    t!("notice.retry_hint").to_string(),
                ],
            },
            RemediationError::Transport(detail) => Self {
                kind: NoticeKind::Error,
                title: t!("notice.error_title").to_string(),
                lines: vec![format!("❌ {}: {}", t!("notice.transport_failed"), detail)],
            },
            RemediationError::InvalidTarget | RemediationError::InFlight => Self {
                kind: NoticeKind::Error,
                title: t!("notice.error_title").to_string(),
                lines: vec![format!("❌ {}", err)],
            },
        }
    }
}

/// Everything the renderer reads. Single source of truth for the UI.
pub struct AppState {
    pub session: Session,
    /// Backend base URL shown in the header
    pub endpoint: String,
    pub theme: Theme,
    pub show_help: bool,
    pub tick_count: u64,
    /// Whether the alarm bell is silenced
    pub muted: bool,

    // ── Status message (shown in status bar) ───────────────────
    pub status_message: Option<(String, Instant)>,

    // ── Notice popup ───────────────────────────────────────────
    pub notice: Option<Notice>,

    // ── Language ────────────────────────────────────────────
    pub current_lang: String,
}

impl AppState {
    pub fn new(session: Session, endpoint: String, theme: Theme, muted: bool) -> Self {
        Self {
            session,
            endpoint,
            theme,
            show_help: false,
            tick_count: 0,
            muted,
            status_message: None,
            notice: None,
            current_lang: rust_i18n::locale().to_string(),
        }
    }

    /// Cycle to the next built-in theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
    }

    /// Cycle to the next UI language.
    pub fn cycle_lang(&mut self) {
        let current_idx = LANGUAGES
            .iter()
            .position(|&l| l == self.current_lang)
            .unwrap_or(0);
        let next_lang = LANGUAGES[(current_idx + 1) % LANGUAGES.len()];
        rust_i18n::set_locale(next_lang);
        self.current_lang = next_lang.to_string();
    }

    /// Set a status bar message with automatic timestamp.
    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> AppState {
        AppState::new(
            Session::new(20),
            "http://127.0.0.1:5000".to_string(),
            Theme::default(),
            false,
        )
    }

    #[test]
    fn set_status_stores_message() {
        let mut s = make_state();
        assert!(s.status_message.is_none());
        s.set_status("theme: nord".to_string());
        let (msg, _) = s.status_message.as_ref().unwrap();
        assert_eq!(msg, "theme: nord");
    }

    #[test]
    fn cycle_theme_changes() {
        let mut s = make_state();
        let initial = s.theme.name.clone();
        s.cycle_theme();
        assert_ne!(s.theme.name, initial);
    }

    #[test]
    fn in_flight_notice_uses_error_message() {
        let notice = Notice::failed(&RemediationError::InFlight);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.lines, vec![format!("❌ {}", RemediationError::InFlight)]);
    }

    #[test]
    fn invalid_target_notice_names_missing_pid() {
        let notice = Notice::failed(&RemediationError::InvalidTarget);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.lines[0].contains("Process ID not available"));
    }

    #[test]
    fn rejected_notice_carries_backend_message() {
        let notice = Notice::failed(&RemediationError::Rejected("Access denied".to_string()));
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert!(notice.lines[0].contains("Access denied"));
        assert_eq!(notice.lines.len(), 3);
    }

    #[test]
    fn closed_notice_starts_with_backend_message() {
        let notice = Notice::closed(&ClosedProcess {
            pid: Some(4242),
            name: "chrome".to_string(),
            memory_mb: Some(812.5),
            message: "Closed chrome tab".to_string(),
        });
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.lines[0], "✅ Closed chrome tab");
    }
}
