//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let badge = |key: &str, color: Color| -> Span {
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(t.bg_dark)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim = |text: String| -> Span { Span::styled(text, t.label_style()) };

    let mut spans = vec![Span::raw(" "), badge("q", t.accent), dim(t!("status.quit").to_string())];

    // Alert actions only matter while the modal is up
    if state.session.alarm.is_shown() {
        spans.push(badge("k", t.danger));
        spans.push(dim(t!("status.close_task").to_string()));
        spans.push(badge("d", t.accent));
        spans.push(dim(t!("status.dismiss").to_string()));
    }

    let sound = if state.muted {
        t!("status.sound_off").to_string()
    } else if state.session.alarm.audio_playing() {
        format!("🔔 {}", t!("status.sound_on"))
    } else {
        t!("status.sound_on").to_string()
    };
    spans.extend([
        badge("m", if state.muted { t.warning } else { t.accent }),
        dim(format!(" {} ", sound)),
        badge("T", t.accent),
        dim(format!(" {} ", t!("status.theme", name = &t.name))),
        badge("L", t.accent),
        dim(format!(" {} ", state.current_lang.to_uppercase())),
        badge("?", t.accent),
        dim(t!("status.help").to_string()),
    ]);

    // Transient message, auto-expires
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
