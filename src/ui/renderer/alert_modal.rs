//! Anomaly alert modal.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::alerts::AlertPayload;
use crate::constants::{ALERT_POPUP_HEIGHT, ALERT_POPUP_WIDTH};
use crate::ui::state::AppState;
use crate::utils::spinner_char;

use super::helpers::centered_rect;

pub fn render_alert_modal(frame: &mut Frame, area: Rect, state: &AppState, alert: &AlertPayload) {
    let t = &state.theme;
    let popup = centered_rect(ALERT_POPUP_WIDTH, ALERT_POPUP_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let text_width = popup.width.saturating_sub(4).max(10) as usize;
    let field = |label: String, value: String| -> Line {
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), t.label_style()),
            Span::styled(value, t.value_style()),
        ])
    };

    let mut lines = vec![Line::raw("")];
    for wrapped in textwrap::wrap(&alert.reason, text_width) {
        lines.push(Line::from(Span::styled(
            format!("  {}", wrapped),
            Style::default().fg(t.text_primary),
        )));
    }
    lines.push(Line::raw(""));
    lines.push(field(t!("process.name").to_string(), alert.process_name.clone()));
    lines.push(field(t!("process.pid").to_string(), alert.pid_label()));
    lines.push(field(t!("title.cpu").to_string(), format!("{:.2}%", alert.cpu)));
    lines.push(field(t!("title.memory").to_string(), format!("{:.2} MB", alert.memory)));
    lines.push(Line::raw(""));

    let busy = state.session.remediation.is_busy();
    let close_label = if busy {
        format!(" {} {} ", spinner_char(state.tick_count / 2), t!("modal.closing"))
    } else {
        format!(" [k] {} ", t!("modal.close_task"))
    };
    let close_style = if busy {
        Style::default().fg(t.text_muted).bg(t.border)
    } else {
        Style::default()
            .fg(t.bg_dark)
            .bg(t.danger)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(
        Line::from(vec![
            Span::styled(close_label, close_style),
            Span::raw("   "),
            Span::styled(
                format!(" [d] {} ", t!("modal.dismiss")),
                Style::default().fg(t.bg_dark).bg(t.accent),
            ),
        ])
        .alignment(Alignment::Center),
    );

    let title = Span::styled(
        format!(" ⚠ {} ", t!("modal.title")),
        Style::default().fg(t.danger).add_modifier(Modifier::BOLD),
    );
    let modal = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.danger)),
    );
    frame.render_widget(modal, popup);
}
