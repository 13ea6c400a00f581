//! Header bar: logo, backend endpoint, live status.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::state::AppState;
use crate::utils::truncate_str;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Logo
            Constraint::Min(20),    // Endpoint
            Constraint::Length(36), // Status summary
        ])
        .split(area);

    let bordered = || {
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style())
    };

    // Logo
    let pulse = if state.tick_count % 20 < 10 { "●" } else { "○" };
    let logo = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(pulse, Style::default().fg(t.success)),
        Span::styled(t!("app.name").to_string(), t.header_style()),
    ]))
    .block(bordered());
    frame.render_widget(logo, chunks[0]);

    // Endpoint
    let width = chunks[1].width.saturating_sub(14) as usize;
    let endpoint = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", t!("header.endpoint")), t.label_style()),
        Span::styled(
            truncate_str(&state.endpoint, width),
            Style::default().fg(t.text_primary),
        ),
    ]))
    .block(bordered());
    frame.render_widget(endpoint, chunks[1]);

    // Status dot + last update
    let display = &state.session.display;
    let summary = if display.has_data {
        let class = display.classification();
        let color = t.status_color(class.color);
        let updated = display.update_time.as_deref().unwrap_or("");
        Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(
                display.status.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {} ", updated), t.label_style()),
        ])
    } else {
        Line::from(Span::styled(
            format!("{} ", t!("header.connecting")),
            Style::default().fg(t.warning),
        ))
    };
    let status = Paragraph::new(summary)
        .alignment(Alignment::Right)
        .block(bordered());
    frame.render_widget(status, chunks[2]);
}
