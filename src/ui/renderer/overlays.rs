//! Popup overlays: remediation notices and the help screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::{HELP_POPUP_HEIGHT, HELP_POPUP_WIDTH, NOTICE_POPUP_WIDTH};
use crate::ui::state::{AppState, Notice, NoticeKind};

use super::helpers::centered_rect;

pub fn render_notice(frame: &mut Frame, area: Rect, state: &AppState, notice: &Notice) {
    let t = &state.theme;
    let color = match notice.kind {
        NoticeKind::Success => t.success,
        NoticeKind::Warning => t.warning,
        NoticeKind::Error => t.danger,
    };

    let inner_width = NOTICE_POPUP_WIDTH.saturating_sub(4) as usize;
    let mut lines = vec![Line::raw("")];
    for line in &notice.lines {
        if line.is_empty() {
            lines.push(Line::raw(""));
            continue;
        }
        for wrapped in textwrap::wrap(line, inner_width) {
            lines.push(Line::from(Span::styled(
                format!(" {}", wrapped),
                Style::default().fg(t.text_primary),
            )));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", t!("notice.any_key")),
        Style::default().fg(t.text_muted),
    )));

    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = centered_rect(NOTICE_POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", notice.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(p, popup);
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let popup = centered_rect(HELP_POPUP_WIDTH, HELP_POPUP_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let entry = |key: &str, desc: String, color: ratatui::style::Color| -> Line {
        Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(t.text_primary)),
        ])
    };

    let lines = vec![
        Line::raw(""),
        entry("k / Enter", t!("help.close_task").to_string(), t.danger),
        entry("d / Esc", t!("help.dismiss").to_string(), t.accent),
        entry("m", t!("help.mute").to_string(), t.accent),
        entry("T", t!("help.theme").to_string(), t.accent),
        entry("L", t!("help.lang").to_string(), t.accent),
        entry("?", t!("help.help").to_string(), t.accent),
        entry("q / Ctrl+C", t!("help.quit").to_string(), t.accent),
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", t!("help.poll_note")),
            Style::default().fg(t.text_muted),
        )),
        Line::from(Span::styled(
            format!("  {}", t!("help.suppress_note")),
            Style::default().fg(t.text_muted),
        )),
    ];

    let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(t!("title.help").to_string(), t.header_style()))
            .borders(Borders::ALL)
            .border_style(t.border_highlight_style()),
    );
    frame.render_widget(help, popup);
}
