//! Shared rendering helpers: centered popup rect and bordered card blocks.

use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

/// Return a `Rect` centered within `area` with the given dimensions.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Bordered block with a themed title, used for every dashboard card.
pub fn card<'a>(title: String, t: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(title, t.header_style()))
        .borders(Borders::ALL)
        .border_style(t.border_style())
}
