use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::theme::Theme;

/// Horizontal block bar for a percentage, drawn in a caller-chosen color.
/// Values above 100 (multi-core CPU) fill the whole bar.
pub struct UsageBar<'a> {
    pub percent: f64,
    pub color: Color,
    pub theme: &'a Theme,
}

impl<'a> UsageBar<'a> {
    pub fn new(percent: f64, color: Color, theme: &'a Theme) -> Self {
        Self {
            percent: percent.max(0.0),
            color,
            theme,
        }
    }

    /// Number of filled cells for a bar of `width` cells.
    fn filled(&self, width: u16) -> u16 {
        let frac = (self.percent / 100.0).min(1.0);
        (frac * width as f64).round() as u16
    }
}

impl Widget for UsageBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 1 {
            return;
        }
        let filled = self.filled(area.width);
        for i in 0..area.width {
            let (ch, fg) = if i < filled {
                ("█", self.color)
            } else {
                ("░", self.theme.border)
            };
            buf.set_string(area.x + i, area.y, ch, Style::default().fg(fg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_proportional_and_capped() {
        let theme = Theme::default();
        assert_eq!(UsageBar::new(50.0, theme.success, &theme).filled(20), 10);
        assert_eq!(UsageBar::new(250.0, theme.danger, &theme).filled(20), 20);
        assert_eq!(UsageBar::new(-5.0, theme.danger, &theme).filled(20), 0);
    }

    #[test]
    fn renders_filled_and_empty_cells() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        UsageBar::new(50.0, theme.danger, &theme).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "█");
        assert_eq!(buf[(1, 0)].symbol(), "█");
        assert_eq!(buf[(2, 0)].symbol(), "░");
    }
}
