use ratatui::style::{Color, Modifier, Style};

use crate::telemetry::{StatusColor, Trend};

/// All available built-in theme names, in cycling order.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "nord", "gruvbox"];

/// Every color the dashboard draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand ────────────────────────────────────────────────
    pub accent: Color,
    pub bg_dark: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Status ───────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub neutral: Color,

    // ── Chart series ─────────────────────────────────────────
    pub cpu_series: Color,
    pub memory_series: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,
}

impl Theme {
    /// Default dark theme, matching the web dashboard's palette.
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(99, 102, 241),
            bg_dark: Color::Rgb(15, 23, 42),
            text_primary: Color::Rgb(226, 232, 240),
            text_dim: Color::Rgb(148, 163, 184),
            text_muted: Color::Rgb(100, 116, 139),
            success: Color::Rgb(16, 185, 129),  // #10b981
            warning: Color::Rgb(245, 158, 11),  // #f59e0b
            danger: Color::Rgb(239, 68, 68),    // #ef4444
            neutral: Color::Rgb(148, 163, 184), // #94a3b8
            cpu_series: Color::Rgb(99, 102, 241),
            memory_series: Color::Rgb(16, 185, 129),
            border: Color::Rgb(51, 65, 85),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),       // nord8
            bg_dark: Color::Rgb(46, 52, 64),         // nord0
            text_primary: Color::Rgb(229, 233, 240), // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14
            warning: Color::Rgb(235, 203, 139), // nord13
            danger: Color::Rgb(191, 97, 106),   // nord11
            neutral: Color::Rgb(216, 222, 233), // nord4
            cpu_series: Color::Rgb(129, 161, 193),
            memory_series: Color::Rgb(163, 190, 140),
            border: Color::Rgb(76, 86, 106), // nord3
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),
            bg_dark: Color::Rgb(40, 40, 40),
            text_primary: Color::Rgb(235, 219, 178),
            text_dim: Color::Rgb(168, 153, 132),
            text_muted: Color::Rgb(102, 92, 84),
            success: Color::Rgb(142, 192, 124),
            warning: Color::Rgb(250, 189, 47),
            danger: Color::Rgb(251, 73, 52),
            neutral: Color::Rgb(189, 174, 147),
            cpu_series: Color::Rgb(131, 165, 152),
            memory_series: Color::Rgb(142, 192, 124),
            border: Color::Rgb(80, 73, 69),
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "nord" => Some(Self::nord()),
            "gruvbox" => Some(Self::gruvbox()),
            _ => None,
        }
    }

    /// Cycle to the next built-in theme.
    pub fn next_builtin(&self) -> Self {
        let idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .unwrap_or(0);
        let next = BUILTIN_THEME_NAMES[(idx + 1) % BUILTIN_THEME_NAMES.len()];
        Self::by_name(next).unwrap_or_default()
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn value_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_color(&self, color: StatusColor) -> Color {
        match color {
            StatusColor::Success => self.success,
            StatusColor::Danger => self.danger,
            StatusColor::Warning => self.warning,
            StatusColor::Neutral => self.neutral,
        }
    }

    /// Rising usage reads as bad, falling as good.
    pub fn trend_color(&self, trend: Option<Trend>) -> Color {
        match trend {
            Some(Trend::Up) => self.danger,
            Some(Trend::Down) => self.success,
            Some(Trend::Flat) | Some(Trend::Unknown) => self.text_dim,
            None => self.warning,
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
