//! Shared formatting helpers used across the UI.

use unicode_width::UnicodeWidthChar;

use crate::constants::{PLACEHOLDER, SPINNER_CHARS};

/// Truncate a string to `max_width` terminal columns, appending "..." if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }
    let (budget, suffix) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(suffix);
    out
}

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    SPINNER_CHARS[(tick % SPINNER_CHARS.len() as u64) as usize]
}

/// Format an optional value with two decimals, or the placeholder.
pub fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, unit),
        None => PLACEHOLDER.to_string(),
    }
}

/// Show an optional field, or the placeholder when absent.
pub fn or_placeholder<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
