//! Dashboard: status, CPU, memory and process cards, the baseline strip,
//! and the CPU/memory charts drawn from the sample window.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::constants::PLACEHOLDER;
use crate::telemetry::{TimeSeriesWindow, Trend};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::ui::widgets::UsageBar;
use crate::utils::{fmt_opt, or_placeholder, truncate_str};

use super::helpers::card;

pub fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Cards
            Constraint::Length(3), // Baseline strip
            Constraint::Min(8),    // Charts
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(26),
        ])
        .split(rows[0]);

    render_status_card(frame, cards[0], state);
    render_cpu_card(frame, cards[1], state);
    render_memory_card(frame, cards[2], state);
    render_process_card(frame, cards[3], state);
    render_baseline_strip(frame, rows[1], state);
    render_charts(frame, rows[2], state);
}

fn render_status_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let display = &state.session.display;
    let class = display.classification();
    let color = t.status_color(class.color);

    let status_text = if display.has_data {
        display.status.to_string()
    } else {
        t!("header.connecting").to_string()
    };
    let last_updated = display.last_updated.as_deref().unwrap_or(PLACEHOLDER);

    let lines = vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(
                status_text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            display.reason.clone(),
            Style::default().fg(t.text_primary),
        )),
        Line::from(Span::styled(
            t!("dashboard.last_updated", time = last_updated).to_string(),
            Style::default().fg(t.text_muted),
        )),
    ];

    let card_block = card(t!("title.status").to_string(), t).border_style(Style::default().fg(color));
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(card_block);
    frame.render_widget(p, area);
}

fn metric_line<'a>(value: String, trend: Option<Trend>, t: &Theme) -> Line<'a> {
    let arrow = match trend {
        Some(tr) => tr.arrow(),
        None => "⏳",
    };
    Line::from(vec![
        Span::styled(value, t.value_style()),
        Span::raw(" "),
        Span::styled(arrow, Style::default().fg(t.trend_color(trend))),
    ])
}

fn render_cpu_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let display = &state.session.display;
    let block = card(t!("title.cpu").to_string(), t);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let value = fmt_opt(display.cpu, "%");
    frame.render_widget(
        Paragraph::new(metric_line(value, state.session.trend.cpu(), t)),
        parts[0],
    );

    if let Some(cpu) = display.cpu {
        let color = t.status_color(display.classification().color);
        frame.render_widget(UsageBar::new(cpu, color, t), parts[1]);
    }
}

fn render_memory_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let display = &state.session.display;
    let value = fmt_opt(display.memory, " MB");
    let peak = if state.session.window.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        format!("{:.2} MB", state.session.window.max_memory())
    };
    let lines = vec![
        metric_line(value, state.session.trend.memory(), t),
        Line::from(Span::styled(
            t!("dashboard.window_peak", value = &peak).to_string(),
            t.label_style(),
        )),
    ];
    let p = Paragraph::new(lines).block(card(t!("title.memory").to_string(), t));
    frame.render_widget(p, area);
}

fn render_process_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let display = &state.session.display;
    let width = area.width.saturating_sub(12) as usize;

    let row = |label: String, value: String| -> Line {
        Line::from(vec![
            Span::styled(format!("{:<9}", label), t.label_style()),
            Span::styled(truncate_str(&value, width), Style::default().fg(t.text_primary)),
        ])
    };
    let lines = vec![
        row(
            t!("process.name").to_string(),
            or_placeholder(display.process_name.as_deref().filter(|n| !n.is_empty())),
        ),
        row(t!("process.pid").to_string(), or_placeholder(display.pid)),
        row(t!("process.threads").to_string(), or_placeholder(display.threads)),
    ];
    let p = Paragraph::new(lines).block(card(t!("title.process").to_string(), t));
    frame.render_widget(p, area);
}

fn render_baseline_strip(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let session = &state.session;
    let baseline = fmt_opt(session.baseline.value(), "%");
    let ratio = session
        .display
        .ratio
        .clone()
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let updated = session
        .display
        .update_time
        .clone()
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let samples = format!("{}/{}", session.window.len(), session.window.capacity());

    let pair = |label: String, value: String| -> Vec<Span> {
        vec![
            Span::styled(format!(" {}: ", label), t.label_style()),
            Span::styled(value, t.value_style()),
            Span::raw("  "),
        ]
    };
    let mut spans = Vec::new();
    spans.extend(pair(t!("stats.baseline").to_string(), baseline));
    spans.extend(pair(t!("stats.ratio").to_string(), ratio));
    spans.extend(pair(t!("stats.updated").to_string(), updated));
    spans.extend(pair(t!("stats.samples").to_string(), samples));

    let p = Paragraph::new(Line::from(spans)).block(card(t!("title.stats").to_string(), t));
    frame.render_widget(p, area);
}

fn render_charts(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let window = &state.session.window;
    let cpu_points = window.cpu_points();
    let mem_points = window.memory_points();
    let cpu_top = window.max_cpu().max(100.0);
    let mem_top = nice_ceiling(window.max_memory());

    render_series_chart(
        frame,
        halves[0],
        t,
        window,
        Series {
            title: t!("title.cpu_chart").to_string(),
            name: "CPU %",
            points: &cpu_points,
            top: cpu_top,
            unit: "%",
            color: t.cpu_series,
        },
    );
    render_series_chart(
        frame,
        halves[1],
        t,
        window,
        Series {
            title: t!("title.memory_chart").to_string(),
            name: "MB",
            points: &mem_points,
            top: mem_top,
            unit: "",
            color: t.memory_series,
        },
    );
}

struct Series<'a> {
    title: String,
    name: &'static str,
    points: &'a [(f64, f64)],
    top: f64,
    unit: &'static str,
    color: ratatui::style::Color,
}

fn render_series_chart(
    frame: &mut Frame,
    area: Rect,
    t: &Theme,
    window: &TimeSeriesWindow,
    series: Series,
) {
    if series.points.is_empty() {
        let p = Paragraph::new(Span::styled(
            t!("dashboard.no_samples").to_string(),
            Style::default().fg(t.text_muted),
        ))
        .block(card(series.title, t));
        frame.render_widget(p, area);
        return;
    }

    let dataset = Dataset::default()
        .name(series.name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(series.color))
        .data(series.points);

    let x_max = (window.capacity().saturating_sub(1)).max(1) as f64;
    let x_labels = vec![
        Span::styled(
            window.first_label().unwrap_or("").to_string(),
            t.label_style(),
        ),
        Span::styled(
            window.last_label().unwrap_or("").to_string(),
            t.label_style(),
        ),
    ];
    let y_labels = vec![
        Span::styled(format!("0{}", series.unit), t.label_style()),
        Span::styled(format!("{:.0}{}", series.top / 2.0, series.unit), t.label_style()),
        Span::styled(format!("{:.0}{}", series.top, series.unit), t.label_style()),
    ];

    let chart = Chart::new(vec![dataset])
        .block(card(series.title, t))
        .x_axis(
            Axis::default()
                .style(t.border_style())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(t.border_style())
                .bounds([0.0, series.top])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

/// Round a chart maximum up to a readable bound.
fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 100.0;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    ((max * 1.1) / magnitude).ceil() * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ceiling_rounds_up() {
        assert_eq!(nice_ceiling(0.0), 100.0);
        assert_eq!(nice_ceiling(850.0), 1000.0);
        assert_eq!(nice_ceiling(1432.0), 2000.0);
        assert!(nice_ceiling(42.0) >= 42.0);
    }
}
