//! The three chart surfaces. Each degrades independently to a "No data to
//! display" indicator when the filtered view is empty.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Row, Table, Widget},
};

use crate::chart_data::{format_usd, histogram_range, HistogramBin};
use crate::config::ThemeConfig;

fn surface_block<'a>(title: &'a str, theme: &ThemeConfig) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(theme.border_color()))
}

fn draw_no_data(inner: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from("No data to display").centered())
        .style(Style::default().add_modifier(Modifier::DIM))
        .render(inner, buf);
}

/// Horizontal bar chart of the top roles by mean salary, smallest at the
/// top so the largest bar sits at the bottom edge.
pub(crate) fn render_top_roles(
    series: &[(String, f64)],
    theme: &ThemeConfig,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = surface_block("Top roles by mean salary", theme);
    let inner = block.inner(area);
    block.render(area, buf);
    if series.is_empty() {
        draw_no_data(inner, buf);
        return;
    }

    let bars: Vec<Bar> = series
        .iter()
        .map(|(role, mean)| {
            Bar::default()
                .value(mean.trunc() as u64)
                .text_value(format_usd(mean.trunc() as i64))
                .label(Line::from(role.clone()))
        })
        .collect();
    BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.accent_color()))
        .value_style(Style::default().fg(theme.text_color()))
        .label_style(Style::default().fg(theme.text_color()))
        .data(BarGroup::default().bars(&bars))
        .render(inner, buf);
}

/// Salary distribution histogram; bins become 1-column bars, clipped to
/// whatever fits the surface.
pub(crate) fn render_histogram(
    bins: &[HistogramBin],
    theme: &ThemeConfig,
    area: Rect,
    buf: &mut Buffer,
) {
    let title = match histogram_range(bins) {
        Some(range) => format!("Salary distribution ({})", range),
        None => "Salary distribution".to_string(),
    };
    let block = surface_block(&title, theme);
    let inner = block.inner(area);
    block.render(area, buf);
    if bins.is_empty() {
        draw_no_data(inner, buf);
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count)
                .text_value(String::new())
        })
        .collect();
    BarChart::default()
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(theme.accent_color()))
        .data(BarGroup::default().bars(&bars))
        .render(inner, buf);
}

/// Mean salary per country, keyed by ISO3 code. The terminal stand-in for
/// the map surface: code, value, and a bar scaled to the largest mean.
pub(crate) fn render_countries(
    series: &[(String, f64)],
    theme: &ThemeConfig,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = surface_block("Mean salary by country", theme);
    let inner = block.inner(area);
    block.render(area, buf);
    if series.is_empty() {
        draw_no_data(inner, buf);
        return;
    }

    let max_mean = series
        .iter()
        .map(|(_, m)| *m)
        .fold(f64::NEG_INFINITY, f64::max);
    let bar_width = inner.width.saturating_sub(16).max(4) as usize;
    let rows: Vec<Row> = series
        .iter()
        .map(|(code, mean)| {
            let filled = if max_mean > 0.0 {
                ((mean / max_mean) * bar_width as f64).round() as usize
            } else {
                0
            };
            Row::new(vec![
                Line::from(code.clone()),
                Line::from(format_usd(mean.trunc() as i64)).right_aligned(),
                Line::from("▇".repeat(filled.min(bar_width)))
                    .style(Style::default().fg(theme.accent_color())),
            ])
        })
        .collect();
    Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Fill(1),
        ],
    )
    .render(inner, buf);
}
