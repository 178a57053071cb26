//! Metrics strip: eight labeled cells in two rows of four.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::chart_data::{format_usd, group_thousands};
use crate::config::ThemeConfig;
use crate::metrics::SummaryMetrics;

pub(crate) fn render(metrics: &SummaryMetrics, theme: &ThemeConfig, area: Rect, buf: &mut Buffer) {
    let cells: [(&str, String); 8] = [
        ("Mean salary", format_usd(metrics.mean_usd)),
        ("Median salary", format_usd(metrics.median_usd)),
        ("Max salary", format_usd(metrics.max_usd.trunc() as i64)),
        ("Min salary", format_usd(metrics.min_usd.trunc() as i64)),
        ("Top role", metrics.top_role.clone()),
        ("Top country", metrics.top_country.clone()),
        (
            "Countries",
            group_thousands(metrics.distinct_countries as u64),
        ),
        ("Salaries", group_thousands(metrics.salary_count as u64)),
    ];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1); 4])
            .split(*row_area);
        for (col_idx, cell_area) in columns.iter().enumerate() {
            let (label, value) = &cells[row_idx * 4 + col_idx];
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(*label)
                .border_style(Style::default().fg(theme.border_color()));
            let inner = block.inner(*cell_area);
            block.render(*cell_area, buf);
            Paragraph::new(Line::from(value.clone()).centered())
                .style(
                    Style::default()
                        .fg(theme.text_color())
                        .add_modifier(Modifier::BOLD),
                )
                .render(inner, buf);
        }
    }
}
