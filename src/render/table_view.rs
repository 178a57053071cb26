//! Filtered data table: every column of the view, scrolled by row offset.

use polars::prelude::*;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Widget},
};

use crate::chart_data::group_thousands;
use crate::dashboard::DashboardData;
use crate::{App, Focus};

fn cell_text(column: &Column, row: usize) -> String {
    match column.dtype() {
        DataType::String => column
            .str()
            .ok()
            .and_then(|ca| ca.get(row))
            .unwrap_or("")
            .to_string(),
        DataType::Int64 => column
            .i64()
            .ok()
            .and_then(|ca| ca.get(row))
            .map(|v| v.to_string())
            .unwrap_or_default(),
        DataType::Float64 => column
            .f64()
            .ok()
            .and_then(|ca| ca.get(row))
            .map(|v| {
                if v.fract() == 0.0 {
                    format!("{}", v as i64)
                } else {
                    format!("{:.2}", v)
                }
            })
            .unwrap_or_default(),
        _ => column
            .get(row)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

pub(crate) fn render(app: &App, view: &DashboardData, area: Rect, buf: &mut Buffer) {
    let df = &view.filtered;
    let title = format!(
        "Detailed data ({} rows)",
        group_thousands(df.height() as u64)
    );
    let focused = app.focus == Focus::Table;
    let border_style = if focused {
        Style::default().fg(app.config.theme.accent_color())
    } else {
        Style::default().fg(app.config.theme.border_color())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    if df.height() == 0 {
        Paragraph::new(Line::from("No data to display").centered())
            .style(Style::default().add_modifier(Modifier::DIM))
            .render(inner, buf);
        return;
    }

    let columns = df.get_columns();
    let header = Row::new(
        columns
            .iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<String>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    // Header takes one row; the rest is the visible window from the offset.
    let visible = inner.height.saturating_sub(1) as usize;
    let start = app.table_offset.min(df.height().saturating_sub(1));
    let end = (start + visible).min(df.height());
    let rows: Vec<Row> = (start..end)
        .map(|i| Row::new(columns.iter().map(|c| cell_text(c, i)).collect::<Vec<String>>()))
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|_| Constraint::Fill(1)).collect();
    Table::new(rows, widths).header(header).render(inner, buf);
}
