//! Left sidebar with the four filter panels.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use crate::dataset::Dataset;
use crate::filters::FilterOptions;
use crate::widgets::{check_list::CheckList, radio_block::RadioBlock};
use crate::{App, Focus};

/// Sidebar width: widest option label plus marker, padding, and borders,
/// within sane bounds.
pub(crate) fn sidebar_width(options: &FilterOptions) -> u16 {
    let longest = options
        .modalities
        .iter()
        .chain(&options.seniorities)
        .chain(&options.company_sizes)
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);
    ((longest + 6) as u16).clamp(18, 34)
}

pub(crate) fn render(app: &App, dataset: &Dataset, area: Rect, buf: &mut Buffer) {
    let options = &dataset.options;
    let panel = |n: usize| Constraint::Length(n as u16 + 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            panel(options.modalities.len()),
            panel(options.years.len()),
            panel(options.seniorities.len()),
            panel(options.company_sizes.len()),
            Constraint::Min(0),
        ])
        .split(area);

    let border = app.config.theme.border_color();
    let accent = app.config.theme.accent_color();

    RadioBlock {
        title: "Modality",
        options: &options.modalities,
        selected: app.modality_idx,
        cursor: app.modality_cursor,
        focused: app.focus == Focus::Modality,
        border_color: border,
        active_color: accent,
    }
    .render(chunks[0], buf);

    let year_labels: Vec<String> = options.years.iter().map(i64::to_string).collect();
    CheckList {
        title: "Year",
        options: &year_labels,
        checked: &app.years_checked,
        cursor: app.years_cursor,
        focused: app.focus == Focus::Years,
        border_color: border,
        active_color: accent,
    }
    .render(chunks[1], buf);

    CheckList {
        title: "Seniority",
        options: &options.seniorities,
        checked: &app.seniorities_checked,
        cursor: app.seniorities_cursor,
        focused: app.focus == Focus::Seniorities,
        border_color: border,
        active_color: accent,
    }
    .render(chunks[2], buf);

    CheckList {
        title: "Company size",
        options: &options.company_sizes,
        checked: &app.sizes_checked,
        cursor: app.sizes_cursor,
        focused: app.focus == Focus::CompanySizes,
        border_color: border,
        active_color: accent,
    }
    .render(chunks[3], buf);
}
