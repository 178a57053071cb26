//! Dashboard rendering: pure drawing over the app state, no mutation.

mod charts_view;
mod layout;
mod metrics_view;
mod sidebar;
mod table_view;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::widgets::controls::Controls;
use crate::App;
use layout::centered_rect;

/// Draws the whole application: error screen, loading screen, or the
/// dashboard.
pub(crate) fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    if let Some(message) = &app.error {
        draw_error(message, area, buf);
        return;
    }
    if let Some(phase) = &app.loading {
        draw_loading(phase, area, buf);
        return;
    }
    let (Some(dataset), Some(view)) = (&app.dataset, &app.view) else {
        return;
    };

    let chrome = layout::dashboard_layout(
        area,
        sidebar::sidebar_width(&dataset.options),
        app.debug.enabled,
    );

    sidebar::render(app, dataset, chrome.sidebar, buf);
    metrics_view::render(&view.metrics, &app.config.theme, chrome.metrics, buf);
    charts_view::render_top_roles(&view.top_roles, &app.config.theme, chrome.top_roles, buf);
    charts_view::render_histogram(&view.histogram, &app.config.theme, chrome.histogram, buf);
    charts_view::render_countries(&view.country_means, &app.config.theme, chrome.countries, buf);
    table_view::render(app, view, chrome.table, buf);

    Controls::with_row_count(view.metrics.record_count)
        .with_colors(
            ratatui::style::Color::Indexed(236),
            app.config.theme.accent_color(),
            app.config.theme.text_color(),
        )
        .render(chrome.control_bar, buf);

    if let Some(debug_area) = chrome.debug {
        let text = format!(
            " events: {} | recompute: {:?} | rows: {}/{}",
            app.debug.num_events,
            app.debug.last_compute,
            view.metrics.record_count,
            dataset.height(),
        );
        Paragraph::new(text).render(debug_area, buf);
    }
}

/// Fatal load failure: the session renders this instead of a partial
/// dashboard.
fn draw_error(message: &str, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(area, 60, 30);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Load failed")
        .border_style(Style::default().fg(ratatui::style::Color::Red));
    let inner = block.inner(popup);
    block.render(popup, buf);
    Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Press q to exit."),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true })
    .render(inner, buf);
}

fn draw_loading(phase: &str, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(area, 40, 20);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("paydash");
    let inner = block.inner(popup);
    block.render(popup, buf);
    Paragraph::new(phase.to_string()).render(inner, buf);
}
