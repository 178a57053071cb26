//! Rect arithmetic for the dashboard: filter sidebar on the left, metrics
//! strip on top, the two salary charts side by side, the country surface,
//! the data table, and the control bar (plus an optional debug row).

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub sidebar: Rect,
    pub metrics: Rect,
    pub top_roles: Rect,
    pub histogram: Rect,
    pub countries: Rect,
    pub table: Rect,
    pub control_bar: Rect,
    pub debug: Option<Rect>,
}

pub fn dashboard_layout(area: Rect, sidebar_width: u16, debug_enabled: bool) -> DashboardLayout {
    let mut constraints = vec![Constraint::Fill(1), Constraint::Length(1)];
    if debug_enabled {
        constraints.push(Constraint::Length(1));
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let main = rows[0];
    let control_bar = rows[1];
    let debug = if debug_enabled { Some(rows[2]) } else { None };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Fill(1)])
        .split(main);
    let sidebar = columns[0];

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(3),
        ])
        .split(columns[1]);
    let metrics = content[0];
    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Fill(1)])
        .split(content[1]);

    DashboardLayout {
        sidebar,
        metrics,
        top_roles: charts[0],
        histogram: charts[1],
        countries: content[2],
        table: content[3],
        control_bar,
        debug,
    }
}

/// Centered rect within `r` with given percentage width and height.
pub fn centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_the_area() {
        let area = Rect::new(0, 0, 120, 40);
        let l = dashboard_layout(area, 26, false);
        assert_eq!(l.sidebar.width, 26);
        assert_eq!(l.sidebar.x, 0);
        assert_eq!(l.control_bar.height, 1);
        assert_eq!(l.control_bar.y, 39);
        assert!(l.debug.is_none());
        assert_eq!(l.metrics.height, 6);
        assert_eq!(l.metrics.x, 26);
        // Charts sit side by side under the metrics strip.
        assert_eq!(l.top_roles.y, l.histogram.y);
        assert!(l.histogram.x > l.top_roles.x);
        // Table is the last content row before the control bar.
        assert!(l.table.y > l.countries.y);
        assert!(l.table.y + l.table.height <= l.control_bar.y);
    }

    #[test]
    fn debug_row_appears_when_enabled() {
        let area = Rect::new(0, 0, 120, 40);
        let l = dashboard_layout(area, 26, true);
        let debug = l.debug.expect("debug row");
        assert_eq!(debug.height, 1);
        assert_eq!(debug.y, 39);
        assert_eq!(l.control_bar.y, 38);
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let c = centered_rect(area, 60, 30);
        assert!(c.x >= 20 && c.x + c.width <= 80);
        assert!(c.y >= 17 && c.y + c.height <= 33);
    }
}
