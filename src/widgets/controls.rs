//! Bottom control bar: key hints on the left, filtered row count on the
//! right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const CONTROLS: [(&str, &str); 5] = [
    ("Tab", "next panel"),
    ("↑↓", "move"),
    ("Space", "toggle"),
    ("a", "all/none"),
    ("q", "quit"),
];

pub struct Controls {
    pub row_count: Option<usize>,
    pub bg_color: Color,
    pub key_color: Color,
    pub label_color: Color,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            row_count: None,
            bg_color: Color::Indexed(236),
            key_color: Color::Cyan,
            label_color: Color::White,
        }
    }
}

impl Controls {
    pub fn with_row_count(row_count: usize) -> Self {
        Self {
            row_count: Some(row_count),
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, bg_color: Color, key_color: Color, label_color: Color) -> Self {
        self.bg_color = bg_color;
        self.key_color = key_color;
        self.label_color = label_color;
        self
    }
}

impl Widget for Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        let mut spans: Vec<Span> = Vec::with_capacity(CONTROLS.len() * 3);
        for (key, label) in CONTROLS {
            spans.push(Span::styled(
                format!(" {} ", key),
                Style::default().fg(self.key_color).bg(self.bg_color),
            ));
            spans.push(Span::styled(
                format!("{}  ", label),
                Style::default().fg(self.label_color).bg(self.bg_color),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);

        if let Some(count) = self.row_count {
            let text = format!("{} rows ", crate::chart_data::group_thousands(count as u64));
            let width = text.len() as u16;
            if width < area.width {
                let right = Rect {
                    x: area.x + area.width - width,
                    y: area.y,
                    width,
                    height: 1,
                };
                Paragraph::new(Span::styled(
                    text,
                    Style::default().fg(self.label_color).bg(self.bg_color),
                ))
                .render(right, buf);
            }
        }
    }
}
