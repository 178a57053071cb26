//! Single-select filter panel: a bordered block with one radio option per
//! row (● selected, ○ unselected). Used for the work modality filter.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub struct RadioBlock<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
    /// Cursor row; only drawn when the panel is focused.
    pub cursor: usize,
    pub focused: bool,
    pub border_color: ratatui::style::Color,
    pub active_color: ratatui::style::Color,
}

impl RadioBlock<'_> {
    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        for (idx, label) in self.options.iter().enumerate() {
            if idx as u16 >= area.height {
                break;
            }
            let row = Rect {
                x: area.x,
                y: area.y + idx as u16,
                width: area.width,
                height: 1,
            };
            let is_selected = idx == self.selected;
            let marker = if is_selected { "●" } else { "○" };
            let style = if is_selected {
                Style::default().fg(self.active_color)
            } else {
                Style::default().fg(self.border_color)
            };
            let style = if self.focused && idx == self.cursor {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            let text = format!("{} {}", marker, label);
            Paragraph::new(Line::from(Span::styled(text, style))).render(row, buf);
        }
    }
}

impl Widget for RadioBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_style = if self.focused {
            Style::default().fg(self.active_color)
        } else {
            Style::default().fg(self.border_color)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title)
            .border_style(block_style);
        let inner = block.inner(area);
        block.render(area, buf);
        self.render_inner(inner, buf);
    }
}
