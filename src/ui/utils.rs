// ui/utils.rs

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use tui_textarea::TextArea;

use super::constants::{MIN_HEIGHT, MIN_WIDTH};

pub fn center_rect(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

pub fn rounded_block(title: &str, highlighted: bool) -> Block<'_> {
    Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if highlighted {
            Color::Yellow
        } else {
            Color::White
        }))
        .title(title)
}

/// Clears a centered popup area and draws its frame; returns the inner area.
pub fn popup(area: Rect, buffer: &mut Buffer, title: &str, width: u16, height: u16) -> Rect {
    let popup_area = center_rect(area, Constraint::Length(width), Constraint::Length(height));
    Clear.render(popup_area, buffer);
    let block = rounded_block(title, true);
    let inner = block.inner(popup_area);
    block.render(popup_area, buffer);
    inner
}

/// Renders the resize warning and returns true when `area` is too small.
pub fn render_too_small(area: Rect, buffer: &mut Buffer) -> bool {
    if area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT {
        return false;
    }
    Paragraph::new("Terminal too small. Please resize.")
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .render(area, buffer);
    true
}

pub fn new_textarea(placeholder: impl Into<String>) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
    textarea
}

/// Full text of a text area, trimmed.
pub fn textarea_value(textarea: &TextArea) -> String {
    textarea.lines().join("\n").trim().to_string()
}

#[cfg(test)]
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width.max(1))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
