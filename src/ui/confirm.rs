// ui/confirm.rs
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::{Component, ComponentEnum, Context, Sheet, utils::popup};
use crate::app::{Action, Command};

/// Asks before wiping every store.
#[derive(Debug, Clone)]
pub struct ConfirmReset {
    parent: Sheet,
}

impl ConfirmReset {
    pub fn new(parent: Sheet) -> Self {
        Self { parent }
    }
}

impl Component for ConfirmReset {
    fn on_key(&mut self, key: KeyEvent, _context: &Context) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Submit(
                Command::ResetGame,
                ComponentEnum::from(Sheet::default()),
            )),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(
                Action::SwitchComponent(ComponentEnum::from(self.parent.clone())),
            ),
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        self.parent.render(area, buffer, context);

        let inner = popup(area, buffer, " Reset ", 44, 6);
        Paragraph::new(vec![
            Line::styled(
                "Reset all attributes, buffs, statuses,",
                Style::default().fg(Color::Red),
            ),
            Line::styled("inventory and money?", Style::default().fg(Color::Red)),
            Line::default(),
            Line::styled("y confirm · n cancel", Style::default().fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center)
        .render(inner, buffer);
    }
}
