// ui/entry_form.rs
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};
use tui_textarea::TextArea;

use super::{
    Component, ComponentEnum, Context, Sheet,
    constants::FORM_KEYS,
    utils::{new_textarea, popup, rounded_block, textarea_value},
};
use crate::app::{Action, Command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Status,
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Turns,
}

/// Title/description form shared by statuses (which also take a duration)
/// and inventory items.
#[derive(Debug, Clone)]
pub struct EntryForm {
    kind: EntryKind,
    parent: Sheet,
    field: Field,
    title: TextArea<'static>,
    description: TextArea<'static>,
    turns: u32,
    warning: Option<&'static str>,
}

impl EntryForm {
    pub fn new(kind: EntryKind, parent: Sheet) -> Self {
        Self {
            kind,
            parent,
            field: Field::Title,
            title: new_textarea("Title"),
            description: new_textarea("Description (optional)"),
            turns: 1,
            warning: None,
        }
    }

    fn next_field(&mut self) {
        self.field = match (self.field, self.kind) {
            (Field::Title, _) => Field::Description,
            (Field::Description, EntryKind::Status) => Field::Turns,
            (Field::Description, EntryKind::Item) | (Field::Turns, _) => Field::Title,
        };
    }

    fn submit(&mut self) -> Option<Action> {
        let title = textarea_value(&self.title);
        if title.is_empty() {
            self.warning = Some("A title is required");
            self.field = Field::Title;
            return None;
        }
        let description = textarea_value(&self.description);
        let command = match self.kind {
            EntryKind::Status => Command::AddStatus {
                title,
                description,
                turns: self.turns,
            },
            EntryKind::Item => Command::AddItem { title, description },
        };
        Some(Action::Submit(
            command,
            ComponentEnum::from(self.parent.clone()),
        ))
    }

    fn heading(&self) -> &'static str {
        match self.kind {
            EntryKind::Status => " Add Status ",
            EntryKind::Item => " Add Item ",
        }
    }
}

impl Component for EntryForm {
    fn on_key(&mut self, key: KeyEvent, _context: &Context) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                return Some(Action::SwitchComponent(ComponentEnum::from(
                    self.parent.clone(),
                )));
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab => {
                self.next_field();
                return None;
            }
            _ => {}
        }
        self.warning = None;
        match self.field {
            Field::Title => {
                self.title.input(key);
            }
            Field::Description => {
                self.description.input(key);
            }
            Field::Turns => match key.code {
                KeyCode::Up | KeyCode::Right | KeyCode::Char('+') => {
                    self.turns = self.turns.saturating_add(1)
                }
                KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => {
                    self.turns = self.turns.saturating_sub(1).max(1)
                }
                _ => {}
            },
        }
        None
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        self.parent.render(area, buffer, context);

        let inner = popup(area, buffer, self.heading(), 50, 13);
        let [title_area, description_area, turns_area, keys_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        self.title
            .set_block(rounded_block(" Title ", self.field == Field::Title));
        self.description.set_block(rounded_block(
            " Description ",
            self.field == Field::Description,
        ));
        self.title.render(title_area, buffer);
        self.description.render(description_area, buffer);

        if self.kind == EntryKind::Status {
            let style = if self.field == Field::Turns {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Paragraph::new(format!("Turns: ‹ {} ›", self.turns))
                .style(style)
                .render(turns_area, buffer);
        }

        let footer = match self.warning {
            Some(warning) => Line::styled(warning, Style::default().fg(Color::Red)),
            None => Line::styled(FORM_KEYS, Style::default().fg(Color::DarkGray)),
        };
        Paragraph::new(footer).render(keys_area, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{save::FileStorage, settings::Settings, tracker::Tracker};
    use crossterm::event::KeyModifiers;
    use std::time::Instant;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut EntryForm, text: &str, context: &Context) {
        for c in text.chars() {
            form.on_key(key(KeyCode::Char(c)), context);
        }
    }

    #[test]
    fn status_form_collects_title_description_and_turns() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = Tracker::load(FileStorage::new(dir.path()), &Settings::default());
        let context = Context {
            tracker: &tracker,
            console: None,
            now: Instant::now(),
        };
        let mut form = EntryForm::new(EntryKind::Status, Sheet::default());

        type_text(&mut form, "Blessed", &context);
        form.on_key(key(KeyCode::Tab), &context);
        type_text(&mut form, "+1 luck", &context);
        form.on_key(key(KeyCode::Tab), &context);
        form.on_key(key(KeyCode::Up), &context);

        match form.on_key(key(KeyCode::Enter), &context) {
            Some(Action::Submit(command, _)) => assert_eq!(
                command,
                Command::AddStatus {
                    title: "Blessed".to_string(),
                    description: "+1 luck".to_string(),
                    turns: 2,
                }
            ),
            other => panic!("Expected a submission, got {other:?}"),
        }
    }

    #[test]
    fn empty_title_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = Tracker::load(FileStorage::new(dir.path()), &Settings::default());
        let context = Context {
            tracker: &tracker,
            console: None,
            now: Instant::now(),
        };
        let mut form = EntryForm::new(EntryKind::Item, Sheet::default());
        type_text(&mut form, "   ", &context);

        assert!(form.on_key(key(KeyCode::Enter), &context).is_none());
        assert_eq!(form.warning, Some("A title is required"));
    }

    #[test]
    fn items_skip_the_turns_field() {
        let mut form = EntryForm::new(EntryKind::Item, Sheet::default());
        form.next_field();
        form.next_field();
        assert_eq!(form.field, Field::Title);
    }
}
