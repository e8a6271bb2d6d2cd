// ui/buff_form.rs
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier as TextModifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use strum::EnumCount;

use super::{
    Component, ComponentEnum, Context, Sheet,
    constants::FORM_KEYS,
    utils::popup,
};
use crate::{
    app::{Action, Command},
    attribute::Attribute,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Attributes,
    Turns,
    Points,
    Debuff,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Attributes => Field::Turns,
            Field::Turns => Field::Points,
            Field::Points => Field::Debuff,
            Field::Debuff => Field::Attributes,
        }
    }
}

/// Buff entry: one submission adds the same buff to every checked attribute.
#[derive(Debug, Clone)]
pub struct BuffForm {
    parent: Sheet,
    field: Field,
    cursor: usize,
    checked: [bool; Attribute::COUNT],
    turns: u32,
    points: i64,
    debuff: bool,
}

impl BuffForm {
    pub fn new(parent: Sheet, preselected: Attribute) -> Self {
        let mut checked = [false; Attribute::COUNT];
        let cursor = Attribute::all()
            .position(|attribute| attribute == preselected)
            .unwrap_or_default();
        checked[cursor] = true;
        Self {
            parent,
            field: Field::Attributes,
            cursor,
            checked,
            turns: 1,
            points: 1,
            debuff: false,
        }
    }

    pub fn selected(&self) -> Vec<Attribute> {
        Attribute::all()
            .zip(self.checked)
            .filter_map(|(attribute, checked)| checked.then_some(attribute))
            .collect()
    }

    fn adjust(&mut self, delta: i64) {
        match self.field {
            Field::Attributes => {
                let len = Attribute::COUNT as i64;
                self.cursor = (self.cursor as i64 + delta).rem_euclid(len) as usize;
            }
            Field::Turns => {
                self.turns = self.turns.saturating_add_signed(delta as i32).max(1);
            }
            Field::Points => self.points = (self.points + delta).max(1),
            Field::Debuff => self.debuff = !self.debuff,
        }
    }

    fn submit(&self) -> Option<Action> {
        let stats = self.selected();
        if stats.is_empty() {
            return None;
        }
        Some(Action::Submit(
            Command::AddModifiers {
                stats,
                turns: self.turns,
                amount: self.points,
                debuff: self.debuff,
            },
            ComponentEnum::from(self.parent.clone()),
        ))
    }

    fn field_style(&self, field: Field) -> Style {
        if self.field == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(TextModifier::BOLD)
        } else {
            Style::default()
        }
    }
}

impl Component for BuffForm {
    fn on_key(&mut self, key: KeyEvent, _context: &Context) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::SwitchComponent(ComponentEnum::from(
                self.parent.clone(),
            ))),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.field = self.field.next();
                None
            }
            KeyCode::Char(' ') if self.field == Field::Attributes => {
                self.checked[self.cursor] = !self.checked[self.cursor];
                None
            }
            KeyCode::Char(' ') if self.field == Field::Debuff => {
                self.debuff = !self.debuff;
                None
            }
            // Attribute rows are listed top to bottom, so Down moves forward.
            KeyCode::Down | KeyCode::Char('j') if self.field == Field::Attributes => {
                self.adjust(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') if self.field == Field::Attributes => {
                self.adjust(-1);
                None
            }
            KeyCode::Up | KeyCode::Right | KeyCode::Char('+') => {
                self.adjust(1);
                None
            }
            KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => {
                self.adjust(-1);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        self.parent.render(area, buffer, context);

        let inner = popup(area, buffer, " Add Buff ", 44, 15);
        let [attributes_area, values_area, keys_area] = Layout::vertical([
            Constraint::Length(Attribute::COUNT as u16 + 1),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .areas(inner);

        let mut lines = vec![Line::from(Span::styled(
            "Attributes (space to toggle)",
            self.field_style(Field::Attributes),
        ))];
        lines.extend(Attribute::all().zip(self.checked).enumerate().map(
            |(i, (attribute, checked))| {
                let marker = if checked { "[x]" } else { "[ ]" };
                let style = if self.field == Field::Attributes && i == self.cursor {
                    Style::default().add_modifier(TextModifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!(" {marker} {}", attribute.title()), style))
            },
        ));
        Paragraph::new(lines).render(attributes_area, buffer);

        let sign = if self.debuff { "-" } else { "+" };
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Turns:  ‹ {} ›", self.turns),
                self.field_style(Field::Turns),
            )),
            Line::from(Span::styled(
                format!("Points: ‹ {sign}{} ›", self.points),
                self.field_style(Field::Points),
            )),
            Line::from(Span::styled(
                format!("Debuff: {}", if self.debuff { "yes" } else { "no" }),
                self.field_style(Field::Debuff),
            )),
        ])
        .render(values_area, buffer);

        Paragraph::new(FORM_KEYS)
            .style(Style::default().fg(Color::DarkGray))
            .render(keys_area, buffer);
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

    #[test]
    fn one_submission_targets_every_checked_attribute() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = Tracker::load(FileStorage::new(dir.path()), &Settings::default());
        let context = Context {
            tracker: &tracker,
            console: None,
            now: Instant::now(),
        };
        let mut form = BuffForm::new(Sheet::default(), Attribute::Humor);

        // Check appearance too (humor is preselected).
        form.on_key(key(KeyCode::Down), &context);
        form.on_key(key(KeyCode::Down), &context);
        form.on_key(key(KeyCode::Char(' ')), &context);
        // Turns 1 -> 3, points 1 -> 2.
        form.on_key(key(KeyCode::Tab), &context);
        form.on_key(key(KeyCode::Up), &context);
        form.on_key(key(KeyCode::Up), &context);
        form.on_key(key(KeyCode::Tab), &context);
        form.on_key(key(KeyCode::Char('+')), &context);

        match form.on_key(key(KeyCode::Enter), &context) {
            Some(Action::Submit(command, _)) => assert_eq!(
                command,
                Command::AddModifiers {
                    stats: vec![Attribute::Humor, Attribute::Appearance],
                    turns: 3,
                    amount: 2,
                    debuff: false,
                }
            ),
            other => panic!("Expected a submission, got {other:?}"),
        }
    }

    #[test]
    fn nothing_checked_means_nothing_submitted() {
        let mut form = BuffForm::new(Sheet::default(), Attribute::Wealth);
        form.checked = [false; Attribute::COUNT];
        assert!(form.submit().is_none());
    }

    #[test]
    fn turns_and_points_never_drop_below_one() {
        let mut form = BuffForm::new(Sheet::default(), Attribute::Wealth);
        form.field = Field::Turns;
        form.adjust(-5);
        assert_eq!(form.turns, 1);
        form.field = Field::Points;
        form.adjust(-5);
        assert_eq!(form.points, 1);
    }
}
