// ui/sheet.rs
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier as TextModifier, Style},
    text::{Line, Span},
    widgets::{Cell, List, ListItem, ListState, Paragraph, Row, StatefulWidget, Table, Widget},
};
use strum::EnumCount;

use super::{
    BuffForm, ComponentEnum, ConfirmReset, Context, EntryForm, EntryKind, MoneyForm,
    constants::SHEET_KEYS,
    utils::{render_too_small, rounded_block},
};
use crate::{
    app::{Action, Command},
    attribute::Attribute,
    turn::TurnModel,
    ui::Component,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Attributes,
    Buffs,
    Statuses,
    Inventory,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Attributes => Focus::Buffs,
            Focus::Buffs => Focus::Statuses,
            Focus::Statuses => Focus::Inventory,
            Focus::Inventory => Focus::Attributes,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Attributes => Focus::Inventory,
            Focus::Buffs => Focus::Attributes,
            Focus::Statuses => Focus::Buffs,
            Focus::Inventory => Focus::Statuses,
        }
    }
}

/// The main character sheet: attributes, buffs, statuses, inventory and money.
#[derive(Debug, Default, Clone)]
pub struct Sheet {
    focus: Focus,
    cursors: [usize; 4],
}

impl Component for Sheet {
    fn on_key(&mut self, key: KeyEvent, context: &Context) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1, context);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1, context);
                None
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right | KeyCode::Char('l')
                if self.focus == Focus::Attributes =>
            {
                Some(Action::Command(Command::Increment(self.selected_attribute())))
            }
            KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h')
                if self.focus == Focus::Attributes =>
            {
                Some(Action::Command(Command::Decrement(self.selected_attribute())))
            }
            KeyCode::Char('b') => {
                let preselected = self.selected_attribute();
                Some(Action::SwitchComponent(ComponentEnum::from(BuffForm::new(
                    self.clone(),
                    preselected,
                ))))
            }
            KeyCode::Char('s') => Some(Action::SwitchComponent(ComponentEnum::from(
                EntryForm::new(EntryKind::Status, self.clone()),
            ))),
            KeyCode::Char('i') => Some(Action::SwitchComponent(ComponentEnum::from(
                EntryForm::new(EntryKind::Item, self.clone()),
            ))),
            KeyCode::Char('m') => Some(Action::SwitchComponent(ComponentEnum::from(
                MoneyForm::new(self.clone()),
            ))),
            KeyCode::Char('d') | KeyCode::Delete => self.removal(context).map(Action::Command),
            KeyCode::Char('t') => Some(Action::Command(Command::StartTurn)),
            KeyCode::Char('e') => Some(Action::Command(Command::EndTurn)),
            KeyCode::Char('r') => Some(Action::SwitchComponent(ComponentEnum::from(
                ConfirmReset::new(self.clone()),
            ))),
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if render_too_small(area, buffer) {
            return;
        }
        self.clamp_cursors(context);

        let [header, body, console, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(body);
        let [attributes_area, resources_area] =
            Layout::vertical([Constraint::Length(9), Constraint::Min(5)]).areas(left);
        let [buffs_area, statuses_area, items_area] =
            Layout::vertical([Constraint::Ratio(1, 3); 3]).areas(right);

        Paragraph::new(format!("Turn Tracker v{}", env!("CARGO_PKG_VERSION")))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(header, buffer);

        self.render_attributes(attributes_area, buffer, context);
        render_resources(resources_area, buffer, context);
        self.render_buffs(buffs_area, buffer, context);
        self.render_statuses(statuses_area, buffer, context);
        self.render_inventory(items_area, buffer, context);

        if let Some(message) = context.console {
            Paragraph::new(message)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .render(console, buffer);
        }
        Paragraph::new(SHEET_KEYS)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(footer, buffer);
    }
}

impl Sheet {
    pub fn focus(&self) -> Focus {
        self.focus
    }

    fn cursor(&self) -> usize {
        self.cursors[self.focus as usize]
    }

    fn selected_attribute(&self) -> Attribute {
        Attribute::all()
            .nth(self.cursors[Focus::Attributes as usize])
            .unwrap_or(Attribute::Determination)
    }

    fn focused_len(&self, context: &Context) -> usize {
        match self.focus {
            Focus::Attributes => Attribute::COUNT,
            Focus::Buffs => context.tracker.buffs().len(),
            Focus::Statuses => context.tracker.statuses().len(),
            Focus::Inventory => context.tracker.inventory().len(),
        }
    }

    fn move_cursor(&mut self, delta: isize, context: &Context) {
        let len = self.focused_len(context);
        if len == 0 {
            return;
        }
        let cursor = &mut self.cursors[self.focus as usize];
        *cursor = (*cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    // Lists shrink when entries expire, keep cursors in range.
    fn clamp_cursors(&mut self, context: &Context) {
        let lens = [
            Attribute::COUNT,
            context.tracker.buffs().len(),
            context.tracker.statuses().len(),
            context.tracker.inventory().len(),
        ];
        for (cursor, len) in self.cursors.iter_mut().zip(lens) {
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    fn removal(&self, context: &Context) -> Option<Command> {
        let index = self.cursor();
        match self.focus {
            Focus::Attributes => None,
            Focus::Buffs => context
                .tracker
                .buffs()
                .as_slice()
                .get(index)
                .map(|modifier| Command::RemoveModifier(modifier.id)),
            Focus::Statuses => context
                .tracker
                .statuses()
                .as_slice()
                .get(index)
                .map(|status| Command::RemoveStatus(status.id)),
            Focus::Inventory => context
                .tracker
                .inventory()
                .as_slice()
                .get(index)
                .map(|item| Command::RemoveItem(item.id)),
        }
    }

    fn render_attributes(&self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let focused = self.focus == Focus::Attributes;
        let stats = context.tracker.stats();
        let effective = context.tracker.effective_attributes();

        let header = Row::new(["Attribute", "Base", "Mods", "Effective"].map(|h| {
            Cell::from(h).style(Style::default().fg(Color::Yellow))
        }));
        let rows = Attribute::all().enumerate().map(|(i, attribute)| {
            let base = stats.get(attribute);
            let total = effective.get(attribute);
            let delta = total.saturating_sub(base);
            let style = if focused && i == self.cursor() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(TextModifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(attribute.title()),
                Cell::from(base.to_string()),
                Cell::from(format!("{delta:+}")).style(Style::default().fg(delta_color(delta))),
                Cell::from(total.to_string()),
            ])
            .style(style)
        });
        let widths = [
            Constraint::Min(14),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(rounded_block(" Attributes ", focused));
        Widget::render(table, area, buffer);
    }

    fn render_buffs(&self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let items = context.tracker.buffs().iter().map(|modifier| {
            ListItem::new(format!(
                "{}: {:+} T{}",
                modifier.stat.to_string().to_uppercase(),
                modifier.points,
                modifier.turns
            ))
            .style(Style::default().fg(if modifier.is_buff() {
                Color::Green
            } else {
                Color::Red
            }))
        });
        self.render_list(" Buffs ", Focus::Buffs, items, area, buffer);
    }

    fn render_statuses(&self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let items = context.tracker.statuses().iter().map(|status| {
            let mut spans = vec![
                Span::styled(
                    status.title.clone(),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(format!(" T{}", status.turns)),
            ];
            if !status.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", status.description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        });
        self.render_list(" Statuses ", Focus::Statuses, items, area, buffer);
    }

    fn render_inventory(&self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let items = context.tracker.inventory().iter().map(|item| {
            let mut spans = vec![Span::raw(item.title.clone())];
            if !item.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", item.description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        });
        self.render_list(" Inventory ", Focus::Inventory, items, area, buffer);
    }

    fn render_list<'a>(
        &self,
        title: &'a str,
        focus: Focus,
        items: impl Iterator<Item = ListItem<'a>>,
        area: Rect,
        buffer: &mut Buffer,
    ) {
        let focused = self.focus == focus;
        let list = List::new(items)
            .block(rounded_block(title, focused))
            .highlight_style(Style::default().add_modifier(TextModifier::REVERSED));
        let mut state = ListState::default()
            .with_selected(focused.then_some(self.cursors[focus as usize]));
        StatefulWidget::render(list, area, buffer, &mut state);
    }
}

fn render_resources(area: Rect, buffer: &mut Buffer, context: &Context) {
    let tracker = context.tracker;
    let turn_line = match tracker.rules().model {
        TurnModel::Fused => Line::from(Span::styled(
            "End your turn with 'e'",
            Style::default().fg(Color::White),
        )),
        TurnModel::TwoPhase if tracker.turn().is_my_turn() => Line::from(Span::styled(
            "Your turn",
            Style::default()
                .fg(Color::Green)
                .add_modifier(TextModifier::BOLD),
        )),
        TurnModel::TwoPhase => Line::from(Span::styled(
            "Not your turn",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Money: ", Style::default().fg(Color::Yellow)),
            Span::raw(tracker.money().balance().to_string()),
        ]),
        turn_line,
    ];
    if tracker.notice_visible(context.now) {
        lines.push(Line::from(Span::styled(
            "Turn ended!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(TextModifier::BOLD),
        )));
    }
    Paragraph::new(lines)
        .block(rounded_block(" Resources ", false))
        .render(area, buffer);
}

fn delta_color(delta: i64) -> Color {
    match delta.signum() {
        1 => Color::Green,
        -1 => Color::Red,
        _ => Color::DarkGray,
    }
}
