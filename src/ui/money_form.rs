// ui/money_form.rs
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use thiserror::Error;

use super::{
    Component, ComponentEnum, Context, Sheet,
    constants::{MONEY_MAX, MONEY_MIN, MONEY_STEP},
    utils::popup,
};
use crate::app::{Action, Command};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoneyInputError {
    #[error("Enter a number")]
    NotANumber,
    #[error("Amount must be between {} and {}", MONEY_MIN, MONEY_MAX)]
    OutOfRange,
    #[error("Amount must be a multiple of {}", MONEY_STEP)]
    NotAStep,
    #[error("Not enough money")]
    Insufficient,
}

/// Input policy for money changes: multiples of 10 between 10 and 1000.
pub fn validate_money_amount(input: &str) -> Result<i64, MoneyInputError> {
    let amount: i64 = input
        .trim()
        .parse()
        .map_err(|_| MoneyInputError::NotANumber)?;
    if !(MONEY_MIN..=MONEY_MAX).contains(&amount) {
        return Err(MoneyInputError::OutOfRange);
    }
    if amount % MONEY_STEP != 0 {
        return Err(MoneyInputError::NotAStep);
    }
    Ok(amount)
}

#[derive(Debug, Clone)]
pub struct MoneyForm {
    parent: Sheet,
    input: String,
    error: Option<MoneyInputError>,
}

impl MoneyForm {
    pub fn new(parent: Sheet) -> Self {
        Self {
            parent,
            input: MONEY_MIN.to_string(),
            error: None,
        }
    }

    fn step(&mut self, delta: i64) {
        let current = self.input.trim().parse::<i64>().unwrap_or(0);
        let stepped = (current + delta).clamp(MONEY_MIN, MONEY_MAX);
        self.input = stepped.to_string();
    }

    fn submit(&mut self, subtract: bool, balance: i64) -> Option<Action> {
        let amount = match validate_money_amount(&self.input) {
            Ok(amount) if subtract && amount > balance => Err(MoneyInputError::Insufficient),
            other => other,
        };
        match amount {
            Ok(amount) => Some(Action::Submit(
                Command::AdjustCurrency(if subtract { -amount } else { amount }),
                ComponentEnum::from(self.parent.clone()),
            )),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl Component for MoneyForm {
    fn on_key(&mut self, key: KeyEvent, context: &Context) -> Option<Action> {
        let balance = context.tracker.money().balance();
        match key.code {
            KeyCode::Esc => {
                return Some(Action::SwitchComponent(ComponentEnum::from(
                    self.parent.clone(),
                )));
            }
            KeyCode::Enter | KeyCode::Char('+') => return self.submit(false, balance),
            KeyCode::Char('-') => return self.submit(true, balance),
            KeyCode::Up => self.step(MONEY_STEP),
            KeyCode::Down => self.step(-MONEY_STEP),
            KeyCode::Char(c) if c.is_ascii_digit() => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => return None,
        }
        self.error = None;
        None
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        self.parent.render(area, buffer, context);

        let inner = popup(area, buffer, " Money ", 44, 8);
        let [balance_area, input_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        let balance = context.tracker.money().balance();
        Paragraph::new(format!("Balance: {balance}")).render(balance_area, buffer);
        Paragraph::new(Line::from(vec![
            Span::raw("Amount: "),
            Span::styled(format!("{}▏", self.input), Style::default().fg(Color::Yellow)),
        ]))
        .render(input_area, buffer);

        // Subtracting is unavailable when it would push the balance below zero.
        let can_subtract = validate_money_amount(&self.input).is_ok_and(|amount| amount <= balance);
        let status = match &self.error {
            Some(e) => Line::styled(e.to_string(), Style::default().fg(Color::Red)),
            None if !can_subtract => Line::styled(
                "Subtract unavailable",
                Style::default().fg(Color::DarkGray),
            ),
            None => Line::default(),
        };
        Paragraph::new(status).render(status_area, buffer);

        Paragraph::new(format!(
            "Enter/+ add · - subtract · ↑↓ ±{MONEY_STEP} · Esc cancel"
        ))
        .style(Style::default().fg(Color::DarkGray))
        .render(keys_area, buffer);
    }
}
