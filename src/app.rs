// /app.rs
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use uuid::Uuid;

use crate::{
    attribute::Attribute,
    error::GameError,
    save::{FileStorage, Storage},
    tracker::Tracker,
    tui::{Tui, TuiEvent},
    ui::{Component, ComponentEnum, Context, Sheet},
};

/// A tracker mutation requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Increment(Attribute),
    Decrement(Attribute),
    AddModifiers {
        stats: Vec<Attribute>,
        turns: u32,
        amount: i64,
        debuff: bool,
    },
    RemoveModifier(Uuid),
    AddStatus {
        title: String,
        description: String,
        turns: u32,
    },
    RemoveStatus(Uuid),
    AddItem {
        title: String,
        description: String,
    },
    RemoveItem(Uuid),
    AdjustCurrency(i64),
    StartTurn,
    EndTurn,
    ResetGame,
}

impl Command {
    /// Applies the command and returns a line for the console.
    pub fn apply<S: Storage>(self, tracker: &mut Tracker<S>) -> Result<String, GameError> {
        let message = match self {
            Command::Increment(attribute) => {
                let value = tracker.increment_attribute(attribute);
                format!("{} is now {value}", attribute.title())
            }
            Command::Decrement(attribute) => {
                let value = tracker.decrement_attribute(attribute);
                format!("{} is now {value}", attribute.title())
            }
            Command::AddModifiers {
                stats,
                turns,
                amount,
                debuff,
            } => {
                let ids = tracker.add_modifiers(&stats, turns, amount, debuff)?;
                let kind = if debuff { "debuff" } else { "buff" };
                format!("Added {} {kind}(s) for {turns} turns", ids.len())
            }
            Command::RemoveModifier(id) => {
                tracker.remove_modifier(id);
                "Modifier removed".to_string()
            }
            Command::AddStatus {
                title,
                description,
                turns,
            } => {
                tracker.add_status(&title, &description, turns)?;
                format!("Status '{title}' added")
            }
            Command::RemoveStatus(id) => {
                tracker.remove_status(id);
                "Status removed".to_string()
            }
            Command::AddItem { title, description } => {
                tracker.add_item(&title, &description);
                format!("'{title}' added to inventory")
            }
            Command::RemoveItem(id) => {
                tracker.remove_item(id);
                "Item removed".to_string()
            }
            Command::AdjustCurrency(amount) => {
                let balance = tracker.adjust_currency(amount);
                format!("Money: {balance}")
            }
            Command::StartTurn => {
                let report = tracker.start_turn()?;
                format!("Your turn! +{} money", report.accrued.unwrap_or_default())
            }
            Command::EndTurn => {
                let report = tracker.end_turn()?;
                let mut message = format!(
                    "Turn ended: {} buff(s) and {} status(es) expired",
                    report.expired_modifiers.len(),
                    report.expired_statuses.len()
                );
                if let Some(accrued) = report.accrued {
                    message.push_str(&format!(", +{accrued} money"));
                }
                message
            }
            Command::ResetGame => {
                tracker.reset_game();
                "Game reset".to_string()
            }
        };
        Ok(message)
    }
}

#[derive(Debug)]
pub enum Action {
    Quit,
    SwitchComponent(ComponentEnum),
    Command(Command),
    // Run the command, then show the given component.
    Submit(Command, ComponentEnum),
}

pub struct App {
    running: bool,
    component: ComponentEnum,
    tracker: Tracker<FileStorage>,
    console: Option<String>,
}

impl App {
    pub fn new(tracker: Tracker<FileStorage>) -> Self {
        Self {
            running: true,
            component: ComponentEnum::from(Sheet::default()),
            tracker,
            console: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new().tick_rate(4.0).frame_rate(30.0);
        tui.enter()?;

        while self.running {
            let context = Context {
                tracker: &self.tracker,
                console: self.console.as_deref(),
                now: Instant::now(),
            };
            let component = &mut self.component;
            tui.draw(|frame| component.render(frame.area(), frame.buffer_mut(), &context))?;

            match tui.next().await {
                Some(event) => self.handle_tui_event(event),
                None => self.running = false,
            }
        }

        tui.exit();
        Ok(())
    }

    fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.on_key(key_event)
            }
            TuiEvent::Tick => self.tracker.tick(Instant::now()),
            TuiEvent::Error => log::warn!("Terminal event stream reported an error"),
            TuiEvent::Key(_) | TuiEvent::Init | TuiEvent::Render | TuiEvent::Resize(_, _) => {}
        }
    }

    fn on_key(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.running = false;
            return;
        }
        let context = Context {
            tracker: &self.tracker,
            console: self.console.as_deref(),
            now: Instant::now(),
        };
        if let Some(action) = self.component.on_key(key_event, &context) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchComponent(component) => self.component = component,
            Action::Command(command) => self.execute(command),
            Action::Submit(command, component) => {
                self.execute(command);
                self.component = component;
            }
        }
    }

    fn execute(&mut self, command: Command) {
        log::debug!("Executing {command:?}");
        self.console = Some(match command.apply(&mut self.tracker) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Rejected command: {e}");
                e.to_string()
            }
        });
    }
}
