// ui/mod.rs

pub mod buff_form;
pub mod confirm;
pub mod constants;
pub mod entry_form;
pub mod money_form;
pub mod sheet;
pub mod utils;

pub use buff_form::BuffForm;
pub use confirm::ConfirmReset;
pub use constants::{MIN_HEIGHT, MIN_WIDTH};
pub use entry_form::{EntryForm, EntryKind};
pub use money_form::{MoneyForm, MoneyInputError, validate_money_amount};
pub use sheet::Sheet;

use std::time::Instant;

use crossterm::event::KeyEvent;
use enum_dispatch::enum_dispatch;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::{app::Action, save::FileStorage, tracker::Tracker};

/// Read-only view handed to components while rendering and handling keys.
pub struct Context<'a> {
    pub tracker: &'a Tracker<FileStorage>,
    pub console: Option<&'a str>,
    pub now: Instant,
}

#[enum_dispatch]
pub trait Component {
    fn on_key(&mut self, key: KeyEvent, context: &Context) -> Option<Action>;
    // TODO: Derive the footer key hints from each component instead of hardcoding them.
    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context);
}

#[enum_dispatch(Component)]
#[derive(Debug)]
pub enum ComponentEnum {
    Sheet,
    BuffForm,
    EntryForm,
    MoneyForm,
    ConfirmReset,
}
