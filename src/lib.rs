pub mod app;
pub mod attribute;
pub mod error;
pub mod game_state;
pub mod inventory;
pub mod ledger;
pub mod logging;
pub mod modifier;
pub mod resolver;
pub mod save;
pub mod settings;
pub mod status;
pub mod tracker;
pub mod tui;
pub mod turn;
pub mod ui;

// Re-export commonly used items for easier access
pub use attribute::{Attribute, AttributeSet};
pub use error::{AppError, GameError, PersistenceError};
pub use game_state::GameState;
pub use inventory::{Inventory, Item};
pub use ledger::{ACCRUAL_MULTIPLIER, Ledger};
pub use modifier::{Modifier, ModifierStore};
pub use resolver::{EffectiveAttributes, resolve};
pub use save::{FileStorage, MemoryStorage, Storage, StoreKey};
pub use settings::Settings;
pub use status::{StatusBoard, StatusEffect};
pub use tracker::Tracker;
pub use turn::{TurnModel, TurnNotice, TurnReport, TurnRules, TurnState};
