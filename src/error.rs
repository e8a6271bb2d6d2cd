use thiserror::Error;

use crate::turn::{TurnAction, TurnModel, TurnState};

pub type Result<T, E = GameError> = std::result::Result<T, E>;

// Errors raised by game-state operations. None of them leave partial state behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown attribute: {0}")]
    InvalidAttribute(String), // Name outside of the five tracked attributes.

    #[error("Invalid duration: {0} (must be at least one turn)")]
    InvalidDuration(u32),

    #[error("A modifier needs a nonzero amount")]
    ZeroMagnitude,

    #[error("Cannot {action} while in state {state}")]
    InvalidTransition { action: TurnAction, state: TurnState },

    #[error("Cannot {action} with the {model} turn model")]
    UnavailableInModel { action: TurnAction, model: TurnModel },
}

// Storage failures. Always recovered locally by the tracker.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// Application-level errors for the terminal front-end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Logger already initialized")]
    LoggerAlreadySet,

    #[error("No home directory found")]
    NoHomeDir,
}
