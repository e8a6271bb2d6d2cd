//! Key-per-store persistence.
//!
//! Each store lives under its own key and is loaded on its own: a missing or
//! corrupt key falls back to that store's default without touching the rest.
//! Writes are best effort; failures are logged and the in-memory state wins.

use std::collections::HashMap;
use std::fs::{self, create_dir_all};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::error::PersistenceError;
use crate::game_state::GameState;
use crate::modifier::ModifierStore;
use crate::status::StatusBoard;
use crate::turn::TurnState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum StoreKey {
    Stats,
    Buffs,
    Statuses,
    Inventory,
    Money,
    TurnEnded,
    IsMyTurn,
}

/// Storage medium for serialized stores.
pub trait Storage {
    /// Returns `Ok(None)` when nothing was ever stored under `key`.
    fn read(&self, key: StoreKey) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), PersistenceError>;
}

/// One pretty-printed JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_ref()))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: StoreKey) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), PersistenceError> {
        let to_write_error = |source| PersistenceError::Write {
            key: key.to_string(),
            source,
        };
        create_dir_all(&self.dir).map_err(to_write_error)?; // Ensure the data directory exists.
        fs::write(self.path_for(key), value).map_err(to_write_error)
    }
}

/// In-process storage, mostly for tests. Can be told to fail every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<StoreKey, String>,
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&mut self, key: StoreKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn raw(&self, key: StoreKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: StoreKey) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(&key).cloned())
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Unavailable(format!(
                "writes disabled for key '{key}'"
            )));
        }
        self.entries.insert(key, value.to_string());
        Ok(())
    }
}

pub fn try_load_key<T: DeserializeOwned>(
    storage: &impl Storage,
    key: StoreKey,
) -> Result<Option<T>, PersistenceError> {
    let Some(raw) = storage.read(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Loads one key, substituting the default on absence or failure.
pub fn load_key<T: DeserializeOwned + Default>(storage: &impl Storage, key: StoreKey) -> T {
    match try_load_key(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::debug!("No stored value for '{key}', using default");
            T::default()
        }
        Err(e) => {
            log::warn!("Falling back to default for '{key}': {e}");
            T::default()
        }
    }
}

pub fn try_save_key<T: Serialize>(
    storage: &mut impl Storage,
    key: StoreKey,
    value: &T,
) -> Result<(), PersistenceError> {
    let serialized =
        serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Corrupt {
            key: key.to_string(),
            source,
        })?;
    storage.write(key, &serialized)
}

/// Saves one key. Failures are logged and otherwise ignored.
pub fn save_key<T: Serialize>(storage: &mut impl Storage, key: StoreKey, value: &T) {
    if let Err(e) = try_save_key(storage, key, value) {
        log::error!("Failed to persist '{key}': {e}");
    }
}

pub fn load_game_state(storage: &impl Storage) -> GameState {
    let mut buffs: ModifierStore = load_key(storage, StoreKey::Buffs);
    let dropped = buffs.drop_invalid();
    if !dropped.is_empty() {
        log::warn!("Dropped {} invalid stored buffs: {dropped:?}", dropped.len());
    }
    let mut statuses: StatusBoard = load_key(storage, StoreKey::Statuses);
    let dropped = statuses.drop_invalid();
    if !dropped.is_empty() {
        log::warn!("Dropped {} expired stored statuses: {dropped:?}", dropped.len());
    }

    // `turnEnded` is not read back: the banner is not game state.
    GameState {
        stats: load_key(storage, StoreKey::Stats),
        buffs,
        statuses,
        inventory: load_key(storage, StoreKey::Inventory),
        money: load_key(storage, StoreKey::Money),
        turn: TurnState::from_my_turn(load_key(storage, StoreKey::IsMyTurn)),
    }
}

/// Writes the keys listed, taking values from `game`.
pub fn save_stores(storage: &mut impl Storage, game: &GameState, keys: &[StoreKey]) {
    for key in keys {
        match key {
            StoreKey::Stats => save_key(storage, *key, &game.stats),
            StoreKey::Buffs => save_key(storage, *key, &game.buffs),
            StoreKey::Statuses => save_key(storage, *key, &game.statuses),
            StoreKey::Inventory => save_key(storage, *key, &game.inventory),
            StoreKey::Money => save_key(storage, *key, &game.money),
            StoreKey::TurnEnded => save_key(storage, *key, &false),
            StoreKey::IsMyTurn => save_key(storage, *key, &game.turn.is_my_turn()),
        }
    }
}
