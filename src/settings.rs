use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ledger::ACCRUAL_MULTIPLIER;
use crate::turn::{TurnModel, TurnRules};

pub const SETTINGS_FILE: &str = "settings.json";

// Define a structure to hold application settings with serialization and deserialization capabilities.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub turn_model: TurnModel,   // Two-phase start/end turns, or a single fused end turn.
    pub accrual_multiplier: i64, // Money per point of effective wealth.
    pub notice_seconds: u64,     // How long the "turn ended" banner stays up.
    pub debug_mode: bool,        // Flag to enable or disable debug logging.
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            turn_model: TurnModel::TwoPhase,
            accrual_multiplier: ACCRUAL_MULTIPLIER,
            notice_seconds: 2,
            debug_mode: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn_rules(&self) -> TurnRules {
        TurnRules::new(self.turn_model, self.accrual_multiplier)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }

    // Load settings from a specified file path.
    pub fn load_settings_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    // Save current settings to a specified file path.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?; // Create the directory if it doesn't exist.
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    /// Loads `settings.json` from the data directory, writing defaults when absent.
    pub fn load_or_init(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        match Self::load_settings_from_file(&path) {
            Ok(settings) => settings,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let settings = Self::default();
                if let Err(e) = settings.save_to_file(&path) {
                    log::error!("Failed to write default settings: {e:#?}");
                }
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings at {}, using defaults: {e}", path.display());
                Self::default()
            }
        }
    }
}

/// `<home>/turn_tracker/data`, unless overridden on the command line.
pub fn default_data_dir() -> Option<PathBuf> {
    dir::home_dir().map(|home| home.join("turn_tracker").join("data"))
}
