use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const LOG_FILE: &str = "log.txt";

#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format_entry(record);
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

fn format_entry(record: &Record) -> String {
    format!(
        "[{}] {} - {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.args()
    )
}

/// Installs the process-wide file logger writing to `<log_dir>/log.txt`.
///
/// Starts at `Info`; call [`set_debug`] once settings are known.
pub fn init(log_dir: &Path) -> Result<(), AppError> {
    create_dir_all(log_dir)?;

    LOGGER
        .set(FileLogger {
            log_file: log_dir.join(LOG_FILE),
        })
        .map_err(|_| AppError::LoggerAlreadySet)?;

    let logger = LOGGER.get().ok_or(AppError::LoggerAlreadySet)?;
    log::set_logger(logger).map_err(|_| AppError::LoggerAlreadySet)?;
    log::set_max_level(level_for(false));
    Ok(())
}

pub fn set_debug(debug: bool) {
    log::set_max_level(level_for(debug));
}

fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_carry_level_and_message() {
        let entry = format_entry(
            &Record::builder()
                .args(format_args!("turn ended"))
                .level(log::Level::Info)
                .build(),
        );
        assert!(entry.ends_with("INFO - turn ended\n"));
        assert!(entry.starts_with('['));
    }

    #[test]
    fn debug_setting_raises_the_level_after_init() {
        set_debug(true);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        set_debug(false);
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
