use std::path::PathBuf;

use color_eyre::eyre::Result;
use turn_tracker::{
    AppError, FileStorage, Settings, Tracker, app::App, logging, settings::default_data_dir,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // First argument overrides the data directory.
    let data_dir = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => default_data_dir().ok_or(AppError::NoHomeDir)?,
    };

    // Logger first, so settings fallbacks are recorded.
    logging::init(&data_dir)?;
    let settings = Settings::load_or_init(&data_dir);
    logging::set_debug(settings.debug_mode);
    log::info!(
        "Turn tracker start: {} (data in {})",
        chrono::Local::now(),
        data_dir.display()
    );

    let tracker = Tracker::load(FileStorage::new(&data_dir), &settings);
    let mut app = App::new(tracker);
    app.run().await
}
