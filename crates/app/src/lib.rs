//! Room Climate Logger
//!
//! Wires the DHT11 sensor, the validator and the SQLite store into the
//! acquisition loop, and hosts the settings and logging setup shared by
//! the logger and API binaries.

mod config;
mod logging;
mod sensor;

pub use config::{
    ApiSettings, LogFormat, LoggingSettings, SensorKind, SensorSettings, Settings,
    StorageSettings, SETTINGS_FILE,
};
pub use logging::init_logging;
pub use sensor::AnySensor;

use acquisition::AcquisitionLoop;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use storage::ReadingStore;

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("executable has no parent directory")
}

/// Initialize the store, then sample forever.
///
/// Returns only when the store cannot be initialized.
pub async fn run_logger(settings: &Settings, base_dir: &Path) -> Result<()> {
    let store = ReadingStore::new(settings.database_path(base_dir));
    store.initialize().await.with_context(|| {
        format!(
            "failed to initialize readings store {}",
            store.path().display()
        )
    })?;

    let mut acquisition = AcquisitionLoop::new(
        AnySensor::from_settings(&settings.sensor),
        store,
        settings.validation,
        settings.acquisition.clone(),
    );
    acquisition.run().await;
    Ok(())
}
