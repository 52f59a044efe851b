//! Room Climate API - Entry Point

use roomsense::{executable_dir, init_logging, Settings};
use storage::ReadingStore;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_dir = executable_dir()?;
    let settings = Settings::load(&base_dir)?;
    init_logging(&settings.logging)?;

    info!("=== Room climate API v{} ===", env!("CARGO_PKG_VERSION"));

    let store = ReadingStore::read_only(settings.database_path(&base_dir));
    api::run_server(&settings.api.bind, store).await?;
    Ok(())
}
