//! Room Climate Logger - Main Entry Point

use roomsense::{executable_dir, init_logging, run_logger, Settings};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let base_dir = executable_dir()?;
    let settings = Settings::load(&base_dir)?;
    init_logging(&settings.logging)?;

    info!("=== Room climate logger v{} ===", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run_logger(&settings, &base_dir).await {
        error!("{:#}", err);
        return Err(err);
    }
    Ok(())
}
