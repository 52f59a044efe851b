//! Console logging setup

use crate::config::{LogFormat, LoggingSettings};
use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber. Call once per process.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let level: Level = settings
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    match settings.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
    .context("failed to set tracing subscriber")
}
