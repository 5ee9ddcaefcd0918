use crate::config::AppConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the configured log file. The terminal belongs
/// to the UI, so nothing is written to stdout or stderr.
///
/// `RUST_LOG` wins over the `debug` switch.
pub fn init(config: &AppConfig) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let default_level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("harvest_atlas={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!("Failed to install log subscriber: {err}"))
}
