#[allow(clippy::module_inception)]
mod config;

pub use config::{
    AppConfig, DEFAULT_DATA_DIR, DEFAULT_LAND_INTERVAL_MS, DEFAULT_LOG_FILE,
    DEFAULT_RACE_INTERVAL_MS,
};
