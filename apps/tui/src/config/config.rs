use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_RACE_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_LAND_INTERVAL_MS: u64 = 1500;
pub const DEFAULT_LOG_FILE: &str = "harvest-atlas.log";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub race_interval: Duration,
    pub land_interval: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to the
    /// defaults for missing or unusable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let log_file = lookup("LOG_FILE")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        Self {
            data_dir,
            race_interval: interval(lookup("RACE_INTERVAL_MS"), DEFAULT_RACE_INTERVAL_MS),
            land_interval: interval(lookup("LAND_INTERVAL_MS"), DEFAULT_LAND_INTERVAL_MS),
            log_file,
            debug: lookup("DEBUG").is_some_and(|value| is_truthy(&value)),
        }
    }
}

fn interval(value: Option<String>, default_ms: u64) -> Duration {
    let millis = value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(default_ms);
    Duration::from_millis(millis)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
