use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(
    name = "harvest-atlas",
    version,
    about = "Animated agricultural statistics in the terminal"
)]
pub struct CliArgs {
    /// Print a summary of one racing frame and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Directory holding Map1.csv, Map2.csv, Map3.csv and main_effect_scores.json
    #[arg(long = "data-dir", value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Racing bar chart step in milliseconds
    #[arg(long = "race-interval-ms", value_name = "N")]
    pub race_interval_ms: Option<u64>,

    /// Land-use map step in milliseconds
    #[arg(long = "land-interval-ms", value_name = "N")]
    pub land_interval_ms: Option<u64>,

    /// Override log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Year of the headless frame (defaults to the latest)
    #[arg(long)]
    pub year: Option<i32>,

    /// Crop category of the headless frame
    #[arg(long, value_name = "KEY")]
    pub category: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(dir) = &self.data_dir {
            std::env::set_var("DATA_DIR", dir);
        }
        if let Some(ms) = self.race_interval_ms {
            std::env::set_var("RACE_INTERVAL_MS", ms.to_string());
        }
        if let Some(ms) = self.land_interval_ms {
            std::env::set_var("LAND_INTERVAL_MS", ms.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
