use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use harvest_atlas::app::App;
use harvest_atlas::cli::CliArgs;
use harvest_atlas::config::AppConfig;
use harvest_atlas::event::{self, HeadlessOptions};
use harvest_atlas::{logging, terminal, CropCategory};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env();

    if let Err(e) = logging::init(&config) {
        eprintln!("Logging disabled: {e}");
    }
    info!(data_dir = %config.data_dir.display(), "starting");

    let category = match args.category.as_deref() {
        Some(key) => Some(CropCategory::parse(key).ok_or_else(|| {
            eyre!("Unknown crop category '{key}'\n\n{}", CliArgs::help_text())
        })?),
        None => None,
    };

    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, tick_tx);

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        let options = HeadlessOptions {
            json: args.json,
            year: args.year,
            category,
        };
        return event::run_headless(&mut app, &options).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, tick_rx).await;
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
