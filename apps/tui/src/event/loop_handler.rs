use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info, warn};

use crate::app::{handle_input, App, LoadState};
use crate::data::{load_dataset, Dataset};
use crate::domain::CropCategory;
use crate::timeline::{Tick, Year};
use crate::ui;

// Events of the one-shot data load
#[derive(Clone, Debug)]
enum LoadEvent {
    Start(PathBuf),
    Loaded(Dataset),
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(dir) => write!(f, "Start({dir})", dir = dir.display()),
            Self::Loaded(dataset) => write!(f, "Loaded(empty: {})", dataset.is_empty()),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: LoadState,
    event: String,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {:?} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

// Helper struct for state transitions
struct NextState(LoadState);

impl TryFrom<(LoadState, LoadEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(value: (LoadState, LoadEvent, &mut App)) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (LoadState::Idle, LoadEvent::Start(dir)) => {
                app.status_message = format!("Loading data from {}...", dir.display());
                Ok(Self(LoadState::Loading))
            }
            (LoadState::Loading, LoadEvent::Loaded(dataset)) if dataset.is_empty() => {
                let message = format!(
                    "No data could be loaded from {}",
                    app.config.data_dir.display()
                );
                app.status_message = format!("Error: {message}");
                Ok(Self(LoadState::Failed(message)))
            }
            (LoadState::Loading, LoadEvent::Loaded(dataset)) => {
                app.install_dataset(dataset);
                app.status_message.clear();
                Ok(Self(LoadState::Ready))
            }
            (from, event) => Err(StateTransitionError {
                from,
                event: event.to_string(),
            }),
        }
    }
}

fn process_event(app: &mut App, event: LoadEvent) -> std::result::Result<(), StateTransitionError> {
    let NextState(next) = NextState::try_from((app.load_state.clone(), event, &mut *app))?;
    app.load_state = next;
    Ok(())
}

/// Options of the non-interactive mode.
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub json: bool,
    pub year: Option<Year>,
    pub category: Option<CropCategory>,
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, options: &HeadlessOptions) -> Result<()> {
    let dir = app.config.data_dir.clone();
    process_event(app, LoadEvent::Start(dir.clone()))?;
    let dataset = load_dataset(&dir).await;
    process_event(app, LoadEvent::Loaded(dataset))?;

    if let Some(land_use) = app.land_use.as_mut() {
        land_use.stop();
    }

    let summary = build_headless_summary(app, options);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_headless_text(&summary);
    }

    Ok(())
}

fn build_headless_summary(app: &mut App, options: &HeadlessOptions) -> HeadlessSummary {
    let category = options.category.unwrap_or(CropCategory::CerealsTotal);
    let year_found = app.select_racing(category, options.year);

    let snapshot = app.racing_frame();
    let year = snapshot.as_ref().and_then(|snapshot| snapshot.year);
    let bars = snapshot
        .as_ref()
        .and_then(|snapshot| snapshot.frame.as_deref())
        .map(|bars| {
            bars.iter()
                .map(|bar| HeadlessBar {
                    rank: bar.rank,
                    country: bar.country.clone(),
                    million_tonnes: bar.value,
                })
                .collect()
        })
        .unwrap_or_default();

    let years = app
        .racing
        .as_ref()
        .map(|racing| racing.timeline().years().to_vec())
        .unwrap_or_default();

    HeadlessSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        data_dir: app.config.data_dir.display().to_string(),
        status: match &app.load_state {
            LoadState::Ready => match (options.year, year) {
                (Some(requested), Some(shown)) if !year_found => {
                    format!("ready (no data for {requested}, showing {shown})")
                }
                (Some(requested), None) if !year_found => {
                    format!("ready (no data for {requested})")
                }
                _ => "ready".to_string(),
            },
            LoadState::Failed(message) => message.clone(),
            LoadState::Idle | LoadState::Loading => "not loaded".to_string(),
        },
        category: category.as_str().to_string(),
        requested_year: options.year,
        year,
        first_year: years.first().copied(),
        last_year: years.last().copied(),
        top: bars,
        land_use_years: app
            .land_use
            .as_ref()
            .map_or(0, |land_use| land_use.timeline().len()),
        radar_regions: app.radar.as_ref().map_or(0, Vec::len),
    }
}

fn render_headless_text(summary: &HeadlessSummary) {
    println!("\nHarvest Atlas");
    println!("=============");
    println!("Data directory: {}", summary.data_dir);
    println!("Status: {}", summary.status);

    if let (Some(first), Some(last)) = (summary.first_year, summary.last_year) {
        println!("Years: {first}-{last}");
    }

    match summary.year {
        Some(year) => println!("\nTop producers, {} {year}:", summary.category),
        None => println!("\nNo production data for {}", summary.category),
    }
    for bar in &summary.top {
        println!(
            "{:>2}. {:<30} {:>10.1} Mt",
            bar.rank, bar.country, bar.million_tonnes
        );
    }

    println!("\nLand-use years: {}", summary.land_use_years);
    println!("Radar regions: {}", summary.radar_regions);
}

#[derive(Debug, serde::Serialize)]
struct HeadlessSummary {
    generated_at: String,
    data_dir: String,
    status: String,
    category: String,
    requested_year: Option<Year>,
    year: Option<Year>,
    first_year: Option<Year>,
    last_year: Option<Year>,
    top: Vec<HeadlessBar>,
    land_use_years: usize,
    radar_regions: usize,
}

#[derive(Debug, serde::Serialize)]
struct HeadlessBar {
    rank: usize,
    country: String,
    million_tonnes: f64,
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut ticks: UnboundedReceiver<Tick>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let dir = app.config.data_dir.clone();
    let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel();
    process_event(app, LoadEvent::Start(dir.clone()))?;
    tokio::spawn(async move {
        let dataset = load_dataset(&dir).await;
        if loaded_tx.send(dataset).is_err() {
            warn!("event loop gone before data finished loading");
        }
    });

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if let Ok(dataset) = loaded_rx.try_recv() {
            if let Err(e) = process_event(app, LoadEvent::Loaded(dataset)) {
                error!("{e}");
            } else {
                info!(state = ?app.load_state, "data load finished");
            }
        }

        // Ticks are applied here, on the only task that mutates the app.
        while let Ok(tick) = ticks.try_recv() {
            app.on_tick(tick);
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events
                }
            }
        }
    }

    if let Some(racing) = app.racing.as_mut() {
        racing.stop();
    }
    if let Some(land_use) = app.land_use.as_mut() {
        land_use.stop();
    }
    Ok(())
}
