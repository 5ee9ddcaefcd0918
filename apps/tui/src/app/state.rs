use crate::config::AppConfig;
use crate::data::Dataset;
use crate::domain::{CropCategory, LandMetric};
use crate::timeline::{
    ChartId, Selection, Snapshot, Tick, TimedView, TimedViewSynchronizer, Timeline, Year,
};
use crate::views::production::{search_countries, step_zoom, Bubble, Highlight, ProductionView};
use crate::views::radar::{profiles, RadarProfile};
use crate::views::{LandUseView, RacingView};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub type FrameSlot<V> = watch::Receiver<Option<Arc<Snapshot<V>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    RacingBars,
    Production,
    LandUse,
    Radar,
}

impl AppScreen {
    pub const ALL: [Self; 4] = [Self::RacingBars, Self::Production, Self::LandUse, Self::Radar];

    pub const fn index(self) -> usize {
        match self {
            Self::RacingBars => 0,
            Self::Production => 1,
            Self::LandUse => 2,
            Self::Radar => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::RacingBars),
            1 => Some(Self::Production),
            2 => Some(Self::LandUse),
            3 => Some(Self::Radar),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::RacingBars => "Racing Bars",
            Self::Production => "Production",
            Self::LandUse => "Land Use",
            Self::Radar => "Radar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Zoom and pan over an equirectangular world map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub zoom: f64,
    /// (longitude, latitude) at the middle of the view.
    pub center: (f64, f64),
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            center: (0.0, 0.0),
        }
    }
}

impl MapViewport {
    /// Degrees moved per pan step at zoom 1.
    const PAN_STEP: f64 = 20.0;

    pub fn zoom_in(&mut self) {
        self.zoom = step_zoom(self.zoom, true);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = step_zoom(self.zoom, false);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        let step = Self::PAN_STEP / self.zoom;
        self.center.0 = dx.mul_add(step, self.center.0).clamp(-180.0, 180.0);
        self.center.1 = dy.mul_add(step, self.center.1).clamp(-90.0, 90.0);
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let half = 180.0 / self.zoom;
        [self.center.0 - half, self.center.0 + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let half = 90.0 / self.zoom;
        [self.center.1 - half, self.center.1 + half]
    }
}

/// Selection of the (untimed) production screen.
#[derive(Debug)]
pub struct ProductionState {
    pub view: ProductionView,
    pub category: CropCategory,
    pub timeline: Timeline,
    pub index: usize,
    pub highlight: Highlight,
    /// Query being typed; `None` when the search prompt is closed.
    pub search_input: Option<String>,
    pub search_query: Option<String>,
    pub viewport: MapViewport,
    pub bubbles: Vec<Bubble>,
}

impl ProductionState {
    /// Opens at the latest year of the first category.
    pub fn new(view: ProductionView) -> Self {
        let category = CropCategory::CerealsTotal;
        let timeline = view.timeline(category);
        let index = timeline.len().saturating_sub(1);
        let mut state = Self {
            view,
            category,
            timeline,
            index,
            highlight: Highlight::None,
            search_input: None,
            search_query: None,
            viewport: MapViewport::default(),
            bubbles: Vec::new(),
        };
        state.refresh();
        state
    }

    pub fn year(&self) -> Option<Year> {
        self.timeline.get(self.index)
    }

    pub fn next_year(&mut self) {
        self.index = self.timeline.next_index(self.index);
        self.refresh();
    }

    pub fn prev_year(&mut self) {
        self.index = self.timeline.prev_index(self.index);
        self.refresh();
    }

    /// Cycles the crop, keeping the year when the new crop has it.
    pub fn next_category(&mut self) {
        let year = self.year();
        self.category = self.category.next();
        self.timeline = self.view.timeline(self.category);
        self.index = year
            .and_then(|year| self.timeline.position(year))
            .unwrap_or_else(|| self.timeline.len().saturating_sub(1));
        self.refresh();
    }

    /// Highlights countries matching `query`. An empty query clears it.
    pub fn apply_search(&mut self, query: &str) {
        let matches = search_countries(&self.bubbles, query);
        if matches.is_empty() {
            self.search_query = None;
            self.highlight = Highlight::None;
        } else {
            self.search_query = Some(query.to_string());
            self.highlight = Highlight::Countries(matches);
        }
    }

    pub fn highlight_region(&mut self, highlight: Highlight) {
        self.search_query = None;
        self.highlight = highlight;
    }

    fn refresh(&mut self) {
        self.bubbles = self
            .year()
            .map(|year| self.view.bubbles(year, self.category))
            .unwrap_or_default();
        if let Some(query) = self.search_query.clone() {
            self.apply_search(&query);
        }
    }
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub config: AppConfig,
    pub load_state: LoadState,
    pub racing: Option<TimedViewSynchronizer<RacingView>>,
    pub racing_slot: Option<FrameSlot<RacingView>>,
    pub land_use: Option<TimedViewSynchronizer<LandUseView>>,
    pub land_use_slot: Option<FrameSlot<LandUseView>>,
    pub land_viewport: MapViewport,
    pub production: Option<ProductionState>,
    pub radar: Option<Vec<RadarProfile>>,
    /// Panel whose description is shown.
    pub radar_index: usize,
    pub throbber_state: ThrobberState,
    pub transition_fx: Mutex<Option<Effect>>,
    pub last_tick: Duration,
    pub last_frame: Instant,
    ticks: UnboundedSender<Tick>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("running", &self.running)
            .field("screen", &self.screen)
            .field("load_state", &self.load_state)
            .field("racing", &self.racing)
            .field("land_use", &self.land_use)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(config: AppConfig, ticks: UnboundedSender<Tick>) -> Self {
        Self {
            running: true,
            screen: AppScreen::RacingBars,
            show_help: false,
            status_message: String::new(),
            config,
            load_state: LoadState::Idle,
            racing: None,
            racing_slot: None,
            land_use: None,
            land_use_slot: None,
            land_viewport: MapViewport::default(),
            production: None,
            radar: None,
            radar_index: 0,
            throbber_state: ThrobberState::default(),
            transition_fx: Mutex::new(None),
            last_tick: Duration::ZERO,
            last_frame: Instant::now(),
            ticks,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.load_state == LoadState::Loading {
            self.throbber_state.calc_next();
        }
    }

    /// Wires the loaded tables into the charts. Tables that failed to load
    /// leave their chart unavailable; the timed charts render their first
    /// frame and start animating.
    pub fn install_dataset(&mut self, dataset: Dataset) {
        if let Some(production) = dataset.production.clone() {
            let view = RacingView::new(Arc::clone(&production));
            let mut racing = TimedViewSynchronizer::new(
                ChartId::RacingBars,
                view,
                CropCategory::CerealsTotal,
                self.config.race_interval,
                self.ticks.clone(),
            );
            self.racing_slot = Some(racing.frame_slot());
            racing.rewind();
            self.racing = Some(racing);

            self.production = Some(ProductionState::new(ProductionView::new(
                production,
                dataset.regional.clone(),
            )));
        }

        if let Some(land_use) = dataset.land_use.clone() {
            let mut sync = TimedViewSynchronizer::new(
                ChartId::LandUse,
                LandUseView::new(land_use),
                LandMetric::Fertilizer,
                self.config.land_interval,
                self.ticks.clone(),
            );
            self.land_use_slot = Some(sync.frame_slot());
            sync.rewind();
            self.land_use = Some(sync);
        }

        self.radar = dataset.scores.as_deref().map(profiles);
        info!(
            racing = self.racing.is_some(),
            land_use = self.land_use.is_some(),
            radar = self.radar.is_some(),
            "dataset installed"
        );
    }

    /// Routes a timer tick to the chart it belongs to.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        let applied = match tick.chart {
            ChartId::RacingBars => self.racing.as_mut().is_some_and(|sync| sync.on_tick(tick)),
            ChartId::LandUse => self.land_use.as_mut().is_some_and(|sync| sync.on_tick(tick)),
        };
        if !applied {
            debug!(chart = %tick.chart, generation = tick.generation, "stale tick dropped");
        }
        applied
    }

    pub fn switch_screen(&mut self, screen: AppScreen) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.status_message.clear();
        self.start_transition();
    }

    pub fn next_screen(&mut self) {
        let index = (self.screen.index() + 1) % AppScreen::ALL.len();
        if let Some(screen) = AppScreen::from_index(index) {
            self.switch_screen(screen);
        }
    }

    pub fn prev_screen(&mut self) {
        let len = AppScreen::ALL.len();
        let index = (self.screen.index() + len - 1) % len;
        if let Some(screen) = AppScreen::from_index(index) {
            self.switch_screen(screen);
        }
    }

    /// Pauses or resumes the animation of the active screen.
    pub fn toggle_animation_pause(&mut self) {
        let running = match self.screen {
            AppScreen::RacingBars => self.racing.as_mut().map(|sync| {
                sync.toggle_pause();
                sync.is_running()
            }),
            AppScreen::LandUse => self.land_use.as_mut().map(|sync| {
                sync.toggle_pause();
                sync.is_running()
            }),
            AppScreen::Production | AppScreen::Radar => None,
        };
        if let Some(running) = running {
            self.status_message = if running {
                "Animation resumed".to_string()
            } else {
                "Animation paused".to_string()
            };
        }
    }

    /// Current frame of the racing bar chart as published to its slot.
    pub fn racing_frame(&self) -> Option<Arc<Snapshot<RacingView>>> {
        self.racing_slot.as_ref().and_then(|slot| slot.borrow().clone())
    }

    pub fn land_use_frame(&self) -> Option<Arc<Snapshot<LandUseView>>> {
        self.land_use_slot.as_ref().and_then(|slot| slot.borrow().clone())
    }

    fn start_transition(&self) {
        if let Ok(mut effect) = self.transition_fx.lock() {
            *effect = Some(fx::coalesce((350, Interpolation::QuadOut)));
        }
    }

    /// Rebuilds the racing chart for a new category. Used by headless mode
    /// where no timer should run. A requested year missing from the
    /// timeline falls back to the latest year; returns whether the request
    /// was honored.
    pub fn select_racing(&mut self, category: CropCategory, year: Option<Year>) -> bool {
        let Some(sync) = self.racing.as_mut() else {
            return year.is_none();
        };
        let timeline = sync.view().timeline(category);
        let found = year.and_then(|year| timeline.position(year));
        if let (Some(requested), None) = (year, found) {
            warn!(year = requested, ?category, "requested year has no data, using the latest");
        }
        let index = found.unwrap_or_else(|| timeline.len().saturating_sub(1));
        sync.reset(timeline, Selection::new(index, category));
        sync.stop();
        year.is_none() || found.is_some()
    }
}
