use crate::timeline::{ChartId, Selection, Tick, Ticker, Timeline, Year};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::debug;

/// A dataset that can be replayed over time for one category at a time.
pub trait TimedView {
    type Category: Copy + PartialEq + fmt::Debug + Send + Sync + 'static;
    type Frame: FrameContent + fmt::Debug + Send + Sync + 'static;

    /// Years with data for `category`, ascending.
    fn timeline(&self, category: Self::Category) -> Timeline;

    /// Derives the frame for one (year, category) pair.
    fn frame(&self, year: Year, category: Self::Category) -> Self::Frame;
}

pub trait FrameContent {
    fn is_empty(&self) -> bool;
}

impl<T> FrameContent for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// What a rendering surface receives on every render. `frame` is `None`
/// when the timeline has no years at all.
#[derive(Debug)]
pub struct FrameSnapshot<C, F> {
    pub chart: ChartId,
    pub generation: u64,
    pub index: usize,
    pub year: Option<Year>,
    pub category: C,
    pub frame: Option<Arc<F>>,
}

impl<C, F: FrameContent> FrameSnapshot<C, F> {
    /// True when the surface must show its empty state.
    pub fn is_empty(&self) -> bool {
        self.frame.as_deref().map_or(true, |frame| frame.is_empty())
    }
}

pub type Snapshot<V> = FrameSnapshot<<V as TimedView>::Category, <V as TimedView>::Frame>;

type Subscriber<V> = Box<dyn FnMut(&Arc<Snapshot<V>>) + Send>;

/// Drives one chart instance through its timeline.
///
/// All state changes happen through `&mut self` on the event loop, so a tick
/// and a manual navigation can never interleave. Each `start` bumps the
/// generation; ticks carrying an older generation are ignored, which keeps a
/// tick scheduled before a reset from landing after it.
pub struct TimedViewSynchronizer<V: TimedView> {
    chart: ChartId,
    view: V,
    timeline: Timeline,
    selection: Selection<V::Category>,
    interval: Duration,
    generation: u64,
    ticker: Option<Ticker>,
    ticks: UnboundedSender<Tick>,
    subscribers: Vec<Subscriber<V>>,
    latest: Option<Arc<Snapshot<V>>>,
}

impl<V: TimedView> TimedViewSynchronizer<V> {
    /// Builds a stopped synchronizer positioned at the first year of
    /// `category`. Nothing is rendered until `reset` or a navigation.
    pub fn new(
        chart: ChartId,
        view: V,
        category: V::Category,
        interval: Duration,
        ticks: UnboundedSender<Tick>,
    ) -> Self {
        let timeline = view.timeline(category);
        Self {
            chart,
            view,
            timeline,
            selection: Selection::new(0, category),
            interval,
            generation: 0,
            ticker: None,
            ticks,
            subscribers: Vec::new(),
            latest: None,
        }
    }

    /// Registers a callback invoked with every rendered frame.
    pub fn on_frame_ready(&mut self, callback: impl FnMut(&Arc<Snapshot<V>>) + Send + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Subscribes a watch slot holding the most recent frame.
    pub fn frame_slot(&mut self) -> watch::Receiver<Option<Arc<Snapshot<V>>>> {
        let (tx, rx) = watch::channel(self.latest.clone());
        self.on_frame_ready(move |snapshot| {
            tx.send_replace(Some(Arc::clone(snapshot)));
        });
        rx
    }

    /// Starts advancing one year per interval, replacing any running timer.
    pub fn start(&mut self) {
        self.stop();
        self.generation += 1;
        self.spawn_ticker();
    }

    /// Spawns the timer for the current generation.
    fn spawn_ticker(&mut self) {
        if self.timeline.is_empty() {
            debug!(chart = %self.chart, "empty timeline, timer not started");
            return;
        }
        let ticker = Ticker::spawn(self.chart, self.generation, self.interval, self.ticks.clone());
        debug!(chart = %self.chart, generation = ticker.generation(), "timer started");
        self.ticker = Some(ticker);
    }

    /// Cancels the pending advance. A no-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!(chart = %self.chart, generation = ticker.generation(), "timer stopped");
        }
    }

    pub const fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Stops, replaces timeline and selection, renders, and starts again.
    /// The selection index is clamped to the new timeline before rendering,
    /// and the rendered frame already carries the new timer's generation.
    pub fn reset(&mut self, timeline: Timeline, selection: Selection<V::Category>) {
        self.stop();
        self.generation += 1;
        self.selection = Selection::new(timeline.clamp(selection.index), selection.category);
        self.timeline = timeline;
        self.render();
        self.spawn_ticker();
    }

    /// Restarts the current category from its first year.
    pub fn rewind(&mut self) {
        let category = self.selection.category;
        self.reset(self.view.timeline(category), Selection::new(0, category));
    }

    /// Switches category. The current year is kept when the new category has
    /// it; otherwise the index is clamped into the new timeline.
    pub fn change_category(&mut self, category: V::Category) {
        let timeline = self.view.timeline(category);
        let index = self
            .current_year()
            .and_then(|year| timeline.position(year))
            .unwrap_or(self.selection.index);
        debug!(chart = %self.chart, ?category, index, "category changed");
        self.reset(timeline, Selection::new(index, category));
    }

    /// Applies a timer tick. Returns false when the tick is stale.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if tick.chart != self.chart || tick.generation != self.generation || self.ticker.is_none()
        {
            return false;
        }
        self.selection.index = self.timeline.next_index(self.selection.index);
        self.render();
        true
    }

    /// Jumps to `index`: stops the timer, renders, and restarts the timer if
    /// it was running.
    pub fn navigate_to(&mut self, index: usize) {
        let was_running = self.is_running();
        self.stop();
        if was_running {
            self.generation += 1;
        }
        self.selection.index = self.timeline.clamp(index);
        self.render();
        if was_running {
            self.spawn_ticker();
        }
    }

    /// Jumps to `year` if the timeline contains it.
    pub fn navigate_to_year(&mut self, year: Year) -> bool {
        match self.timeline.position(year) {
            Some(index) => {
                self.navigate_to(index);
                true
            }
            None => false,
        }
    }

    pub fn step_forward(&mut self) {
        self.navigate_to(self.timeline.next_index(self.selection.index));
    }

    pub fn step_back(&mut self) {
        self.navigate_to(self.timeline.prev_index(self.selection.index));
    }

    pub fn toggle_pause(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub const fn chart(&self) -> ChartId {
        self.chart
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub const fn selection(&self) -> Selection<V::Category> {
        self.selection
    }

    pub fn current_year(&self) -> Option<Year> {
        self.timeline.get(self.selection.index)
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn latest(&self) -> Option<&Arc<Snapshot<V>>> {
        self.latest.as_ref()
    }

    fn render(&mut self) {
        let year = self.current_year();
        let category = self.selection.category;
        let frame = year.map(|year| Arc::new(self.view.frame(year, category)));
        let snapshot = Arc::new(FrameSnapshot {
            chart: self.chart,
            generation: self.generation,
            index: self.selection.index,
            year,
            category,
            frame,
        });

        for subscriber in &mut self.subscribers {
            subscriber(&snapshot);
        }
        self.latest = Some(snapshot);
    }
}

impl<V: TimedView> fmt::Debug for TimedViewSynchronizer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedViewSynchronizer")
            .field("chart", &self.chart)
            .field("timeline", &self.timeline)
            .field("selection", &self.selection)
            .field("generation", &self.generation)
            .field("running", &self.is_running())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    type Row = (Year, &'static str, u32);

    struct TableView {
        rows: Vec<Row>,
    }

    impl TimedView for TableView {
        type Category = &'static str;
        type Frame = Vec<u32>;

        fn timeline(&self, category: Self::Category) -> Timeline {
            Timeline::from_years(
                self.rows
                    .iter()
                    .filter(|(_, row_category, _)| *row_category == category)
                    .map(|(year, _, _)| *year),
            )
        }

        fn frame(&self, year: Year, category: Self::Category) -> Self::Frame {
            self.rows
                .iter()
                .filter(|(row_year, row_category, _)| *row_year == year && *row_category == category)
                .map(|(_, _, value)| *value)
                .collect()
        }
    }

    fn synchronizer(
        rows: Vec<Row>,
        category: &'static str,
    ) -> (TimedViewSynchronizer<TableView>, UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sync = TimedViewSynchronizer::new(
            ChartId::RacingBars,
            TableView { rows },
            category,
            Duration::from_millis(2000),
            tx,
        );
        (sync, rx)
    }

    fn three_years() -> Vec<Row> {
        vec![
            (2018, "rice", 1),
            (2019, "rice", 2),
            (2020, "rice", 3),
            (2018, "maize", 10),
            (2019, "maize", 20),
            (2020, "maize", 30),
        ]
    }

    fn tick(sync: &TimedViewSynchronizer<TableView>) -> Tick {
        Tick {
            chart: sync.chart(),
            generation: sync.generation(),
        }
    }

    #[tokio::test]
    async fn three_ticks_wrap_back_to_first_year() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        sync.rewind();
        assert_eq!(sync.selection().index, 0);

        for expected in [1, 2, 0] {
            assert!(sync.on_tick(tick(&sync)));
            assert_eq!(sync.selection().index, expected);
        }
        assert_eq!(sync.current_year(), Some(2018));
    }

    #[tokio::test]
    async fn tick_renders_frame_for_new_index() {
        let (mut sync, _rx) = synchronizer(three_years(), "maize");
        sync.rewind();
        sync.on_tick(tick(&sync));

        let latest = sync.latest().cloned();
        let frame = latest.as_ref().and_then(|snapshot| snapshot.frame.clone());
        assert_eq!(latest.and_then(|snapshot| snapshot.year), Some(2019));
        assert_eq!(frame.as_deref(), Some(&vec![20]));
    }

    #[tokio::test]
    async fn stop_twice_is_a_no_op() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        sync.rewind();
        assert!(sync.is_running());

        sync.stop();
        sync.stop();

        assert!(!sync.is_running());
        assert!(!sync.on_tick(tick(&sync)));
    }

    #[tokio::test]
    async fn tick_from_before_reset_is_ignored() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        sync.rewind();
        let stale = tick(&sync);

        sync.change_category("maize");
        let index = sync.selection().index;

        assert!(!sync.on_tick(stale));
        assert_eq!(sync.selection().index, index);
        assert!(sync.on_tick(tick(&sync)));
    }

    #[tokio::test]
    async fn category_change_renders_current_year_immediately() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&rendered);
        sync.on_frame_ready(move |snapshot| {
            if let Ok(mut frames) = sink.lock() {
                frames.push((snapshot.year, snapshot.category));
            }
        });

        sync.rewind();
        sync.on_tick(tick(&sync));
        sync.change_category("maize");

        let frames = rendered.lock().map(|frames| frames.clone()).unwrap_or_default();
        assert_eq!(
            frames,
            vec![
                (Some(2018), "rice"),
                (Some(2019), "rice"),
                (Some(2019), "maize")
            ]
        );
        assert!(sync.is_running());
    }

    #[tokio::test]
    async fn shorter_timeline_clamps_index() {
        let mut rows = three_years();
        rows.push((2005, "wheat", 7));
        let (mut sync, _rx) = synchronizer(rows, "rice");
        sync.rewind();
        sync.navigate_to(2);

        sync.change_category("wheat");

        assert_eq!(sync.selection().index, 0);
        assert_eq!(sync.current_year(), Some(2005));
    }

    #[tokio::test]
    async fn empty_frame_is_published_instead_of_previous() {
        let rows = vec![(2018, "rice", 1), (2019, "maize", 5)];
        let (mut sync, _rx) = synchronizer(rows, "rice");
        sync.rewind();
        assert!(sync.latest().is_some_and(|snapshot| !snapshot.is_empty()));

        // 2019 has no rice rows.
        sync.reset(Timeline::from_years([2018, 2019]), Selection::new(1, "rice"));

        let latest = sync.latest().cloned();
        assert_eq!(latest.as_ref().and_then(|snapshot| snapshot.year), Some(2019));
        assert!(latest.is_some_and(|snapshot| snapshot.is_empty()));
    }

    #[tokio::test]
    async fn empty_timeline_renders_empty_state_without_timer() {
        let (mut sync, _rx) = synchronizer(three_years(), "barley");
        sync.rewind();

        assert!(!sync.is_running());
        let latest = sync.latest().cloned();
        assert!(latest.as_ref().is_some_and(|snapshot| snapshot.year.is_none()));
        assert!(latest.is_some_and(|snapshot| snapshot.is_empty()));
    }

    #[tokio::test]
    async fn manual_navigation_restarts_timer_with_new_generation() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        sync.rewind();
        let before = sync.generation();

        assert!(sync.navigate_to_year(2020));

        assert_eq!(sync.selection().index, 2);
        assert!(sync.is_running());
        assert!(sync.generation() > before);
        assert!(!sync.navigate_to_year(1999));
    }

    #[tokio::test]
    async fn frames_after_restarts_carry_the_current_generation() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        let stamped = |sync: &TimedViewSynchronizer<TableView>| {
            sync.latest().map(|snapshot| snapshot.generation)
        };

        sync.rewind();
        assert_eq!(stamped(&sync), Some(sync.generation()));

        sync.change_category("maize");
        assert_eq!(stamped(&sync), Some(sync.generation()));

        sync.navigate_to(2);
        assert_eq!(stamped(&sync), Some(sync.generation()));

        let generation = sync.generation();
        assert!(sync.on_tick(tick(&sync)));
        assert_eq!(stamped(&sync), Some(generation));
    }

    #[tokio::test]
    async fn navigation_while_paused_stays_paused() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        sync.rewind();
        sync.toggle_pause();

        sync.step_back();

        assert_eq!(sync.selection().index, 2);
        assert!(!sync.is_running());
        sync.toggle_pause();
        assert!(sync.is_running());
    }

    #[tokio::test]
    async fn frame_slot_tracks_latest_frame() {
        let (mut sync, _rx) = synchronizer(three_years(), "rice");
        let slot = sync.frame_slot();
        assert!(slot.borrow().is_none());

        sync.rewind();
        sync.step_forward();

        let year = slot.borrow().as_ref().and_then(|snapshot| snapshot.year);
        assert_eq!(year, Some(2019));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_drives_ticks_through_the_channel() -> Result<(), Box<dyn std::error::Error>> {
        let (mut sync, mut rx) = synchronizer(three_years(), "rice");
        sync.rewind();

        for expected in [1, 2, 0] {
            let tick = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await?
                .ok_or("tick channel closed")?;
            assert!(sync.on_tick(tick));
            assert_eq!(sync.selection().index, expected);
        }
        Ok(())
    }
}
