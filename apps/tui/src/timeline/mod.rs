// Time-indexed animation: timelines, selections, tickers and the
// synchronizer that keeps a rendering surface in step with them.

pub mod synchronizer;
pub mod ticker;

pub use synchronizer::{FrameContent, FrameSnapshot, Snapshot, TimedView, TimedViewSynchronizer};
pub use ticker::{Tick, Ticker};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub type Year = i32;

/// Identifies an animated chart instance. Ticks are addressed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    RacingBars,
    LandUse,
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RacingBars => write!(f, "racing-bars"),
            Self::LandUse => write!(f, "land-use"),
        }
    }
}

/// Ascending, de-duplicated sequence of years.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    years: Arc<[Year]>,
}

impl Timeline {
    pub fn from_years(years: impl IntoIterator<Item = Year>) -> Self {
        let years: BTreeSet<Year> = years.into_iter().collect();
        Self {
            years: years.into_iter().collect(),
        }
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Year> {
        self.years.get(index).copied()
    }

    pub fn position(&self, year: Year) -> Option<usize> {
        self.years.binary_search(&year).ok()
    }

    /// Largest valid index not above `index`; 0 for an empty timeline.
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.len().saturating_sub(1))
    }

    pub fn next_index(&self, index: usize) -> usize {
        if self.is_empty() {
            return 0;
        }
        (index + 1) % self.len()
    }

    pub fn prev_index(&self, index: usize) -> usize {
        if self.is_empty() {
            return 0;
        }
        (index + self.len() - 1) % self.len()
    }
}

/// Current position in the timeline plus the active filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<C> {
    pub index: usize,
    pub category: C,
}

impl<C> Selection<C> {
    pub const fn new(index: usize, category: C) -> Self {
        Self { index, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_are_sorted_and_deduplicated() {
        let timeline = Timeline::from_years([2020, 2018, 2019, 2018]);

        assert_eq!(timeline.years(), &[2018, 2019, 2020]);
        assert_eq!(timeline.position(2019), Some(1));
        assert_eq!(timeline.position(2021), None);
    }

    #[test]
    fn next_index_wraps_around() {
        let timeline = Timeline::from_years([2018, 2019, 2020]);

        for index in 0..timeline.len() {
            assert_eq!(timeline.next_index(index), (index + 1) % 3);
        }
        assert_eq!(timeline.prev_index(0), 2);
    }

    #[test]
    fn clamp_keeps_index_in_range() {
        let timeline = Timeline::from_years([1961, 1962]);

        assert_eq!(timeline.clamp(7), 1);
        assert_eq!(timeline.clamp(0), 0);
        assert_eq!(Timeline::default().clamp(3), 0);
        assert_eq!(Timeline::default().next_index(3), 0);
    }
}
