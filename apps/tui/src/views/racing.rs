use crate::data::ProductionRecord;
use crate::domain::CropCategory;
use crate::timeline::{TimedView, Timeline, Year};
use crate::views::scale::hex_color;
use ratatui::style::Color;
use std::sync::Arc;

pub const TOP_N: usize = 10;

const TONNES_PER_MILLION: f64 = 1_000_000.0;

/// Fill per rank, lightest for first place.
const RANK_COLORS: [&str; TOP_N] = [
    "#fedc97", "#d0c288", "#b5b682", "#9daa7a", "#7c9885", "#4b7b73", "#28666e", "#1b5d6b",
    "#075075", "#033f63",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RacingBar {
    /// 1-based.
    pub rank: usize,
    pub country: String,
    /// Million tonnes.
    pub value: f64,
}

impl RacingBar {
    pub fn color(&self) -> Color {
        rank_color(self.rank)
    }

    /// Label color that stays readable on the bar fill.
    pub const fn label_color(&self) -> Color {
        if self.rank > 5 {
            Color::White
        } else {
            Color::Rgb(0x33, 0x33, 0x33)
        }
    }
}

pub fn rank_color(rank: usize) -> Color {
    let index = rank.clamp(1, TOP_N) - 1;
    hex_color(RANK_COLORS[index])
}

/// Top producing countries per (year, crop category).
#[derive(Debug, Clone)]
pub struct RacingView {
    records: Arc<[ProductionRecord]>,
}

impl RacingView {
    pub const fn new(records: Arc<[ProductionRecord]>) -> Self {
        Self { records }
    }
}

impl TimedView for RacingView {
    type Category = CropCategory;
    type Frame = Vec<RacingBar>;

    fn timeline(&self, category: CropCategory) -> Timeline {
        Timeline::from_years(
            self.records
                .iter()
                .filter(|record| record.category == category)
                .map(|record| record.year),
        )
    }

    fn frame(&self, year: Year, category: CropCategory) -> Vec<RacingBar> {
        let mut rows: Vec<&ProductionRecord> = self
            .records
            .iter()
            .filter(|record| record.category == category && record.year == year && record.value > 0.0)
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));

        rows.into_iter()
            .take(TOP_N)
            .enumerate()
            .map(|(index, record)| RacingBar {
                rank: index + 1,
                country: record.country.clone(),
                value: record.value / TONNES_PER_MILLION,
            })
            .collect()
    }
}
