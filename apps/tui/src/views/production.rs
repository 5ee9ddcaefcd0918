use crate::data::coords::{country_coords, region_of_country};
use crate::data::{ProductionRecord, RegionalRecord};
use crate::domain::{CropCategory, Region};
use crate::timeline::{Timeline, Year};
use crate::views::scale::{hex_color, ColorRamp, LinearScale};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::style::Color;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 10.0;

const TONNES_PER_MILLION: f64 = 1_000_000.0;

/// Bubble radius range in screen pixels at zoom 1.
const RADIUS_RANGE: (f64, f64) = (3.0, 30.0);
const OPACITY_RANGE: (f64, f64) = (0.5, 1.0);
const DIMMED_OPACITY: f64 = 0.1;

/// Sequential ramp per crop category.
pub const fn category_ramp(category: CropCategory) -> ColorRamp {
    match category {
        CropCategory::CerealsTotal => ColorRamp::new((0xfe, 0xe6, 0xce), (0xa6, 0x36, 0x03)),
        CropCategory::RiceMilled => ColorRamp::new((0xef, 0xed, 0xf5), (0x54, 0x27, 0x8f)),
        CropCategory::CoarseGrain => ColorRamp::new((0xe5, 0xf5, 0xe0), (0x00, 0x6d, 0x2c)),
    }
}

/// Shades of green, darkest for the largest producer.
pub fn region_color(region: Region) -> Color {
    hex_color(match region {
        Region::Asia => "#012D01",
        Region::NorthAmerica => "#104908",
        Region::Europe => "#2D6514",
        Region::SouthAmerica => "#7C9D39",
        Region::Africa => "#528124",
        Region::Oceania => "#AAB952",
    })
}

/// Blends `color` towards `background` so that `opacity` 1 keeps the color.
pub fn fade(color: Color, background: (u8, u8, u8), opacity: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => ColorRamp::new(background, (r, g, b)).at(opacity),
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub country: String,
    pub region: Option<Region>,
    pub lon: f64,
    pub lat: f64,
    /// Tonnes.
    pub value: f64,
    /// Screen pixels at zoom 1.
    pub radius: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Bubble {
    pub fn million_tonnes(&self) -> f64 {
        self.value / TONNES_PER_MILLION
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackSegment {
    pub region: Region,
    /// Million tonnes.
    pub value: f64,
    /// Offset of the segment from the left edge, million tonnes.
    pub start: f64,
    pub proportion: f64,
}

/// One region's band in the stacked area chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLayer {
    pub region: Region,
    /// Million tonnes per year, aligned with [`StackedArea::years`].
    pub values: Vec<f64>,
    /// Bottom of the band per year.
    pub baseline: Vec<f64>,
}

impl AreaLayer {
    pub fn top(&self, index: usize) -> f64 {
        self.baseline.get(index).copied().unwrap_or_default()
            + self.values.get(index).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackedArea {
    pub years: Vec<Year>,
    /// Ordered by total production, largest first (bottom of the stack).
    pub layers: Vec<AreaLayer>,
    pub max: f64,
}

impl StackedArea {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.layers.is_empty()
    }
}

/// What the production screen is currently drawing attention to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    None,
    Region(Region),
    Countries(Vec<String>),
}

impl Highlight {
    /// Opacity of a bubble under this highlight.
    pub fn bubble_opacity(&self, bubble: &Bubble) -> f64 {
        match self {
            Self::None => bubble.opacity,
            Self::Region(region) if bubble.region == Some(*region) => {
                (bubble.opacity * 1.2).min(1.0)
            }
            Self::Countries(countries) if countries.iter().any(|name| *name == bubble.country) => {
                (bubble.opacity * 1.2).min(1.0)
            }
            Self::Region(_) | Self::Countries(_) => DIMMED_OPACITY,
        }
    }

    pub fn segment_emphasized(&self, region: Region) -> bool {
        match self {
            Self::Region(selected) => *selected == region,
            Self::None | Self::Countries(_) => true,
        }
    }
}

/// Country production, regional shares and regional history for the
/// production screen.
#[derive(Debug, Clone)]
pub struct ProductionView {
    production: Arc<[ProductionRecord]>,
    regional: Option<Arc<[RegionalRecord]>>,
}

impl ProductionView {
    pub const fn new(
        production: Arc<[ProductionRecord]>,
        regional: Option<Arc<[RegionalRecord]>>,
    ) -> Self {
        Self {
            production,
            regional,
        }
    }

    pub fn timeline(&self, category: CropCategory) -> Timeline {
        production_years(&self.production, category)
    }

    pub fn bubbles(&self, year: Year, category: CropCategory) -> Vec<Bubble> {
        bubbles(&self.production, year, category)
    }

    pub fn stacked_bar(&self, year: Year, category: CropCategory) -> Vec<StackSegment> {
        self.regional
            .as_deref()
            .map(|regional| stacked_bar(regional, year, category))
            .unwrap_or_default()
    }

    pub fn stacked_area(&self, category: CropCategory) -> StackedArea {
        self.regional
            .as_deref()
            .map(|regional| stacked_area(regional, category))
            .unwrap_or_default()
    }

    pub const fn has_regional(&self) -> bool {
        self.regional.is_some()
    }
}

pub fn production_years(records: &[ProductionRecord], category: CropCategory) -> Timeline {
    Timeline::from_years(
        records
            .iter()
            .filter(|record| record.category == category)
            .map(|record| record.year),
    )
}

/// Bubbles for every country with coordinates, largest first so smaller ones
/// are drawn on top.
pub fn bubbles(records: &[ProductionRecord], year: Year, category: CropCategory) -> Vec<Bubble> {
    let located: Vec<(&ProductionRecord, (f64, f64))> = records
        .iter()
        .filter(|record| record.category == category && record.year == year)
        .filter_map(|record| Some((record, country_coords(&record.country)?)))
        .collect();

    let max = located
        .iter()
        .map(|(record, _)| record.value)
        .fold(0.0, f64::max);
    let radius = LinearScale::new((0.0, max), RADIUS_RANGE);
    let opacity = LinearScale::new((0.0, max), OPACITY_RANGE);
    let color = LinearScale::new((0.0, max), (0.0, 1.0)).clamped();
    let ramp = category_ramp(category);

    let mut bubbles: Vec<Bubble> = located
        .into_iter()
        .map(|(record, (lon, lat))| Bubble {
            country: record.country.clone(),
            region: region_of_country(&record.country),
            lon,
            lat,
            value: record.value,
            radius: radius.apply(record.value),
            opacity: opacity.apply(record.value),
            color: ramp.at(color.normalize(record.value)),
        })
        .collect();
    bubbles.sort_by(|a, b| b.value.total_cmp(&a.value));
    bubbles
}

pub fn stacked_bar(
    regional: &[RegionalRecord],
    year: Year,
    category: CropCategory,
) -> Vec<StackSegment> {
    let mut rows: Vec<(Region, f64)> = regional
        .iter()
        .filter(|record| record.category == category && record.year == year)
        .map(|record| (record.region, record.value / TONNES_PER_MILLION))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = rows.iter().map(|(_, value)| value).sum();
    let mut start = 0.0;
    rows.into_iter()
        .map(|(region, value)| {
            let segment = StackSegment {
                region,
                value,
                start,
                proportion: if total > 0.0 { value / total } else { 0.0 },
            };
            start += value;
            segment
        })
        .collect()
}

pub fn stacked_area(regional: &[RegionalRecord], category: CropCategory) -> StackedArea {
    let mut by_region: BTreeMap<Region, BTreeMap<Year, f64>> = BTreeMap::new();
    for record in regional.iter().filter(|record| record.category == category) {
        *by_region
            .entry(record.region)
            .or_default()
            .entry(record.year)
            .or_default() += record.value / TONNES_PER_MILLION;
    }

    let years: Vec<Year> = by_region
        .values()
        .flat_map(BTreeMap::keys)
        .copied()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut totals: Vec<(Region, f64)> = by_region
        .iter()
        .map(|(region, values)| (*region, values.values().sum()))
        .collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut running = vec![0.0; years.len()];
    let layers: Vec<AreaLayer> = totals
        .into_iter()
        .map(|(region, _)| {
            let series = by_region.get(&region);
            let values: Vec<f64> = years
                .iter()
                .map(|year| {
                    series
                        .and_then(|series| series.get(year))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            let baseline = running.clone();
            for (top, value) in running.iter_mut().zip(&values) {
                *top += value;
            }
            AreaLayer {
                region,
                values,
                baseline,
            }
        })
        .collect();

    let max = running.into_iter().fold(0.0, f64::max);
    StackedArea { years, layers, max }
}

/// Countries matching a fuzzy query, best match first.
pub fn search_countries(bubbles: &[Bubble], query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &str)> = bubbles
        .iter()
        .filter_map(|bubble| {
            matcher
                .fuzzy_match(&bubble.country, query)
                .map(|score| (score, bubble.country.as_str()))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .map(|(_, country)| country.to_string())
        .collect()
}

/// Zoom after one step in or out, clamped to the allowed range.
pub fn step_zoom(zoom: f64, zoom_in: bool) -> f64 {
    let next = if zoom_in { zoom * 1.5 } else { zoom / 1.5 };
    next.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production(country: &str, year: Year, value: f64) -> ProductionRecord {
        ProductionRecord {
            country: country.to_string(),
            code: None,
            year,
            unit: "Tonnes".to_string(),
            value,
            category: CropCategory::CerealsTotal,
        }
    }

    fn regional(region: Region, year: Year, value: f64) -> RegionalRecord {
        RegionalRecord {
            region,
            year,
            value,
            category: CropCategory::CerealsTotal,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn bubbles_scale_with_the_largest_producer() {
        let records = vec![
            production("China", 2020, 600_000_000.0),
            production("France", 2020, 300_000_000.0),
            production("Atlantis", 2020, 900_000_000.0),
            production("India", 2019, 500_000_000.0),
        ];

        let bubbles = bubbles(&records, 2020, CropCategory::CerealsTotal);

        assert_eq!(bubbles.len(), 2, "countries without coordinates are skipped");
        assert_eq!(bubbles[0].country, "China");
        assert_close(bubbles[0].radius, 30.0);
        assert_close(bubbles[0].opacity, 1.0);
        assert_close(bubbles[1].radius, 16.5);
        assert_close(bubbles[1].opacity, 0.75);
        assert_eq!(bubbles[0].color, Color::Rgb(0xa6, 0x36, 0x03));
        assert_eq!(bubbles[1].region, Some(Region::Europe));
    }

    #[test]
    fn stacked_bar_orders_regions_and_accumulates_offsets() {
        let rows = vec![
            regional(Region::Europe, 2020, 100_000_000.0),
            regional(Region::Asia, 2020, 300_000_000.0),
            regional(Region::Asia, 2019, 50_000_000.0),
        ];

        let segments = stacked_bar(&rows, 2020, CropCategory::CerealsTotal);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].region, Region::Asia);
        assert_close(segments[0].start, 0.0);
        assert_close(segments[0].proportion, 0.75);
        assert_close(segments[1].start, 300.0);
        assert_close(segments[1].value, 100.0);
    }

    #[test]
    fn stacked_area_fills_missing_years_with_zero() {
        let rows = vec![
            regional(Region::Asia, 2000, 10_000_000.0),
            regional(Region::Asia, 2001, 30_000_000.0),
            regional(Region::Oceania, 2001, 5_000_000.0),
        ];

        let area = stacked_area(&rows, CropCategory::CerealsTotal);

        assert_eq!(area.years, vec![2000, 2001]);
        assert_eq!(area.layers[0].region, Region::Asia);
        assert_eq!(area.layers[1].values, vec![0.0, 5.0]);
        assert_eq!(area.layers[1].baseline, vec![10.0, 30.0]);
        assert_close(area.layers[1].top(1), 35.0);
        assert_close(area.max, 35.0);
    }

    #[test]
    fn area_without_rows_is_empty() {
        let area = stacked_area(&[], CropCategory::RiceMilled);

        assert!(area.is_empty());
        assert_close(area.max, 0.0);
    }

    #[test]
    fn region_highlight_dims_other_bubbles() {
        let records = vec![
            production("China", 2020, 600_000_000.0),
            production("France", 2020, 300_000_000.0),
        ];
        let bubbles = bubbles(&records, 2020, CropCategory::CerealsTotal);
        let highlight = Highlight::Region(Region::Europe);

        assert_close(highlight.bubble_opacity(&bubbles[0]), DIMMED_OPACITY);
        assert_close(highlight.bubble_opacity(&bubbles[1]), 0.9);
        assert!(highlight.segment_emphasized(Region::Europe));
        assert!(!highlight.segment_emphasized(Region::Asia));
        assert!(Highlight::None.segment_emphasized(Region::Asia));
    }

    #[test]
    fn fuzzy_search_finds_countries() {
        let records = vec![
            production("United States", 2020, 400_000_000.0),
            production("United Kingdom", 2020, 20_000_000.0),
            production("France", 2020, 60_000_000.0),
        ];
        let bubbles = bubbles(&records, 2020, CropCategory::CerealsTotal);

        let matches = search_countries(&bubbles, "unitst");

        assert_eq!(matches.first().map(String::as_str), Some("United States"));
        assert!(!matches.iter().any(|country| country == "France"));
        assert!(search_countries(&bubbles, "  ").is_empty());
    }

    #[test]
    fn zoom_is_clamped() {
        assert_close(step_zoom(MAX_ZOOM, true), MAX_ZOOM);
        assert_close(step_zoom(MIN_ZOOM, false), MIN_ZOOM);
        assert_close(step_zoom(1.0, true), 1.5);
    }
}
