use crate::data::LandUseRecord;
use crate::domain::{LandMetric, Region};
use crate::timeline::{FrameContent, TimedView, Timeline, Year};
use crate::views::scale::{ColorRamp, LinearScale, LogScale};
use ratatui::style::Color;
use std::sync::Arc;

/// Spacing of the year marks the land map can jump between.
pub const YEAR_MARK_STEP: Year = 5;

/// Nearest year mark (a multiple of `YEAR_MARK_STEP` present in `timeline`)
/// after `year`, or before it when `forward` is false.
pub fn year_mark(timeline: &Timeline, year: Year, forward: bool) -> Option<Year> {
    let mut marks = timeline
        .years()
        .iter()
        .copied()
        .filter(|mark| mark.rem_euclid(YEAR_MARK_STEP) == 0);
    if forward {
        marks.find(|mark| *mark > year)
    } else {
        marks.filter(|mark| *mark < year).last()
    }
}

/// Fill for continents without a value.
pub const NO_DATA_COLOR: Color = Color::Rgb(0xf0, 0xf0, 0xf0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorScale {
    Linear(LinearScale),
    Log(LogScale),
}

impl ColorScale {
    fn normalize(&self, value: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.normalize(value),
            Self::Log(scale) => scale.normalize(value),
        }
    }
}

/// Color treatment of one metric for one year's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricScale {
    pub metric: LandMetric,
    pub domain: (f64, f64),
    pub ramp: ColorRamp,
    scale: ColorScale,
}

impl MetricScale {
    /// Builds the scale from the observed value range.
    pub fn for_values(metric: LandMetric, min: f64, max: f64) -> Self {
        let (domain, ramp) = match metric {
            LandMetric::Agricultural => (
                ((min * 0.8).max(0.0), (max * 1.2).min(100.0)),
                ColorRamp::new((0xff, 0xfd, 0xe7), (0x8b, 0x45, 0x13)),
            ),
            LandMetric::Fertilizer => (
                (min.max(1.0), max),
                ColorRamp::new((0xe8, 0xf5, 0xe9), (0x1b, 0x5e, 0x20)),
            ),
            LandMetric::Water => (
                (0.0, max.max(100.0)),
                ColorRamp::new((0xe3, 0xf2, 0xfd), (0x01, 0x57, 0x9b)),
            ),
        };
        let scale = match metric {
            LandMetric::Fertilizer => ColorScale::Log(LogScale::new(domain)),
            LandMetric::Agricultural | LandMetric::Water => {
                ColorScale::Linear(LinearScale::new(domain, (0.0, 1.0)).clamped())
            }
        };
        Self {
            metric,
            domain,
            ramp,
            scale,
        }
    }

    pub fn color(&self, value: f64) -> Color {
        if value.abs() < f64::EPSILON {
            return self.ramp.low_color();
        }
        let value = match self.metric {
            LandMetric::Fertilizer => value.max(1.0),
            LandMetric::Agricultural | LandMetric::Water => value.max(0.0),
        };
        self.ramp.at(self.scale.normalize(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinentValue {
    pub region: Region,
    pub value: f64,
    pub color: Color,
}

impl ContinentValue {
    pub fn label(&self, metric: LandMetric) -> String {
        format!("{:.1}{}", self.value, metric.unit())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandUseFrame {
    pub metric: LandMetric,
    pub values: Vec<ContinentValue>,
    pub scale: Option<MetricScale>,
}

impl LandUseFrame {
    pub fn value_for(&self, region: Region) -> Option<&ContinentValue> {
        self.values.iter().find(|value| value.region == region)
    }

    pub fn color_for(&self, region: Region) -> Color {
        self.value_for(region).map_or(NO_DATA_COLOR, |value| value.color)
    }
}

impl FrameContent for LandUseFrame {
    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Continental land indicators replayed over the years.
#[derive(Debug, Clone)]
pub struct LandUseView {
    records: Arc<[LandUseRecord]>,
}

impl LandUseView {
    pub const fn new(records: Arc<[LandUseRecord]>) -> Self {
        Self { records }
    }
}

impl TimedView for LandUseView {
    type Category = LandMetric;
    type Frame = LandUseFrame;

    fn timeline(&self, metric: LandMetric) -> Timeline {
        Timeline::from_years(
            self.records
                .iter()
                .filter(|record| record.metric(metric).is_some())
                .map(|record| record.year),
        )
    }

    fn frame(&self, year: Year, metric: LandMetric) -> LandUseFrame {
        let observed: Vec<(Region, f64)> = Region::ALL
            .into_iter()
            .filter_map(|region| {
                let record = self
                    .records
                    .iter()
                    .find(|record| record.year == year && record.continent == region)?;
                Some((region, record.metric(metric)?))
            })
            .collect();

        if observed.is_empty() {
            return LandUseFrame {
                metric,
                values: Vec::new(),
                scale: None,
            };
        }

        let min = observed.iter().map(|(_, value)| *value).fold(f64::INFINITY, f64::min);
        let max = observed
            .iter()
            .map(|(_, value)| *value)
            .fold(f64::NEG_INFINITY, f64::max);
        let scale = MetricScale::for_values(metric, min, max);

        let values = observed
            .into_iter()
            .map(|(region, value)| ContinentValue {
                region,
                value,
                color: scale.color(value),
            })
            .collect();

        LandUseFrame {
            metric,
            values,
            scale: Some(scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(continent: Region, year: Year, agricultural: Option<f64>, fertilizer: Option<f64>) -> LandUseRecord {
        LandUseRecord {
            continent,
            year,
            agricultural,
            fertilizer,
            water: None,
        }
    }

    fn view() -> LandUseView {
        LandUseView::new(
            vec![
                record(Region::Asia, 1960, Some(40.0), None),
                record(Region::Europe, 1960, Some(50.0), Some(80.0)),
                record(Region::Africa, 1965, Some(38.0), Some(5.0)),
                record(Region::Oceania, 1965, Some(0.0), Some(0.5)),
            ]
            .into(),
        )
    }

    #[test]
    fn year_marks_skip_years_off_the_grid() {
        let timeline = Timeline::from_years([1960, 1961, 1962, 1965, 1968, 1970]);

        assert_eq!(year_mark(&timeline, 1961, true), Some(1965));
        assert_eq!(year_mark(&timeline, 1965, true), Some(1970));
        assert_eq!(year_mark(&timeline, 1970, true), None);
        assert_eq!(year_mark(&timeline, 1968, false), Some(1965));
        assert_eq!(year_mark(&timeline, 1960, false), None);
    }

    #[test]
    fn timeline_only_lists_years_with_the_metric() {
        let view = view();

        assert_eq!(view.timeline(LandMetric::Agricultural).years(), &[1960, 1965]);
        assert_eq!(view.timeline(LandMetric::Fertilizer).years(), &[1960, 1965]);
        assert!(view.timeline(LandMetric::Water).is_empty());
    }

    #[test]
    fn missing_continents_are_skipped() {
        let frame = view().frame(1960, LandMetric::Fertilizer);

        assert_eq!(frame.values.len(), 1);
        assert_eq!(frame.values[0].region, Region::Europe);
        assert_eq!(frame.color_for(Region::Asia), NO_DATA_COLOR);
    }

    #[test]
    fn agricultural_domain_is_padded_and_capped() {
        let frame = view().frame(1960, LandMetric::Agricultural);
        let scale = frame.scale.as_ref().map(|scale| scale.domain);

        assert_eq!(scale, Some((32.0, 60.0)));
        let europe = frame.value_for(Region::Europe).map(|value| value.label(LandMetric::Agricultural));
        assert_eq!(europe.as_deref(), Some("50.0%"));
    }

    #[test]
    fn fertilizer_uses_log_domain_floored_at_one() {
        let frame = view().frame(1965, LandMetric::Fertilizer);
        let scale = frame.scale.as_ref().map(|scale| scale.domain);

        assert_eq!(scale, Some((1.0, 5.0)));
        // 0.5 kg/ha is lifted to the floor and takes the low color.
        let ramp = frame.scale.map(|scale| scale.ramp);
        assert_eq!(
            Some(frame.color_for(Region::Oceania)),
            ramp.map(|ramp| ramp.low_color())
        );
        assert_eq!(
            Some(frame.color_for(Region::Africa)),
            ramp.map(|ramp| ramp.high_color())
        );
    }

    #[test]
    fn zero_value_takes_low_end_of_range() {
        let frame = view().frame(1965, LandMetric::Agricultural);
        let low = frame.scale.map(|scale| scale.ramp.low_color());

        assert_eq!(Some(frame.color_for(Region::Oceania)), low);
    }

    #[test]
    fn water_domain_spans_at_least_one_hundred() {
        let scale = MetricScale::for_values(LandMetric::Water, 2.0, 40.0);

        assert_eq!(scale.domain, (0.0, 100.0));
        assert_eq!(scale.color(100.0), scale.ramp.high_color());
    }

    #[test]
    fn year_without_rows_is_empty() {
        let frame = view().frame(1970, LandMetric::Agricultural);

        assert!(frame.is_empty());
        assert!(frame.scale.is_none());
    }
}
