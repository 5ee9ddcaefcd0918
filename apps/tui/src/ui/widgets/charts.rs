use crate::views::production::{region_color, Highlight, StackSegment, StackedArea};
use crate::views::RacingBar;
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

const DIMMED: Color = Color::Rgb(0x44, 0x44, 0x44);

/// Bar lengths are stored in tenths of a million tonnes.
pub fn bar_length(million_tonnes: f64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let tenths = (million_tonnes * 10.0).round().max(0.0) as u64;
    tenths
}

pub fn render_empty(f: &mut Frame<'_>, area: Rect, block: Block<'_>, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

pub fn render_racing_bars(f: &mut Frame<'_>, area: Rect, block: Block<'_>, bars: &[RacingBar]) {
    let max = bars.iter().map(|bar| bar_length(bar.value)).max().unwrap_or(1);
    let rows: Vec<Bar<'_>> = bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(bar_length(bar.value))
                .label(TextLine::from(format!("{:>2}. {}", bar.rank, bar.country)))
                .text_value(format!("{:.1} Mt", bar.value))
                .style(Style::default().fg(bar.color()))
                .value_style(Style::default().fg(bar.label_color()).bg(bar.color()))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(max.max(1))
        .data(BarGroup::default().bars(&rows));
    f.render_widget(chart, area);
}

/// Cells of a `width`-wide bar given to each segment, proportional to its
/// share. Rounding leftovers go to the largest segment.
pub fn segment_widths(segments: &[StackSegment], width: u16) -> Vec<u16> {
    let width = usize::from(width);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut widths: Vec<usize> = segments
        .iter()
        .map(|segment| (segment.proportion * width as f64).floor() as usize)
        .collect();
    let used: usize = widths.iter().sum();
    if let Some(first) = widths.first_mut() {
        *first += width.saturating_sub(used);
    }
    widths
        .into_iter()
        .map(|cells| u16::try_from(cells).unwrap_or(u16::MAX))
        .collect()
}

pub fn render_stacked_bar(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    segments: &[StackSegment],
    highlight: &Highlight,
) {
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let widths = segment_widths(segments, inner.width);
    let bar: Vec<Span<'_>> = segments
        .iter()
        .zip(&widths)
        .map(|(segment, cells)| {
            let color = if highlight.segment_emphasized(segment.region) {
                region_color(segment.region)
            } else {
                DIMMED
            };
            Span::styled(" ".repeat(usize::from(*cells)), Style::default().bg(color))
        })
        .collect();

    let mut lines = vec![TextLine::from(bar), TextLine::from("")];
    for segment in segments {
        let emphasized = highlight.segment_emphasized(segment.region);
        let style = if emphasized {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(TextLine::from(vec![
            Span::styled("■ ", Style::default().fg(region_color(segment.region))),
            Span::styled(
                format!(
                    "{:<16}{:>9.1} Mt {:>5.1}%",
                    segment.region.regional_name(),
                    segment.value,
                    segment.proportion * 100.0
                ),
                if matches!(highlight, Highlight::Region(region) if *region == segment.region) {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                },
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_stacked_area(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    stacked: &StackedArea,
    highlight: &Highlight,
) {
    let series: Vec<Vec<(f64, f64)>> = stacked
        .layers
        .iter()
        .map(|layer| {
            stacked
                .years
                .iter()
                .enumerate()
                .map(|(index, year)| (f64::from(*year), layer.top(index)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset<'_>> = stacked
        .layers
        .iter()
        .zip(&series)
        .map(|(layer, points)| {
            let color = if highlight.segment_emphasized(layer.region) {
                region_color(layer.region)
            } else {
                DIMMED
            };
            Dataset::default()
                .name(layer.region.regional_name())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(points)
        })
        .collect();

    let first = stacked.years.first().copied().unwrap_or_default();
    let last = stacked.years.last().copied().unwrap_or_default();
    let max = if stacked.max > 0.0 { stacked.max } else { 1.0 };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([f64::from(first), f64::from(last.max(first + 1))])
                .labels([first.to_string(), last.to_string()]),
        )
        .y_axis(
            Axis::default()
                .title("Mt")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max])
                .labels(["0".to_string(), format!("{max:.0}")]),
        );
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Region;

    fn segment(region: Region, proportion: f64) -> StackSegment {
        StackSegment {
            region,
            value: proportion * 100.0,
            start: 0.0,
            proportion,
        }
    }

    #[test]
    fn segment_widths_fill_the_bar() {
        let segments = [
            segment(Region::Asia, 0.55),
            segment(Region::Europe, 0.3),
            segment(Region::Africa, 0.15),
        ];

        let widths = segment_widths(&segments, 33);

        assert_eq!(widths.iter().sum::<u16>(), 33);
        assert!(widths[0] >= widths[1]);
    }

    #[test]
    fn bar_length_is_in_tenths() {
        assert_eq!(bar_length(12.34), 123);
        assert_eq!(bar_length(-1.0), 0);
    }
}
