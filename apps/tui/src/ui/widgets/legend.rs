use crate::views::land_use::MetricScale;
use crate::views::scale::ColorRamp;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// `steps` solid blocks sampling the ramp from low to high.
pub fn ramp_spans(ramp: &ColorRamp, steps: usize) -> Vec<Span<'static>> {
    if steps == 0 {
        return Vec::new();
    }
    let last = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|step| {
            let color = ramp.at(step as f64 / last);
            Span::styled("█", Style::default().fg(color))
        })
        .collect()
}

pub fn metric_legend(scale: &MetricScale) -> Line<'static> {
    let (low, high) = scale.domain;
    let unit = scale.metric.unit();
    let mut spans = vec![Span::styled(
        format!("{low:.1}{unit} "),
        Style::default().fg(Color::Gray),
    )];
    spans.extend(ramp_spans(&scale.ramp, 16));
    spans.push(Span::styled(
        format!(" {high:.1}{unit}"),
        Style::default().fg(Color::Gray),
    ));
    Line::from(spans)
}

/// Position marker of `index` within `len` slots over `width` cells.
pub fn timeline_position(index: usize, len: usize, width: usize) -> usize {
    if len <= 1 || width == 0 {
        return 0;
    }
    let index = index.min(len - 1);
    index * (width - 1) / (len - 1)
}

/// A track with the first and last year at its ends and a dot at the
/// current year.
pub fn timeline_strip(years: &[i32], index: usize, width: usize) -> Line<'static> {
    let (Some(first), Some(last)) = (years.first(), years.last()) else {
        return Line::from(Span::styled("no years", Style::default().fg(Color::DarkGray)));
    };
    let first_label = format!("{first} ");
    let last_label = format!(" {last}");
    let track = width.saturating_sub(first_label.len() + last_label.len()).max(1);
    let dot = timeline_position(index, years.len(), track);

    let before = "─".repeat(dot);
    let after = "─".repeat(track.saturating_sub(dot + 1));
    Line::from(vec![
        Span::styled(first_label, Style::default().fg(Color::Gray)),
        Span::styled(before, Style::default().fg(Color::DarkGray)),
        Span::styled(
            "●",
            Style::default()
                .fg(Color::Rgb(0xfe, 0xdc, 0x97))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(after, Style::default().fg(Color::DarkGray)),
        Span::styled(last_label, Style::default().fg(Color::Gray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_spans_run_from_low_to_high() {
        let ramp = ColorRamp::new((0, 0, 0), (255, 255, 255));
        let spans = ramp_spans(&ramp, 5);

        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].style.fg, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(spans[4].style.fg, Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn timeline_dot_spans_the_track() {
        assert_eq!(timeline_position(0, 10, 20), 0);
        assert_eq!(timeline_position(9, 10, 20), 19);
        assert_eq!(timeline_position(50, 10, 20), 19);
        assert_eq!(timeline_position(3, 1, 20), 0);
    }

    #[test]
    fn timeline_strip_labels_both_ends() {
        let line = timeline_strip(&[1961, 1990, 2021], 1, 30);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();

        assert!(text.starts_with("1961 "));
        assert!(text.ends_with(" 2021"));
        assert_eq!(text.chars().count(), 30);
    }
}
