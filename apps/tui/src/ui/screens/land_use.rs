use crate::app::App;
use crate::data::coords::continent_anchor;
use crate::domain::Region;
use crate::ui::widgets::charts::render_empty;
use crate::ui::widgets::legend::{metric_legend, timeline_strip};
use crate::ui::widgets::map::{marker_radius, render_world_map};
use crate::views::land_use::NO_DATA_COLOR;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::Circle;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Continent marker size in reference pixels.
const MARKER_RADIUS: f64 = 18.0;

pub fn render_land_use(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(land_use) = app.land_use.as_ref() else {
        render_empty(f, area, map_block(" Land Use ".to_string()), "Land-use data unavailable");
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(layout[0]);

    let snapshot = app.land_use_frame();
    let metric = land_use.selection().category;
    let year = snapshot.as_ref().and_then(|snapshot| snapshot.year);
    let frame = snapshot.as_ref().and_then(|snapshot| snapshot.frame.as_deref());
    let state = if land_use.is_running() { "▶" } else { "⏸" };
    let title = format!(
        " {state} {} {} ",
        metric.label(),
        year.map_or_else(String::new, |year| year.to_string())
    );

    let viewport = app.land_viewport;
    let radius = marker_radius(MARKER_RADIUS, viewport.zoom);
    render_world_map(f, columns[0], map_block(title), &viewport, |ctx| {
        for region in Region::ALL {
            let (x, y) = continent_anchor(region);
            let color = frame.map_or(NO_DATA_COLOR, |frame| frame.color_for(region));
            for step in 1..=4 {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius * f64::from(step) / 4.0,
                    color,
                });
            }
            let label = frame
                .and_then(|frame| frame.value_for(region))
                .map_or_else(|| "no data".to_string(), |value| value.label(metric));
            ctx.print(
                x - radius,
                y - radius * 1.4,
                Span::styled(label, Style::default().fg(Color::White)),
            );
        }
    });

    let mut lines = vec![
        TextLine::from(Span::styled(
            metric.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(metric.column(), Style::default().fg(Color::Gray))),
        TextLine::from(""),
    ];
    match frame {
        Some(frame) if !frame.values.is_empty() => {
            for region in Region::ALL {
                let value = frame
                    .value_for(region)
                    .map_or_else(|| "no data".to_string(), |value| value.label(metric));
                lines.push(TextLine::from(vec![
                    Span::styled("● ", Style::default().fg(frame.color_for(region))),
                    Span::raw(format!("{:<14}{value:>12}", region.label())),
                ]));
            }
        }
        _ => lines.push(TextLine::from(Span::styled(
            "No values for this year",
            Style::default().fg(Color::Gray),
        ))),
    }
    let table = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Continents ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(table, columns[1]);

    let legend = frame
        .and_then(|frame| frame.scale.as_ref())
        .map_or_else(|| TextLine::from(""), metric_legend);
    f.render_widget(Paragraph::new(legend), layout[1]);

    let strip = timeline_strip(
        land_use.timeline().years(),
        land_use.selection().index,
        usize::from(layout[2].width),
    );
    f.render_widget(Paragraph::new(strip), layout[2]);
}

fn map_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
}
