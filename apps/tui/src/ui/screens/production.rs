use crate::app::{App, ProductionState};
use crate::ui::widgets::charts::{render_empty, render_stacked_area, render_stacked_bar};
use crate::ui::widgets::map::{marker_radius, render_world_map};
use crate::views::production::{fade, Highlight};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::Circle;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const BACKGROUND: (u8, u8, u8) = (0x10, 0x10, 0x10);
const DETAIL_ROWS: usize = 8;

pub fn render_production(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(production) = app.production.as_ref() else {
        render_empty(f, area, block(" Production ".to_string()), "Production data unavailable");
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(DETAIL_ROWS as u16 + 2)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(6)])
        .split(columns[1]);

    render_bubble_map(production, f, left[0]);
    render_details(production, f, left[1]);

    let year_label = production
        .year()
        .map_or_else(|| "----".to_string(), |year| year.to_string());
    let bar_block = block(format!(" Regional share {year_label} "));
    let area_block = block(format!(" Regional production, {} ", production.category.label()));

    if production.view.has_regional() {
        let segments = production
            .year()
            .map(|year| production.view.stacked_bar(year, production.category))
            .unwrap_or_default();
        if segments.is_empty() {
            render_empty(f, right[0], bar_block, "No regional data for this year");
        } else {
            render_stacked_bar(f, right[0], bar_block, &segments, &production.highlight);
        }

        let stacked = production.view.stacked_area(production.category);
        if stacked.is_empty() {
            render_empty(f, right[1], area_block, "No regional data for this crop");
        } else {
            render_stacked_area(f, right[1], area_block, &stacked, &production.highlight);
        }
    } else {
        render_empty(f, right[0], bar_block, "Regional data unavailable");
        render_empty(f, right[1], area_block, "Regional data unavailable");
    }
}

fn render_bubble_map(production: &ProductionState, f: &mut Frame<'_>, area: Rect) {
    let year = production
        .year()
        .map_or_else(|| "----".to_string(), |year| year.to_string());
    let title = format!(
        " {} {year}  zoom x{:.1} ",
        production.category.label(),
        production.viewport.zoom
    );

    if production.bubbles.is_empty() {
        render_empty(f, area, block(title), "No mapped production for this year");
        return;
    }

    let zoom = production.viewport.zoom;
    let highlight = &production.highlight;
    render_world_map(f, area, block(title), &production.viewport, |ctx| {
        for bubble in &production.bubbles {
            let opacity = highlight.bubble_opacity(bubble);
            ctx.draw(&Circle {
                x: bubble.lon,
                y: bubble.lat,
                radius: marker_radius(bubble.radius, zoom),
                color: fade(bubble.color, BACKGROUND, opacity),
            });
        }
    });
}

fn render_details(production: &ProductionState, f: &mut Frame<'_>, area: Rect) {
    let mut lines: Vec<TextLine<'_>> = Vec::new();

    if let Some(input) = &production.search_input {
        lines.push(TextLine::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{input}_")),
        ]));
    }

    let focus: Vec<_> = match &production.highlight {
        Highlight::None => production.bubbles.iter().collect(),
        Highlight::Region(region) => production
            .bubbles
            .iter()
            .filter(|bubble| bubble.region == Some(*region))
            .collect(),
        Highlight::Countries(countries) => countries
            .iter()
            .filter_map(|country| {
                production
                    .bubbles
                    .iter()
                    .find(|bubble| bubble.country == *country)
            })
            .collect(),
    };

    for bubble in focus.into_iter().take(DETAIL_ROWS.saturating_sub(lines.len())) {
        lines.push(TextLine::from(vec![
            Span::styled("● ", Style::default().fg(bubble.color)),
            Span::raw(format!("{:<28}", bubble.country)),
            Span::styled(
                format!("{:>10.2} Mt", bubble.million_tonnes()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let title = match &production.highlight {
        Highlight::None => " Largest producers ".to_string(),
        Highlight::Region(region) => format!(" {} ", region.regional_name()),
        Highlight::Countries(_) => production
            .search_query
            .as_ref()
            .map_or_else(|| " Matches ".to_string(), |query| format!(" Matches for \"{query}\" ")),
    };
    f.render_widget(Paragraph::new(lines).block(block(title)), area);
}

fn block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(0x7c, 0x9d, 0x39)))
}
