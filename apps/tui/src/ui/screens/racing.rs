use crate::app::App;
use crate::ui::widgets::charts::{render_empty, render_racing_bars};
use crate::ui::widgets::legend::timeline_strip;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_racing(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(racing) = app.racing.as_ref() else {
        render_empty(
            f,
            area,
            chart_block(" Top Producers "),
            "Production data unavailable",
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let snapshot = app.racing_frame();
    let category = racing.selection().category;
    let year = snapshot.as_ref().and_then(|snapshot| snapshot.year);

    let state = if racing.is_running() { "▶" } else { "⏸" };
    let header = TextLine::from(vec![
        Span::styled(
            format!("{state} {}", category.label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            year.map_or_else(|| "----".to_string(), |year| year.to_string()),
            Style::default()
                .fg(Color::Rgb(0xfe, 0xdc, 0x97))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   million tonnes", Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(header), layout[0]);

    let block = chart_block(" Top 10 Producing Countries ");
    match snapshot.as_ref().and_then(|snapshot| snapshot.frame.as_deref()) {
        Some(bars) if !bars.is_empty() => render_racing_bars(f, layout[1], block, bars),
        _ => render_empty(f, layout[1], block, "No production recorded for this year"),
    }

    let strip = timeline_strip(
        racing.timeline().years(),
        racing.selection().index,
        usize::from(layout[2].width),
    );
    f.render_widget(Paragraph::new(strip), layout[2]);
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}
