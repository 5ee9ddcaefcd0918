use crate::app::App;
use crate::ui::widgets::charts::render_empty;
use crate::ui::widgets::radar::render_radar_panel;
use crate::views::radar::description;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_radar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(profiles) = app.radar.as_ref() else {
        render_empty(
            f,
            area,
            Block::default().title(" Regional Profiles ").borders(Borders::ALL),
            "Score data unavailable",
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(5)])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(layout[0]);

    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (column, cell) in cells.iter().enumerate() {
            let index = row_index * 2 + column;
            if let Some(profile) = profiles.get(index) {
                render_radar_panel(f, *cell, profile, index == app.radar_index);
            }
        }
    }

    if let Some(profile) = profiles.get(app.radar_index) {
        let text = Paragraph::new(description(profile.region))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .title(format!(" {} ", profile.region.label()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Rgb(0xfe, 0xdc, 0x97))),
            );
        f.render_widget(text, layout[1]);
    }
}
