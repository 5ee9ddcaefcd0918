// Rendering for the dashboard: a tab bar, the active chart screen, a status
// line and the shortcut strip.

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen, LoadState};
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

const ACCENT: Color = Color::Rgb(0x7c, 0x9d, 0x39);

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(app, f, layout[0]);

    match &app.load_state {
        LoadState::Ready => {
            render_screen(app, f, layout[1]);
            render_transition(app, f, layout[1]);
        }
        LoadState::Idle | LoadState::Loading => render_loading(app, f, layout[1]),
        LoadState::Failed(message) => render_failed(f, layout[1], message),
    }

    render_status(app, f, layout[2]);
    render_shortcuts(app, f, layout[3]);

    if app.show_help {
        render_help(f);
    }
}

fn render_screen(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.screen {
        AppScreen::RacingBars => screens::racing::render_racing(app, f, area),
        AppScreen::Production => screens::production::render_production(app, f, area),
        AppScreen::LandUse => screens::land_use::render_land_use(app, f, area),
        AppScreen::Radar => screens::radar::render_radar(app, f, area),
    }
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = AppScreen::ALL
        .iter()
        .map(|screen| TextLine::from(screen.title()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Harvest Atlas ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .select(app.screen.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(0xfe, 0xdc, 0x97))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_transition(app: &App, f: &mut Frame<'_>, area: Rect) {
    if let Ok(mut slot) = app.transition_fx.lock() {
        if let Some(effect) = slot.as_mut() {
            f.buffer_mut().render_effect(effect, area, app.last_tick);
            if effect.done() {
                *slot = None;
            }
        }
    }
}

fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = Rect {
        x: inner.x + inner.width.saturating_sub(40) / 2,
        y: inner.y + inner.height / 2,
        width: inner.width.min(40),
        height: 1.min(inner.height),
    };
    let throbber = Throbber::default()
        .label(format!("Loading data from {}", app.config.data_dir.display()))
        .style(Style::default().fg(Color::Gray))
        .throbber_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX);
    let mut state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, line, &mut state);
}

fn render_failed(f: &mut Frame<'_>, area: Rect, message: &str) {
    let text = Text::from(vec![
        TextLine::from(Span::styled(
            "Unable to load data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(message.to_string()),
        TextLine::from(""),
        TextLine::from("Check DATA_DIR or pass --data-dir, then restart."),
    ]);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(paragraph, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let paragraph = Paragraph::new(Span::styled(app.status_message.as_str(), style)).block(block);
    f.render_widget(paragraph, area);
}

fn shortcut(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(action),
    ]
}

fn shortcuts_line(screen: AppScreen) -> TextLine<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.extend(shortcut("Tab", ": Next chart   "));
    match screen {
        AppScreen::RacingBars => {
            spans.extend(shortcut("Space", ": Pause   "));
            spans.extend(shortcut("←/→", ": Year   "));
            spans.extend(shortcut("c", ": Crop   "));
        }
        AppScreen::Production => {
            spans.extend(shortcut("←/→", ": Year   "));
            spans.extend(shortcut("/", ": Search   "));
            spans.extend(shortcut("1-6", ": Region   "));
        }
        AppScreen::LandUse => {
            spans.extend(shortcut("Space", ": Pause   "));
            spans.extend(shortcut("+/-", ": Zoom   "));
            spans.extend(shortcut("PgUp/PgDn", ": 5 years   "));
            spans.extend(shortcut("c", ": Metric   "));
        }
        AppScreen::Radar => {
            spans.extend(shortcut("Arrows", ": Select region   "));
        }
    }
    spans.extend(shortcut("F1", ": Help   "));
    spans.extend(shortcut("q", ": Quit"));
    TextLine::from(spans)
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(shortcuts_line(app.screen)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

const HELP_ENTRIES: [(&str, &str); 17] = [
    ("Tab / Shift+Tab", "Switch chart"),
    ("Space", "Pause or resume the animation"),
    ("← / →", "Step one year"),
    ("Home", "Rewind to the first year"),
    ("c", "Next crop category or land metric"),
    ("/", "Search countries (production)"),
    ("0 / Esc", "Clear highlight (production)"),
    ("1-6", "Highlight a region (production)"),
    ("[ / ]", "Cycle highlighted region (production)"),
    ("+ / -", "Zoom the map"),
    ("h j k l", "Pan the map"),
    ("Arrows", "Select a region (radar)"),
    ("Enter", "Apply search"),
    ("Esc", "Cancel search or close help"),
    ("PgUp / PgDn", "Jump between 5-year marks (land use)"),
    ("F1 / ?", "Toggle this help"),
    ("q", "Quit"),
];

fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let lines: Vec<TextLine<'_>> = HELP_ENTRIES
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(
                    format!("{key:<18}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn failed_load_shows_the_error() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(AppConfig::default(), tx);
        app.load_state = LoadState::Failed("nothing here".to_string());
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;

        terminal.draw(|f| ui(&app, f))?;

        let text = buffer_text(&terminal);
        assert!(text.contains("Unable to load data"));
        assert!(text.contains("Racing Bars"));
        Ok(())
    }

    #[test]
    fn help_popup_lists_shortcuts() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(AppConfig::default(), tx);
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 40))?;

        terminal.draw(|f| ui(&app, f))?;

        assert!(buffer_text(&terminal).contains("Toggle this help"));
        Ok(())
    }

    #[tokio::test]
    async fn every_screen_renders_loaded_data() -> Result<(), Box<dyn std::error::Error>> {
        use crate::data::{Dataset, LandUseRecord, ProductionRecord, RegionalRecord, ScoreTable};
        use crate::domain::{CropCategory, Region};
        use std::collections::BTreeMap;
        use std::sync::Arc;

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(AppConfig::default(), tx);
        let production: Vec<ProductionRecord> = ["China", "India", "France"]
            .into_iter()
            .map(|country| ProductionRecord {
                country: country.to_string(),
                code: None,
                year: 2020,
                unit: "Tonnes".to_string(),
                value: 2.0e8,
                category: CropCategory::CerealsTotal,
            })
            .collect();
        let regional = vec![RegionalRecord {
            region: Region::Asia,
            year: 2020,
            value: 1.2e9,
            category: CropCategory::CerealsTotal,
        }];
        let land_use = vec![LandUseRecord {
            continent: Region::Europe,
            year: 2020,
            agricultural: Some(40.0),
            fertilizer: Some(120.0),
            water: Some(5.0),
        }];
        let mut raw = BTreeMap::new();
        raw.insert(
            "Asia".to_string(),
            BTreeMap::from([("Land Use".to_string(), 0.4)]),
        );
        app.install_dataset(Dataset {
            production: Some(production.into()),
            regional: Some(regional.into()),
            land_use: Some(land_use.into()),
            scores: Some(Arc::new(ScoreTable::from_raw(raw))),
        });
        app.load_state = LoadState::Ready;
        let mut terminal = Terminal::new(TestBackend::new(140, 48))?;

        for screen in AppScreen::ALL {
            app.screen = screen;
            terminal.draw(|f| ui(&app, f))?;
        }

        assert!(buffer_text(&terminal).contains("Europe"));
        Ok(())
    }
}
