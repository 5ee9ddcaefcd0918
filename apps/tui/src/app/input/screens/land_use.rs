use crate::app::state::App;
use crate::views::land_use::year_mark;
use crossterm::event::KeyCode;

pub fn handle_land_use_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('+' | '=') => app.land_viewport.zoom_in(),
        KeyCode::Char('-') => app.land_viewport.zoom_out(),
        KeyCode::Char('h') => app.land_viewport.pan(-1.0, 0.0),
        KeyCode::Char('l') => app.land_viewport.pan(1.0, 0.0),
        KeyCode::Char('k') => app.land_viewport.pan(0.0, 1.0),
        KeyCode::Char('j') => app.land_viewport.pan(0.0, -1.0),
        _ => {
            let Some(land_use) = app.land_use.as_mut() else {
                return;
            };
            match key {
                KeyCode::Right => land_use.step_forward(),
                KeyCode::Left => land_use.step_back(),
                KeyCode::Home => land_use.rewind(),
                KeyCode::PageDown | KeyCode::PageUp => {
                    let forward = key == KeyCode::PageDown;
                    let target = land_use
                        .current_year()
                        .and_then(|year| year_mark(land_use.timeline(), year, forward));
                    if let Some(year) = target {
                        land_use.navigate_to_year(year);
                    }
                }
                KeyCode::Char('c') => {
                    let metric = land_use.selection().category.next();
                    land_use.change_category(metric);
                    app.status_message = format!("Metric: {}", metric.label());
                }
                _ => {}
            }
        }
    }
}
