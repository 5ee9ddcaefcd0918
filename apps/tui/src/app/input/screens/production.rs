use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crate::domain::Region;
use crate::views::production::Highlight;
use crossterm::event::KeyCode;

pub fn is_searching(app: &App) -> bool {
    app.production
        .as_ref()
        .is_some_and(|production| production.search_input.is_some())
}

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    let Some(production) = app.production.as_mut() else {
        return;
    };
    let Some(input) = production.search_input.as_mut() else {
        return;
    };

    match key {
        KeyCode::Esc => {
            production.search_input = None;
        }
        KeyCode::Enter => {
            let query = input.clone();
            production.search_input = None;
            production.apply_search(&query);
            app.status_message = match &production.highlight {
                Highlight::Countries(countries) => {
                    format!("{} countries match \"{query}\"", countries.len())
                }
                Highlight::None | Highlight::Region(_) => format!("No country matches \"{query}\""),
            };
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(ch) => input.push(ch),
        _ => {}
    }
}

pub fn handle_production_input(app: &mut App, key: KeyCode) {
    let Some(production) = app.production.as_mut() else {
        return;
    };

    match key {
        KeyCode::Right => production.next_year(),
        KeyCode::Left => production.prev_year(),
        KeyCode::Char('c') => {
            production.next_category();
            app.status_message = format!("Crop: {}", production.category.label());
        }
        KeyCode::Char('/') => production.search_input = Some(String::new()),
        KeyCode::Char('0') | KeyCode::Esc => production.highlight_region(Highlight::None),
        KeyCode::Char(digit @ '1'..='6') => {
            let index = digit as usize - '1' as usize;
            if let Some(region) = Region::from_index(index) {
                production.highlight_region(Highlight::Region(region));
                app.status_message = format!("Highlighting {}", region.label());
            }
        }
        KeyCode::Char(']') => cycle_region(production, true),
        KeyCode::Char('[') => cycle_region(production, false),
        KeyCode::Char('+' | '=') => production.viewport.zoom_in(),
        KeyCode::Char('-') => production.viewport.zoom_out(),
        KeyCode::Char('h') => production.viewport.pan(-1.0, 0.0),
        KeyCode::Char('l') => production.viewport.pan(1.0, 0.0),
        KeyCode::Char('k') => production.viewport.pan(0.0, 1.0),
        KeyCode::Char('j') => production.viewport.pan(0.0, -1.0),
        _ => {}
    }
}

fn cycle_region(production: &mut crate::app::state::ProductionState, forward: bool) {
    let len = Region::ALL.len();
    let index = match production.highlight {
        Highlight::Region(region) => {
            let current = Region::ALL.iter().position(|r| *r == region).unwrap_or(0);
            if forward {
                wrap_increment(current, len)
            } else {
                wrap_decrement(current, len)
            }
        }
        Highlight::None | Highlight::Countries(_) => 0,
    };
    if let Some(region) = Region::from_index(index) {
        production.highlight_region(Highlight::Region(region));
    }
}
