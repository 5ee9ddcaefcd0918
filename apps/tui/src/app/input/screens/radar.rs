use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crate::views::radar::RADAR_REGIONS;
use crossterm::event::KeyCode;

pub fn handle_radar_input(app: &mut App, key: KeyCode) {
    let len = RADAR_REGIONS.len();
    match key {
        KeyCode::Right | KeyCode::Char('l') => {
            app.radar_index = wrap_increment(app.radar_index, len);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.radar_index = wrap_decrement(app.radar_index, len);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.radar_index = (app.radar_index + 2) % len;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.radar_index = (app.radar_index + len - 2) % len;
        }
        _ => {}
    }
}
