use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_racing_input(app: &mut App, key: KeyCode) {
    let Some(racing) = app.racing.as_mut() else {
        return;
    };

    match key {
        KeyCode::Right => racing.step_forward(),
        KeyCode::Left => racing.step_back(),
        KeyCode::Home => racing.rewind(),
        KeyCode::Char('c') => {
            let category = racing.selection().category.next();
            racing.change_category(category);
            app.status_message = format!("Crop: {}", category.label());
        }
        _ => {}
    }
}
