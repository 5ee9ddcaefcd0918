use crate::app::state::{App, AppScreen, LoadState};
use crossterm::event::KeyCode;

mod help;
mod land_use;
mod production;
mod racing;
mod radar;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    // The search prompt swallows every key until it is closed.
    if production::is_searching(app) {
        production::handle_search_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if handle_global_input(app, key) {
        return;
    }

    if app.load_state != LoadState::Ready {
        return;
    }

    if help::handle_animation_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::RacingBars => racing::handle_racing_input(app, key),
        AppScreen::Production => production::handle_production_input(app, key),
        AppScreen::LandUse => land_use::handle_land_use_input(app, key),
        AppScreen::Radar => radar::handle_radar_input(app, key),
    }
}

fn handle_global_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
            true
        }
        KeyCode::Tab => {
            app.next_screen();
            true
        }
        KeyCode::BackTab => {
            app.prev_screen();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::{Dataset, LandUseRecord, ProductionRecord};
    use crate::domain::{CropCategory, LandMetric, Region};
    use crate::timeline::TimedViewSynchronizer;
    use crate::views::production::Highlight;
    use tokio::sync::mpsc;

    fn ready_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(AppConfig::default(), tx);
        let production: Vec<ProductionRecord> = [2018, 2019, 2020]
            .into_iter()
            .flat_map(|year| {
                CropCategory::ALL.into_iter().map(move |category| ProductionRecord {
                    country: "China".to_string(),
                    code: Some(156),
                    year,
                    unit: "Tonnes".to_string(),
                    value: 1_000_000.0,
                    category,
                })
            })
            .collect();
        let land_use: Vec<LandUseRecord> = [2000, 2003, 2005]
            .into_iter()
            .map(|year| LandUseRecord {
                continent: Region::Asia,
                year,
                agricultural: Some(50.0),
                fertilizer: None,
                water: Some(20.0),
            })
            .collect();
        app.install_dataset(Dataset {
            production: Some(production.into()),
            land_use: Some(land_use.into()),
            ..Dataset::default()
        });
        app.load_state = LoadState::Ready;
        app
    }

    #[tokio::test]
    async fn q_quits_from_any_screen() {
        let mut app = ready_app();
        app.screen = AppScreen::Radar;

        dispatch_input(&mut app, KeyCode::Char('q'));

        assert!(!app.running);
    }

    #[tokio::test]
    async fn help_swallows_keys_until_closed() {
        let mut app = ready_app();

        dispatch_input(&mut app, KeyCode::F(1));
        dispatch_input(&mut app, KeyCode::Tab);
        assert!(app.show_help);
        assert_eq!(app.screen, AppScreen::RacingBars);

        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[tokio::test]
    async fn arrows_navigate_racing_years_and_keep_timer_running() {
        let mut app = ready_app();

        dispatch_input(&mut app, KeyCode::Right);
        dispatch_input(&mut app, KeyCode::Right);

        assert_eq!(app.racing_frame().and_then(|frame| frame.year), Some(2020));
        assert!(app.racing.as_ref().is_some_and(TimedViewSynchronizer::is_running));

        dispatch_input(&mut app, KeyCode::Home);
        assert_eq!(app.racing_frame().map(|frame| frame.index), Some(0));
    }

    #[tokio::test]
    async fn category_key_cycles_racing_crop() {
        let mut app = ready_app();
        dispatch_input(&mut app, KeyCode::Right);

        dispatch_input(&mut app, KeyCode::Char('c'));

        let frame = app.racing_frame();
        assert_eq!(frame.as_ref().map(|frame| frame.category), Some(CropCategory::RiceMilled));
        assert_eq!(frame.as_ref().and_then(|frame| frame.year), Some(2019));
    }

    #[tokio::test]
    async fn land_use_opens_on_fertilizer_and_cycles_metrics() {
        let mut app = ready_app();
        app.screen = AppScreen::LandUse;

        let frame = app.land_use_frame();
        assert_eq!(frame.as_ref().map(|frame| frame.category), Some(LandMetric::Fertilizer));
        assert!(frame.as_ref().is_some_and(|frame| frame.is_empty()));

        dispatch_input(&mut app, KeyCode::Char('c'));
        let frame = app.land_use_frame();
        assert_eq!(frame.as_ref().map(|frame| frame.category), Some(LandMetric::Water));
        assert!(frame.as_ref().is_some_and(|frame| !frame.is_empty()));

        dispatch_input(&mut app, KeyCode::Char('c'));
        let frame = app.land_use_frame();
        assert_eq!(frame.as_ref().map(|frame| frame.category), Some(LandMetric::Agricultural));
    }

    #[tokio::test]
    async fn page_keys_jump_between_year_marks() {
        let mut app = ready_app();
        app.screen = AppScreen::LandUse;
        dispatch_input(&mut app, KeyCode::Char('c'));
        assert_eq!(app.land_use_frame().and_then(|frame| frame.year), Some(2000));

        dispatch_input(&mut app, KeyCode::PageDown);
        assert_eq!(app.land_use_frame().and_then(|frame| frame.year), Some(2005));
        assert!(app.land_use.as_ref().is_some_and(TimedViewSynchronizer::is_running));

        dispatch_input(&mut app, KeyCode::PageDown);
        assert_eq!(app.land_use_frame().and_then(|frame| frame.year), Some(2005));

        dispatch_input(&mut app, KeyCode::PageUp);
        assert_eq!(app.land_use_frame().and_then(|frame| frame.year), Some(2000));
    }

    #[tokio::test]
    async fn esc_does_not_quit() {
        let mut app = ready_app();
        app.screen = AppScreen::Production;
        dispatch_input(&mut app, KeyCode::Char('2'));

        dispatch_input(&mut app, KeyCode::Esc);

        assert!(app.running);
        assert_eq!(
            app.production.as_ref().map(|production| production.highlight.clone()),
            Some(Highlight::None)
        );
    }

    #[tokio::test]
    async fn keys_are_ignored_until_data_is_ready() {
        let mut app = ready_app();
        app.load_state = LoadState::Loading;

        dispatch_input(&mut app, KeyCode::Right);

        assert_eq!(app.racing_frame().and_then(|frame| frame.year), Some(2018));
    }

    #[tokio::test]
    async fn radar_selection_wraps_around_the_grid() {
        let mut app = ready_app();
        app.screen = AppScreen::Radar;

        dispatch_input(&mut app, KeyCode::Left);
        assert_eq!(app.radar_index, 5);
        dispatch_input(&mut app, KeyCode::Down);
        assert_eq!(app.radar_index, 1);
    }
}
