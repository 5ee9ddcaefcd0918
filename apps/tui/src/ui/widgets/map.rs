use crate::app::MapViewport;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Map, MapResolution};
use ratatui::widgets::Block;
use ratatui::Frame;

/// Longitude degrees covered by one screen pixel of the reference map
/// (a 120-scale Mercator spans 360 degrees over ~754 px).
pub const DEGREES_PER_PIXEL: f64 = 360.0 / 754.0;

const LAND_COLOR: Color = Color::Rgb(0x99, 0x99, 0x99);

/// Marker radius in map degrees. Markers keep their on-screen size at
/// every zoom level.
pub fn marker_radius(radius_px: f64, zoom: f64) -> f64 {
    if zoom <= 0.0 {
        return radius_px * DEGREES_PER_PIXEL;
    }
    radius_px * DEGREES_PER_PIXEL / zoom
}

/// Draws the world outline for `viewport`, then `overlay` on a layer above it.
pub fn render_world_map<F>(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    viewport: &MapViewport,
    overlay: F,
) where
    F: Fn(&mut Context<'_>),
{
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: LAND_COLOR,
                resolution: MapResolution::High,
            });
            ctx.layer();
            overlay(ctx);
        });
    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_radius_shrinks_with_zoom() {
        let base = marker_radius(30.0, 1.0);

        assert!((base - 30.0 * 360.0 / 754.0).abs() < 1e-9);
        assert!((marker_radius(30.0, 2.0) - base / 2.0).abs() < 1e-9);
        assert!((marker_radius(30.0, 0.0) - base).abs() < 1e-9);
    }
}
