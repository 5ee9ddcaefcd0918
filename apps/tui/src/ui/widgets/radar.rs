use crate::views::radar::{axis_direction, wrap_label, RadarProfile, LABEL_WIDTH};
use crate::domain::RadarDimension;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const GRID_COLOR: Color = Color::Rgb(0x55, 0x55, 0x55);
const SHAPE_COLOR: Color = Color::Rgb(0x7c, 0x98, 0x85);
const SELECTED_COLOR: Color = Color::Rgb(0xfe, 0xdc, 0x97);

/// Canvas half-extent; leaves room for axis labels outside the unit circle.
const BOUNDS: f64 = 1.6;

fn draw_polygon(ctx: &mut Context<'_>, points: &[(f64, f64)], color: Color) {
    for (index, (x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(index + 1) % points.len()];
        ctx.draw(&CanvasLine {
            x1: *x1,
            y1: *y1,
            x2,
            y2,
            color,
        });
    }
}

pub fn render_radar_panel(f: &mut Frame<'_>, area: Rect, profile: &RadarProfile, selected: bool) {
    let accent = if selected { SELECTED_COLOR } else { Color::Gray };
    let block = Block::default()
        .title(TextLine::from(Span::styled(
            format!(" {} ", profile.region.label()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    if area.width < 8 || area.height < 6 {
        f.render_widget(block, area);
        return;
    }

    let axes = RadarDimension::ALL.len();
    let extent = profile.extent();
    let rings: Vec<f64> = profile
        .scale
        .ticks()
        .into_iter()
        .filter(|tick| *tick <= extent)
        .map(|tick| tick / extent)
        .collect();
    let shape = profile.vertices();
    let shape_color = if selected { SELECTED_COLOR } else { SHAPE_COLOR };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-BOUNDS, BOUNDS])
        .y_bounds([-BOUNDS, BOUNDS])
        .paint(|ctx| {
            for ring in &rings {
                let outline: Vec<(f64, f64)> = (0..axes)
                    .map(|index| {
                        let (x, y) = axis_direction(index, axes);
                        (x * ring, y * ring)
                    })
                    .collect();
                draw_polygon(ctx, &outline, GRID_COLOR);
            }
            for index in 0..axes {
                let (x, y) = axis_direction(index, axes);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: GRID_COLOR,
                });
            }

            ctx.layer();
            draw_polygon(ctx, &shape, shape_color);

            if selected {
                for (dimension, (index, score)) in
                    RadarDimension::ALL.iter().zip(profile.scores.iter().enumerate())
                {
                    let (x, y) = axis_direction(index, axes);
                    let lines = wrap_label(dimension.label(), LABEL_WIDTH);
                    for (offset, text) in lines.iter().enumerate() {
                        let label_y = y.mul_add(1.15, -(offset as f64) * 0.2);
                        let label_x = x * 1.15 - if x < -0.1 { 0.6 } else { 0.0 };
                        ctx.print(
                            label_x,
                            label_y,
                            Span::styled(text.clone(), Style::default().fg(Color::Gray)),
                        );
                    }
                    ctx.print(
                        x * 0.5,
                        y * 0.5,
                        Span::styled(format!("{score:.2}"), Style::default().fg(shape_color)),
                    );
                }
            }
        });
    f.render_widget(canvas, area);
}
