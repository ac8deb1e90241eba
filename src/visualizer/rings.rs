// Sharingan rings: five breathing concentric circles and three tomoe dots
// orbiting at 70% of the outer radius.

use std::f64::consts::TAU;

use super::draw::{DrawCommand, Fill, LinearGradient, Stroke, Surface};
use super::Palette;

pub const RING_COUNT: usize = 5;
pub const TOMOE_COUNT: usize = 3;
/// Radius swing of each ring, in dots.
const WOBBLE: f64 = 10.0;
const TOMOE_RADIUS: f64 = 5.0;

pub fn max_radius(surface: Surface) -> f64 {
    (surface.width.min(surface.height) / 3.0).floor()
}

/// Radius of ring `i` (0-based) at this clock value.
pub fn ring_radius(clock: f64, i: usize, max_radius: f64) -> f64 {
    let base = max_radius * (i + 1) as f64 / RING_COUNT as f64;
    base + WOBBLE * (clock + i as f64).sin()
}

/// Centre of tomoe `i` around (cx, cy).
pub fn tomoe_position(clock: f64, i: usize, cx: f64, cy: f64, max_radius: f64) -> (f64, f64) {
    let angle = clock + i as f64 * TAU / TOMOE_COUNT as f64;
    let orbit = max_radius * 0.7;
    (cx + orbit * angle.cos(), cy + orbit * angle.sin())
}

pub fn render(clock: f64, surface: Surface, palette: &Palette) -> Vec<DrawCommand> {
    let cx = (surface.width / 2.0).floor();
    let cy = (surface.height / 2.0).floor();
    let max_r = max_radius(surface);

    let mut commands = vec![DrawCommand::Background(Fill::Solid(palette.rings_background))];

    for i in 0..RING_COUNT {
        // A ring can swing below zero on tiny surfaces; the rasterizer skips it.
        let radius = ring_radius(clock, i, max_r);
        let tint = if i % 2 == 0 {
            palette.ring_even
        } else {
            palette.ring_odd
        };
        let gradient = LinearGradient::new((cx - radius, cy - radius), (cx + radius, cy + radius))
            .stop(0.0, tint.with_alpha(100))
            .stop(1.0, tint.with_alpha(50));
        commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            fill: Some(Fill::Linear(gradient)),
            stroke: Some(Stroke {
                color: palette.ring_stroke,
                width: 2.0,
            }),
        });
    }

    for i in 0..TOMOE_COUNT {
        let (tx, ty) = tomoe_position(clock, i, cx, cy, max_r);
        commands.push(DrawCommand::Circle {
            cx: tx.trunc(),
            cy: ty.trunc(),
            radius: TOMOE_RADIUS,
            fill: Some(Fill::Solid(palette.tomoe)),
            stroke: Some(Stroke {
                color: palette.tomoe,
                width: 3.0,
            }),
        });
    }
    commands
}
