// Chakra waves: three superimposed sine traces over a blue→black wash.
// Layer n has n× amplitude and frequency, a phase offset of n, and fades.

use super::draw::{DrawCommand, Fill, LinearGradient, Stroke, Surface};
use super::Palette;

pub const LAYERS: usize = 3;
/// Horizontal distance between sampled points, in dots.
pub const SAMPLE_STEP: usize = 5;

/// Sampled points of one wave layer.
pub fn layer_points(clock: f64, surface: Surface, layer: usize) -> Vec<(f64, f64)> {
    if surface.is_empty() {
        return Vec::new();
    }
    let scale = (layer + 1) as f64;
    let amplitude = surface.height * 0.1 * scale;
    let frequency = 0.02 * scale;
    let mid = (surface.height / 2.0).floor();
    let width = surface.width as usize;

    (0..width)
        .step_by(SAMPLE_STEP)
        .map(|x| {
            let x = x as f64;
            (x, mid + amplitude * (frequency * x + clock + layer as f64).sin())
        })
        .collect()
}

pub fn render(clock: f64, surface: Surface, palette: &Palette) -> Vec<DrawCommand> {
    let background = LinearGradient::new((0.0, 0.0), (surface.width, surface.height))
        .stop(0.0, palette.waves_background.0)
        .stop(1.0, palette.waves_background.1);
    let mut commands = vec![DrawCommand::Background(Fill::Linear(background))];

    for layer in 0..LAYERS {
        let points = layer_points(clock, surface, layer);
        let stroke = Stroke {
            color: palette.wave.with_alpha(150 - layer as u8 * 30),
            width: (3 - layer) as f64,
        };
        commands.extend(points.windows(2).map(|pair| DrawCommand::Line {
            from: pair[0],
            to: pair[1],
            stroke,
        }));
    }
    commands
}
