// Chakra bars: equal-width columns over a diagonal gold→black wash.
//
// Each column reads one band of the audio buffer, wobbles with a sine of the
// clock, and is drawn twice: a translucent glow, then a gradient core.

use super::audio::{band_index, AudioBuffer};
use super::draw::{DrawCommand, Fill, LinearGradient, Surface};
use super::Palette;

const MIN_HEIGHT: f64 = 0.1;
const MAX_HEIGHT: f64 = 1.0;
/// Share of the surface height a full column reaches.
const HEIGHT_SCALE: f64 = 0.7;

/// Normalized height of one column, clamped to [0.1, 1.0].
pub fn column_height(clock: f64, column: usize, audio: &AudioBuffer, columns: usize) -> f64 {
    let base = audio.sample(band_index(column, audio.len(), columns));
    let animated = base + 0.2 * (clock + column as f64 * 0.3).sin();
    if animated.is_nan() {
        return MIN_HEIGHT;
    }
    animated.clamp(MIN_HEIGHT, MAX_HEIGHT)
}

/// Heights of every column for this clock value.
pub fn column_heights(clock: f64, audio: &AudioBuffer, columns: usize) -> Vec<f64> {
    (0..columns)
        .map(|i| column_height(clock, i, audio, columns))
        .collect()
}

pub fn render(
    clock: f64,
    surface: Surface,
    audio: &AudioBuffer,
    columns: usize,
    palette: &Palette,
) -> Vec<DrawCommand> {
    let (w, h) = (surface.width, surface.height);
    let mut background = LinearGradient::new((0.0, 0.0), (w, h));
    for &(offset, color) in &palette.bars_background {
        background = background.stop(offset, color);
    }
    let mut commands = vec![DrawCommand::Background(Fill::Linear(background))];

    if columns == 0 {
        return commands;
    }
    let bar_width = (w / columns as f64).floor().max(1.0);

    for (i, height) in column_heights(clock, audio, columns).into_iter().enumerate() {
        let x = i as f64 * bar_width;
        if x >= w {
            break;
        }
        let bar_px = (height * h * HEIGHT_SCALE).floor();
        let y = h - bar_px;

        commands.push(DrawCommand::Rect {
            x,
            y,
            w: bar_width - 1.0,
            h: bar_px,
            fill: Fill::Solid(palette.bar_glow),
        });

        let core = LinearGradient::new((x, y), (x, y + bar_px))
            .stop(0.0, palette.bar_top)
            .stop(1.0, palette.bar_bottom);
        commands.push(DrawCommand::Rect {
            x: x + 1.0,
            y: y + 1.0,
            w: bar_width - 3.0,
            h: bar_px - 2.0,
            fill: Fill::Linear(core),
        });
    }
    commands
}
