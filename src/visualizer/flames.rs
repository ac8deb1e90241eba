// Dragon flames: a fresh scatter of soft embers every frame. Nothing persists
// between frames, so the effect reads as flickering noise.

use rand::Rng;

use super::draw::{DrawCommand, Fill, LinearGradient, Surface};
use super::Palette;

pub fn render(
    surface: Surface,
    count: usize,
    palette: &Palette,
    rng: &mut impl Rng,
) -> Vec<DrawCommand> {
    let mut background = LinearGradient::new((0.0, 0.0), (surface.width, surface.height));
    for &(offset, color) in &palette.flames_background {
        background = background.stop(offset, color);
    }
    let mut commands = Vec::with_capacity(count + 1);
    commands.push(DrawCommand::Background(Fill::Linear(background)));

    if surface.is_empty() {
        return commands;
    }

    for _ in 0..count {
        let x = rng.random_range(0.0..surface.width);
        let y = rng.random_range(0.0..surface.height);
        let size = rng.random_range(2.0..15.0);

        let mut ember = LinearGradient::new((x, y), (x, y + size));
        for &(offset, color) in &palette.ember {
            ember = ember.stop(offset, color);
        }
        commands.push(DrawCommand::Circle {
            cx: x,
            cy: y,
            radius: size / 2.0,
            fill: Some(Fill::Linear(ember)),
            stroke: None,
        });
    }
    commands
}
