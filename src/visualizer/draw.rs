// Drawing vocabulary shared by the mode renderers and the rasterizer.
// Renderers emit a Scene of DrawCommands in surface (dot) coordinates, y down.

use ratatui::style::Color;

/// RGB colour with an alpha channel (0 = transparent, 255 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB`. Anything else yields opaque black.
    pub fn hex(s: &str) -> Self {
        let digits = s.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Self::rgb(0, 0, 0);
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        Self::rgb(channel(0), channel(2), channel(4))
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a 0.0–1.0 factor.
    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }

    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Composite this colour over an opaque base, returning an opaque colour.
    pub fn over(self, base: Rgba) -> Rgba {
        base.lerp(self.with_alpha(255), self.opacity()).with_alpha(255)
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Linear gradient between two points with ordered colour stops in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub stops: Vec<(f64, Rgba)>,
}

impl LinearGradient {
    pub fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            from,
            to,
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push((offset, color));
        self
    }

    /// Colour at a point, projected onto the gradient axis.
    pub fn color_at(&self, x: f64, y: f64) -> Rgba {
        let Some(&(_, first)) = self.stops.first() else {
            return Rgba::rgba(0, 0, 0, 0);
        };
        let (dx, dy) = (self.to.0 - self.from.0, self.to.1 - self.from.1);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq > f64::EPSILON {
            (((x - self.from.0) * dx + (y - self.from.1) * dy) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut prev = (self.stops[0].0, first);
        for &(offset, color) in &self.stops {
            if t <= offset {
                let span = offset - prev.0;
                if span <= f64::EPSILON {
                    return color;
                }
                return prev.1.lerp(color, (t - prev.0) / span);
            }
            prev = (offset, color);
        }
        prev.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl Fill {
    pub fn color_at(&self, x: f64, y: f64) -> Rgba {
        match self {
            Fill::Solid(c) => *c,
            Fill::Linear(g) => g.color_at(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

/// One primitive of a rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Background(Fill),
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Fill,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
}

/// Size of the drawable target, in dots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Braille surface for a terminal area: 2 dots per column, 4 per row.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols as f64 * 2.0, rows as f64 * 4.0)
    }

    /// True when nothing can be drawn: under one dot, NaN or infinite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 1.0
            && self.height >= 1.0)
    }
}

/// The product of one tick: everything needed to paint a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub surface: Surface,
    pub commands: Vec<DrawCommand>,
}
