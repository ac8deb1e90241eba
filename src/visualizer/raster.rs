// Braille rasterizer: paints a Scene onto a grid of 2×4 dot cells and writes
// the result into a ratatui buffer. Alpha is emulated by blending each painted
// colour onto whatever the cell already shows.

use ratatui::{buffer::Buffer, layout::Rect};

use super::draw::{DrawCommand, Fill, Rgba, Scene, Stroke};

// Braille dot layout within a cell:
// dot 0 (0,0)  dot 3 (1,0)
// dot 1 (0,1)  dot 4 (1,1)
// dot 2 (0,2)  dot 5 (1,2)
// dot 6 (0,3)  dot 7 (1,3)
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

const BLACK: Rgba = Rgba::rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasCell {
    pub dots: u8,
    pub fg: Option<Rgba>,
    pub bg: Option<Rgba>,
}

impl CanvasCell {
    pub fn glyph(&self) -> char {
        char::from_u32(0x2800 + self.dots as u32).unwrap_or(' ')
    }
}

pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<CanvasCell>,
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            cols,
            rows,
            cells: vec![CanvasCell::default(); cols * rows],
        }
    }

    pub fn dot_width(&self) -> usize {
        self.cols * 2
    }

    pub fn dot_height(&self) -> usize {
        self.rows * 4
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&CanvasCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn paint_scene(&mut self, scene: &Scene) {
        for command in &scene.commands {
            self.paint(command);
        }
    }

    pub fn paint(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Background(fill) => self.fill_background(fill),
            DrawCommand::Rect { x, y, w, h, fill } => self.fill_rect(*x, *y, *w, *h, fill),
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                fill,
                stroke,
            } => self.circle(*cx, *cy, *radius, fill.as_ref(), stroke.as_ref()),
            DrawCommand::Line { from, to, stroke } => self.line(*from, *to, stroke),
        }
    }

    fn fill_background(&mut self, fill: &Fill) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let color = fill.color_at(col as f64 * 2.0 + 1.0, row as f64 * 4.0 + 2.0);
                self.cells[row * self.cols + col] = CanvasCell {
                    dots: 0,
                    fg: None,
                    bg: Some(color.over(BLACK)),
                };
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &Fill) {
        if !(w > 0.0 && h > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }
        let Some((x0, x1)) = clip(x, x + w, self.dot_width()) else {
            return;
        };
        let Some((y0, y1)) = clip(y, y + h, self.dot_height()) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py, fill.color_at(px as f64, py as f64));
            }
        }
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64, fill: Option<&Fill>, stroke: Option<&Stroke>) {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() || !radius.is_finite() {
            return;
        }
        let half_stroke = stroke.map_or(0.0, |s| (s.width / 2.0).max(0.5));
        let reach = radius + half_stroke;
        let Some((x0, x1)) = clip(cx - reach, cx + reach, self.dot_width()) else {
            return;
        };
        let Some((y0, y1)) = clip(cy - reach, cy + reach, self.dot_height()) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if let Some(fill) = fill {
                    if dist <= radius {
                        self.plot(px, py, fill.color_at(px as f64, py as f64));
                    }
                }
                if let Some(stroke) = stroke {
                    if (dist - radius).abs() <= half_stroke {
                        self.plot(px, py, stroke.color);
                    }
                }
            }
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) || !(stroke.width > 0.0) {
            return;
        }
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let half = (stroke.width / 2.0).max(0.5);
        let spread = half.ceil() as i64;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let (x, y) = (from.0 + dx * t, from.1 + dy * t);
            let (bx, by) = (x.floor() as i64, y.floor() as i64);
            for oy in -spread..=spread {
                for ox in -spread..=spread {
                    let (px, py) = (bx + ox, by + oy);
                    if px < 0 || py < 0 {
                        continue;
                    }
                    let ddx = px as f64 + 0.5 - x;
                    let ddy = py as f64 + 0.5 - y;
                    if (ddx * ddx + ddy * ddy).sqrt() <= half {
                        self.plot(px as usize, py as usize, stroke.color);
                    }
                }
            }
        }
    }

    fn plot(&mut self, px: usize, py: usize, color: Rgba) {
        if px >= self.dot_width() || py >= self.dot_height() || color.a == 0 {
            return;
        }
        let idx = (py / 4) * self.cols + px / 2;
        let cell = &mut self.cells[idx];
        let base = cell.fg.or(cell.bg).unwrap_or(BLACK);
        cell.fg = Some(color.over(base));
        cell.dots |= DOT_BITS[px % 2][py % 4];
    }

    /// Write the canvas into `buf` at `area`. Cells outside `area` are untouched.
    pub fn flush(&self, buf: &mut Buffer, area: Rect) {
        let rows = self.rows.min(area.height as usize);
        let cols = self.cols.min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                let c = self.cells[row * self.cols + col];
                let x = area.x + col as u16;
                let y = area.y + row as u16;
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };
                if let Some(bg) = c.bg {
                    cell.set_bg(bg.into());
                    if c.dots == 0 {
                        cell.set_char(' ');
                    }
                }
                if c.dots != 0 {
                    cell.set_char(c.glyph());
                    cell.set_fg(c.fg.unwrap_or(BLACK).into());
                }
            }
        }
    }
}

/// Clip the span [lo, hi) to [0, limit) in whole dots.
fn clip(lo: f64, hi: f64, limit: usize) -> Option<(usize, usize)> {
    let lo = lo.floor().max(0.0);
    let hi = hi.ceil().min(limit as f64);
    if !(hi > lo) {
        return None;
    }
    Some((lo as usize, hi as usize))
}

/// Rasterize `scene` straight into a buffer region.
pub fn render_scene(scene: &Scene, buf: &mut Buffer, area: Rect) {
    let mut canvas = BrailleCanvas::new(area.width, area.height);
    canvas.paint_scene(scene);
    canvas.flush(buf, area);
}
