// Chakra particle system: a fixed population of drifting points in the unit
// square that bounce off the edges and respawn in place when their life runs out.

use rand::Rng;

use super::draw::{DrawCommand, Fill, Surface};
use super::Palette;

/// Life lost per tick.
pub const LIFE_DECAY: f64 = 0.01;

/// Colour category of a particle. Indexes the four-entry particle palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chakra {
    Gold,
    Orange,
    Red,
    Purple,
}

impl Chakra {
    pub const ALL: [Chakra; 4] = [Chakra::Gold, Chakra::Orange, Chakra::Red, Chakra::Purple];

    pub fn index(self) -> usize {
        match self {
            Chakra::Gold => 0,
            Chakra::Orange => 1,
            Chakra::Red => 2,
            Chakra::Purple => 3,
        }
    }

    fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in the unit square.
    pub x: f64,
    pub y: f64,
    /// Per-tick velocity.
    pub vx: f64,
    pub vy: f64,
    /// Diameter in dots.
    pub size: f64,
    /// Remaining life, (0, 1].
    pub life: f64,
    pub chakra: Chakra,
}

impl Particle {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        Self {
            x: rng.random_range(0.0..1.0),
            y: rng.random_range(0.0..1.0),
            vx: rng.random_range(-0.02..=0.02),
            vy: rng.random_range(-0.02..=0.02),
            size: rng.random_range(2.0..=8.0),
            life: rng.random_range(0.5..=1.0),
            chakra: Chakra::random(rng),
        }
    }

    /// Reset position, life and colour; velocity and size are kept.
    fn respawn(&mut self, rng: &mut impl Rng) {
        self.x = rng.random_range(0.0..1.0);
        self.y = rng.random_range(0.0..1.0);
        self.life = rng.random_range(0.5..=1.0);
        self.chakra = Chakra::random(rng);
    }

    fn step(&mut self, rng: &mut impl Rng) {
        self.x += self.vx;
        self.y += self.vy;

        // Reflect on an outward crossing only; a particle sitting past the edge
        // on its way back in must not flip again.
        if (self.x <= 0.0 && self.vx < 0.0) || (self.x >= 1.0 && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.y <= 0.0 && self.vy < 0.0) || (self.y >= 1.0 && self.vy > 0.0) {
            self.vy = -self.vy;
        }

        self.life -= LIFE_DECAY;
        if self.life <= 0.0 {
            self.respawn(rng);
        }
    }
}

/// Fixed-size particle population. Cardinality never changes after `initialize`.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn initialize(count: usize, rng: &mut impl Rng) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::spawn(rng)).collect(),
        }
    }

    /// Take over an existing population as-is.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Advance every particle one tick. Returns the particle count.
    pub fn advance(&mut self, rng: &mut impl Rng) -> usize {
        for particle in &mut self.particles {
            particle.step(rng);
        }
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Particle mode: one soft dot per particle, alpha proportional to life.
pub fn render(surface: Surface, particles: &[Particle], palette: &Palette) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(particles.len() + 1);
    commands.push(DrawCommand::Background(Fill::Solid(palette.particle_background)));

    for p in particles {
        let alpha = (255.0 * p.life).clamp(0.0, 255.0) as u8;
        let color = palette.particle_colors[p.chakra.index()].with_alpha(alpha);
        commands.push(DrawCommand::Circle {
            cx: p.x * surface.width,
            cy: p.y * surface.height,
            radius: p.size / 2.0,
            fill: Some(Fill::Solid(color)),
            stroke: None,
        });
    }
    commands
}
