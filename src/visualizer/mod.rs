// Visualizer engine: mode enum, palette/config, animation clock, and the
// controller that advances the clock and dispatches each tick to a renderer.

pub mod audio;
pub mod bars;
pub mod draw;
pub mod flames;
pub mod particles;
pub mod raster;
pub mod rings;
pub mod waves;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use self::audio::AudioBuffer;
use self::draw::{Rgba, Scene, Surface};
use self::particles::ParticleSystem;

/// Rendering style. Persisted in config by its string id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum VisualizerMode {
    #[default]
    Bars,
    Rings,
    Waves,
    Flames,
    Particles,
}

impl VisualizerMode {
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Resolve a persisted id. Unknown ids fall back to the default mode.
    pub fn from_id(id: &str) -> Self {
        match id {
            "chakra_bars" => Self::Bars,
            "sharingan_circle" => Self::Rings,
            "chakra_waves" => Self::Waves,
            "dragon_flames" => Self::Flames,
            "particle_system" => Self::Particles,
            other => {
                tracing::debug!(id = other, "unknown visualizer mode, using default");
                Self::default()
            }
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Bars => "chakra_bars",
            Self::Rings => "sharingan_circle",
            Self::Waves => "chakra_waves",
            Self::Flames => "dragon_flames",
            Self::Particles => "particle_system",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bars => "Chakra Bars",
            Self::Rings => "Sharingan Circle",
            Self::Waves => "Chakra Waves",
            Self::Flames => "Dragon Flames",
            Self::Particles => "Particle System",
        }
    }

    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            Self::Bars => Self::Rings,
            Self::Rings => Self::Waves,
            Self::Waves => Self::Flames,
            Self::Flames => Self::Particles,
            Self::Particles => Self::Bars,
        }
    }
}

impl From<String> for VisualizerMode {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl From<VisualizerMode> for String {
    fn from(mode: VisualizerMode) -> Self {
        mode.id().to_string()
    }
}

/// Every colour the renderers use. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub bars_background: Vec<(f64, Rgba)>,
    pub bar_glow: Rgba,
    pub bar_top: Rgba,
    pub bar_bottom: Rgba,
    pub rings_background: Rgba,
    pub ring_even: Rgba,
    pub ring_odd: Rgba,
    pub ring_stroke: Rgba,
    pub tomoe: Rgba,
    pub waves_background: (Rgba, Rgba),
    pub wave: Rgba,
    pub flames_background: Vec<(f64, Rgba)>,
    pub ember: Vec<(f64, Rgba)>,
    pub particle_background: Rgba,
    /// Indexed by [`particles::Chakra::index`].
    pub particle_colors: [Rgba; 4],
}

impl Palette {
    pub fn chakra() -> Self {
        Self {
            bars_background: vec![
                (0.0, Rgba::hex("#FFD700")),
                (0.3, Rgba::hex("#FF4500")),
                (0.7, Rgba::hex("#800080")),
                (1.0, Rgba::hex("#000000")),
            ],
            bar_glow: Rgba::rgba(255, 215, 0, 80),
            bar_top: Rgba::rgb(255, 69, 0),
            bar_bottom: Rgba::rgb(255, 215, 0),
            rings_background: Rgba::hex("#000000"),
            ring_even: Rgba::rgb(255, 0, 0),
            ring_odd: Rgba::rgb(255, 215, 0),
            ring_stroke: Rgba::rgba(255, 255, 255, 100),
            tomoe: Rgba::rgb(255, 0, 0),
            waves_background: (Rgba::hex("#0066CC"), Rgba::hex("#000000")),
            wave: Rgba::rgb(0, 204, 255),
            flames_background: vec![
                (0.0, Rgba::hex("#DC143C")),
                (0.5, Rgba::hex("#800080")),
                (1.0, Rgba::hex("#000000")),
            ],
            ember: vec![
                (0.0, Rgba::rgba(255, 255, 255, 200)),
                (0.3, Rgba::rgba(255, 69, 0, 150)),
                (0.7, Rgba::rgba(220, 20, 60, 100)),
                (1.0, Rgba::rgba(128, 0, 128, 50)),
            ],
            particle_background: Rgba::hex("#1a1a1a"),
            particle_colors: [
                Rgba::rgb(255, 215, 0),
                Rgba::rgb(255, 69, 0),
                Rgba::rgb(220, 20, 60),
                Rgba::rgb(128, 0, 128),
            ],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::chakra()
    }
}

/// Construction-time settings for the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    /// Clock increment per tick.
    pub step: f64,
    pub sample_count: usize,
    pub bar_count: usize,
    pub particle_count: usize,
    pub flame_count: usize,
    pub palette: Palette,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            sample_count: 64,
            bar_count: 32,
            particle_count: 20,
            flame_count: 50,
            palette: Palette::chakra(),
        }
    }
}

/// Tick-driven time. `time()` after n ticks is exactly `n as f64 * step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    ticks: u64,
    step: f64,
}

impl AnimationClock {
    pub fn new(step: f64) -> Self {
        Self { ticks: 0, step }
    }

    pub fn advance(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Owns the clock, mode, audio buffer, particle system and RNG; produces one
/// [`Scene`] per tick.
pub struct Visualizer {
    config: VisualizerConfig,
    clock: AnimationClock,
    mode: VisualizerMode,
    audio: AudioBuffer,
    particles: ParticleSystem,
    rng: StdRng,
    scene: Scene,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic controller for tests and reproducible runs.
    pub fn with_seed(config: VisualizerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: VisualizerConfig, mut rng: StdRng) -> Self {
        let audio = AudioBuffer::synthetic(config.sample_count, &mut rng);
        let particles = ParticleSystem::initialize(config.particle_count, &mut rng);
        Self {
            clock: AnimationClock::new(config.step),
            mode: VisualizerMode::default(),
            audio,
            particles,
            rng,
            scene: Scene::default(),
            config,
        }
    }

    pub fn set_mode(&mut self, mode: VisualizerMode) {
        self.mode = mode;
    }

    /// Select a mode by persisted id; unknown ids select the default mode.
    pub fn set_mode_by_id(&mut self, id: &str) {
        self.set_mode(VisualizerMode::from_id(id));
    }

    pub fn mode(&self) -> VisualizerMode {
        self.mode
    }

    /// Replace the audio buffer. Empty input is ignored.
    pub fn update_audio_data(&mut self, samples: &[f64]) {
        if !self.audio.replace(samples) {
            tracing::trace!("ignoring empty audio update");
        }
    }

    /// Advance the clock and render the active mode into the stored scene.
    pub fn on_tick(&mut self, surface: Surface) {
        self.clock.advance();
        let t = self.clock.time();
        let palette = &self.config.palette;

        let commands = match self.mode {
            VisualizerMode::Bars => {
                bars::render(t, surface, &self.audio, self.config.bar_count, palette)
            }
            VisualizerMode::Rings => rings::render(t, surface, palette),
            VisualizerMode::Waves => waves::render(t, surface, palette),
            VisualizerMode::Flames => {
                flames::render(surface, self.config.flame_count, palette, &mut self.rng)
            }
            VisualizerMode::Particles => {
                self.particles.advance(&mut self.rng);
                particles::render(surface, self.particles.particles(), palette)
            }
        };

        self.scene = Scene { surface, commands };
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn audio(&self) -> &AudioBuffer {
        &self.audio
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }
}
