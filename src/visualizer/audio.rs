// Stand-in spectrum for the bar renderer. There is no analysis pipeline: the
// buffer holds synthetic noise until a caller supplies samples.

use rand::Rng;

/// Magnitude used wherever a sample is missing.
pub const DEFAULT_MAGNITUDE: f64 = 0.3;

/// Fixed-length array of normalized magnitudes, replaced wholesale on update.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f64>,
}

impl AudioBuffer {
    /// Quiet random noise in [0, 0.3).
    pub fn synthetic(len: usize, rng: &mut impl Rng) -> Self {
        Self {
            samples: (0..len)
                .map(|_| rng.random_range(0.0..1.0) * DEFAULT_MAGNITUDE)
                .collect(),
        }
    }

    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Replace the buffer. An empty slice is ignored.
    pub fn replace(&mut self, samples: &[f64]) -> bool {
        if samples.is_empty() {
            return false;
        }
        self.samples = samples.to_vec();
        true
    }

    /// Sample at `index`, or the default magnitude when out of range or not finite.
    pub fn sample(&self, index: usize) -> f64 {
        match self.samples.get(index) {
            Some(v) if v.is_finite() => *v,
            _ => DEFAULT_MAGNITUDE,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Sample feeding a given band: `floor(band · sample_count / band_count)`.
pub fn band_index(band: usize, sample_count: usize, band_count: usize) -> usize {
    if band_count == 0 {
        return 0;
    }
    band * sample_count / band_count
}
