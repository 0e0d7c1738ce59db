//! Perlin noise backed by the `noise` crate.

use ::noise::{NoiseFn, Perlin};

use super::sampler::NoiseSampler;

/// Gradient noise sampler.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    /// Creates a Perlin sampler with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSampler for PerlinNoise {
    fn sample(&self, x: f32, y: f32, z: f32, frequency: f32) -> f32 {
        let f = frequency as f64;
        self.perlin.get([x as f64 * f, y as f64 * f, z as f64 * f]) as f32
    }
}
