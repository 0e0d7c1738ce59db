//! Simplex noise backed by simdnoise.

use simdnoise::NoiseBuilder;

use super::sampler::NoiseSampler;

/// Simplex noise sampler.
///
/// Uses 4D simplex noise with the w dimension fixed at 0, which samples
/// seamlessly over the sphere.
#[derive(Debug, Clone, Copy)]
pub struct SimplexNoise {
    seed: i32,
}

impl SimplexNoise {
    /// Creates a simplex sampler with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { seed: seed as i32 }
    }
}

impl NoiseSampler for SimplexNoise {
    fn sample(&self, x: f32, y: f32, z: f32, frequency: f32) -> f32 {
        NoiseBuilder::fbm_4d_offset(x * frequency, 1, y * frequency, 1, z * frequency, 1, 0.0, 1)
            .with_seed(self.seed)
            .with_freq(1.0)
            .with_octaves(1)
            .generate()
            .0[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_reproducible() {
        let noise = SimplexNoise::new(12345);
        let a = noise.sample(0.5, 0.3, 0.7, 11.0);
        let b = noise.sample(0.5, 0.3, 0.7, 11.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_simplex_range() {
        let noise = SimplexNoise::new(42);
        for i in 0..100 {
            let t = i as f32 * 0.31;
            let v = noise.sample(t.cos(), t.sin(), 0.25, 3.0);
            assert!(v.is_finite());
            assert!((-1.5..=1.5).contains(&v), "Simplex value {} out of range", v);
        }
    }

    #[test]
    fn test_simplex_seeds_differ() {
        let a = SimplexNoise::new(1);
        let b = SimplexNoise::new(2);
        assert_ne!(a.sample(0.5, 0.3, 0.7, 1.0), b.sample(0.5, 0.3, 0.7, 1.0));
    }
}
