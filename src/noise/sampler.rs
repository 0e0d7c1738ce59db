//! The noise strategy used by terrain forming.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::perlin::PerlinNoise;
use super::simplex::SimplexNoise;

/// A deterministic 3D noise field sampled at a given frequency.
///
/// `sample(x, y, z, frequency)` evaluates the field at `(x, y, z) * frequency`
/// and returns a value roughly in [-1, 1]. Implementations must be pure:
/// identical inputs always yield identical outputs.
///
/// Any `Fn(f32, f32, f32, f32) -> f32` closure is a sampler, which makes it
/// easy to plug in custom or synthetic fields:
///
/// ```
/// use planetgen::noise::NoiseSampler;
///
/// let flat = |_x: f32, _y: f32, _z: f32, _f: f32| -> f32 { 0.0 };
/// assert_eq!(flat.sample(1.0, 2.0, 3.0, 7.0), 0.0);
/// ```
pub trait NoiseSampler: Send + Sync {
    /// Samples the field at `(x, y, z)` scaled by `frequency`.
    fn sample(&self, x: f32, y: f32, z: f32, frequency: f32) -> f32;
}

impl<F> NoiseSampler for F
where
    F: Fn(f32, f32, f32, f32) -> f32 + Send + Sync,
{
    fn sample(&self, x: f32, y: f32, z: f32, frequency: f32) -> f32 {
        self(x, y, z, frequency)
    }
}

/// Which built-in noise implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Classic gradient (Perlin) noise.
    Perlin,
    /// Simplex noise.
    #[default]
    Simplex,
}

impl NoiseKind {
    /// Returns all noise kinds.
    pub const fn all() -> [NoiseKind; 2] {
        [NoiseKind::Perlin, NoiseKind::Simplex]
    }

    /// Returns the lowercase name used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Simplex => "simplex",
        }
    }

    /// Creates the sampler for this kind.
    pub fn sampler(self, seed: u32) -> Box<dyn NoiseSampler> {
        match self {
            NoiseKind::Perlin => Box::new(PerlinNoise::new(seed)),
            NoiseKind::Simplex => Box::new(SimplexNoise::new(seed)),
        }
    }
}

impl std::fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sampler() {
        let scaled = |x: f32, y: f32, z: f32, f: f32| (x + y + z) * f;
        assert_eq!(scaled.sample(1.0, 2.0, 3.0, 2.0), 12.0);
    }

    #[test]
    fn test_default_kind() {
        assert_eq!(NoiseKind::default(), NoiseKind::Simplex);
    }

    #[test]
    fn test_names() {
        assert_eq!(NoiseKind::Perlin.name(), "perlin");
        assert_eq!(NoiseKind::Simplex.to_string(), "simplex");
    }

    #[test]
    fn test_samplers_are_deterministic() {
        for kind in NoiseKind::all() {
            let a = kind.sampler(7);
            let b = kind.sampler(7);
            for f in [1.0, 3.0, 33.0] {
                assert_eq!(
                    a.sample(0.2, -0.4, 0.9, f),
                    b.sample(0.2, -0.4, 0.9, f),
                    "{} sampler is not deterministic",
                    kind
                );
            }
        }
    }

    #[test]
    fn test_samplers_vary_over_space() {
        for kind in NoiseKind::all() {
            let sampler = kind.sampler(1);
            let values: Vec<f32> = (0..16)
                .map(|i| sampler.sample(i as f32 * 0.37, 0.5, -0.25, 3.0))
                .collect();
            let first = values[0];
            assert!(
                values.iter().any(|&v| (v - first).abs() > 1e-4),
                "{} sampler is constant",
                kind
            );
        }
    }
}
