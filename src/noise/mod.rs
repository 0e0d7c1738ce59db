//! Noise primitives sampled by the terrain former.
//!
//! Terrain forming only depends on the [`NoiseSampler`] trait; the Perlin
//! implementation uses the `noise` crate and the simplex one uses simdnoise.

mod sampler;
mod perlin;
mod simplex;

pub use sampler::{NoiseKind, NoiseSampler};
pub use perlin::PerlinNoise;
pub use simplex::SimplexNoise;
