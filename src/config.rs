//! Planet generation parameters.
//!
//! Parameters come from a TOML file, command-line flags or code, and are
//! validated here before any geometry is built.

use std::path::{Path, PathBuf};

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::MAX_SUBDIVISIONS;
use crate::noise::NoiseKind;

/// Smallest accepted sphere radius (exclusive).
pub const MIN_RADIUS: f32 = 0.01;

/// Accepted range of terrain influence.
pub const INFLUENCE_RANGE: (f32, f32) = (-1.0, 1.0);

/// Half-width of the cube seeded noise offsets are drawn from.
///
/// Kept small so f32 spacing at the offset stays well below the finest noise
/// feature after scaling by the detail frequency.
const OFFSET_SPAN: f32 = 100.0;

/// Errors raised while loading or validating a [`PlanetConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Subdivision level {0} is outside the supported range 0..={1}")]
    SubdivisionOutOfRange(u32, u32),
    #[error("Radius must be greater than 0.01, got {0}")]
    RadiusTooSmall(f32),
    #[error("Terrain influence must be between -1.0 and 1.0, got {0}")]
    InfluenceOutOfRange(f32),
    #[error("Noise offset must be finite, got {0:?}")]
    NonFiniteOffset([f32; 3]),
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything needed to generate one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Octasphere subdivision passes (0 = raw octahedron).
    pub subdivisions: u32,
    /// Radius of the sphere before displacement.
    pub radius: f32,
    /// Translation of sampling points in noise space.
    pub noise_offset: Vec3,
    /// Strength of the noise displacement, in [-1, 1].
    pub terrain_influence: f32,
    /// Noise implementation.
    pub noise: NoiseKind,
    /// Seed passed to the noise implementation.
    pub seed: u32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            subdivisions: 3,
            radius: 1.0,
            noise_offset: Vec3::ZERO,
            terrain_influence: 0.025,
            noise: NoiseKind::Simplex,
            seed: 0,
        }
    }
}

impl PlanetConfig {
    /// Creates the default configuration with the given subdivision level and radius.
    pub fn new(subdivisions: u32, radius: f32) -> Self {
        Self {
            subdivisions,
            radius,
            ..Default::default()
        }
    }

    /// Parses a configuration from TOML; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every parameter against its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::SubdivisionOutOfRange(self.subdivisions, MAX_SUBDIVISIONS));
        }
        if !(self.radius > MIN_RADIUS && self.radius.is_finite()) {
            return Err(ConfigError::RadiusTooSmall(self.radius));
        }
        let (min, max) = INFLUENCE_RANGE;
        if !(min..=max).contains(&self.terrain_influence) {
            return Err(ConfigError::InfluenceOutOfRange(self.terrain_influence));
        }
        if !self.noise_offset.is_finite() {
            return Err(ConfigError::NonFiniteOffset(self.noise_offset.to_array()));
        }
        Ok(())
    }

    /// Replaces the noise offset with one derived from `seed`.
    ///
    /// Each seed picks a different region of noise space, and therefore a
    /// different planet, while the same seed always picks the same one.
    pub fn randomize_offset(&mut self, seed: u64) -> &mut Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut component = || (rng.random::<f32>() * 2.0 - 1.0) * OFFSET_SPAN;
        self.noise_offset = Vec3::new(component(), component(), component());
        self
    }

    /// Returns true if `other` needs a different base sphere than `self`.
    pub fn geometry_differs(&self, other: &PlanetConfig) -> bool {
        self.subdivisions != other.subdivisions || self.radius.to_bits() != other.radius.to_bits()
    }
}
