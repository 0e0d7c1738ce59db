//! Generated planet data.

use serde::{Deserialize, Serialize};

use crate::config::PlanetConfig;
use crate::geometry::Mesh;

/// A procedurally generated planet: the displaced sphere plus the parameters
/// it was generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    /// Parameters used to generate the planet.
    pub config: PlanetConfig,
    /// Surface mesh; empty until the sphere stage has run.
    pub mesh: Mesh,
}

impl Planet {
    /// Creates a planet with no geometry yet.
    pub fn new(config: PlanetConfig) -> Self {
        Self {
            config,
            mesh: Mesh::default(),
        }
    }

    /// Base radius before displacement.
    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Returns true once the surface mesh has been generated.
    pub fn has_mesh(&self) -> bool {
        !self.mesh.vertices.is_empty()
    }

    /// Lowest and highest surface elevation relative to the base radius.
    ///
    /// Elevations are `|v| / radius - 1`, so 0.0 is the undisplaced sphere.
    pub fn height_range(&self) -> (f32, f32) {
        let (min, max) = self.mesh.radius_range();
        let radius = self.radius();
        (min / radius - 1.0, max / radius - 1.0)
    }

    /// Elevation of every vertex relative to the base radius.
    pub fn elevations(&self) -> Vec<f32> {
        let radius = self.radius();
        self.mesh.vertices.iter().map(|v| v.length() / radius - 1.0).collect()
    }
}
