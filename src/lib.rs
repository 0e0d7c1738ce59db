//! Procedural planet mesh generator.
//!
//! Builds an octahedral geodesic sphere by repeated triangle subdivision,
//! then displaces every vertex radially with layered 3D noise to give the
//! sphere planet-like relief.
//!
//! ```
//! use planetgen::{PlanetConfig, PlanetGenerator};
//!
//! let mut generator = PlanetGenerator::new();
//! let planet = generator.generate(PlanetConfig::new(2, 1.0)).unwrap();
//! assert_eq!(planet.mesh.face_count(), 128);
//! ```

pub mod config;
pub mod geometry;
pub mod noise;
pub mod terrain;
pub mod export;
pub mod pipeline;

pub use config::{ConfigError, PlanetConfig};
pub use geometry::{build_sphere, GeometryError, Mesh, SphereCache};
pub use crate::noise::{NoiseKind, NoiseSampler};
pub use terrain::{form_terrain, Planet, TerrainError};
pub use pipeline::{GenerationStage, Pipeline, PipelineError, PlanetGenerator, SphereStage, TerrainStage};
pub use export::{export_mesh, MeshExportError, MeshFormat};
