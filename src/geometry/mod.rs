//! Sphere geometry module.
//!
//! Builds octahedral geodesic spheres: a fixed octahedron refined by
//! repeated 1-to-4 triangle subdivision with every new vertex projected
//! back onto the sphere.

mod error;
mod vector;
mod mesh;
mod octahedron;
mod subdivide;
mod sphere;

pub use error::GeometryError;
pub use vector::{normalize_checked, cos_angle, is_radial_multiple};
pub use mesh::Mesh;
pub use octahedron::{octahedron, OCTAHEDRON_VERTICES, OCTAHEDRON_FACES};
pub use subdivide::{surface_subdivide, EdgeMidpoints};
pub use sphere::{build_sphere, expected_counts, SphereCache, MAX_SUBDIVISIONS};
