//! The octahedron every planet sphere is subdivided from.

use glam::Vec3;

use super::mesh::Mesh;

/// Unit octahedron vertices along +X, +Y, -X, -Y, +Z, -Z.
pub const OCTAHEDRON_VERTICES: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

/// Octahedron faces, counter-clockwise when seen from outside.
///
/// The first four fan around +Z, the last four around -Z.
pub const OCTAHEDRON_FACES: [[u32; 3]; 8] = [
    [0, 1, 4],
    [1, 2, 4],
    [2, 3, 4],
    [3, 0, 4],
    [3, 2, 5],
    [0, 3, 5],
    [1, 0, 5],
    [2, 1, 5],
];

/// Builds the base octahedron scaled so every vertex lies at `radius`.
pub fn octahedron(radius: f32) -> Mesh {
    Mesh::new(
        OCTAHEDRON_VERTICES.iter().map(|&v| v * radius).collect(),
        OCTAHEDRON_FACES.to_vec(),
    )
}
