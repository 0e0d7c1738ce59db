//! Geometry error type shared by the mesh, subdivision and sphere modules.

use thiserror::Error;

/// Errors raised while building or validating sphere geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Normalization of a vector whose length is zero (or not finite).
    #[error("Cannot normalize zero-length vector {0:?}")]
    ZeroLength([f32; 3]),
    /// An edge whose endpoints sum to the origin has no defined midpoint on the sphere.
    #[error("Degenerate edge ({0}, {1}): endpoints are opposite, midpoint is at the origin")]
    DegenerateEdge(u32, u32),
    /// A face references a vertex that does not exist.
    #[error("Face {face} references vertex {index}, but the mesh only has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    /// A vertex index that does not exist in the vertex list.
    #[error("Vertex {index} does not exist, the mesh only has {vertex_count} vertices")]
    VertexIndexOutOfRange { index: u32, vertex_count: usize },
    /// Subdivision level beyond the supported maximum.
    #[error("Subdivision level {0} exceeds the maximum of {1}")]
    SubdivisionTooDeep(u32, u32),
    /// The mesh would need more vertices than a `u32` index can address.
    #[error("Mesh needs {0} vertices, more than 32-bit indices can address")]
    IndexOverflow(usize),
    /// Sphere radius must be positive and finite.
    #[error("Invalid sphere radius: {0}")]
    InvalidRadius(f32),
}
