//! One pass of 1-to-4 triangle subdivision projected onto a sphere.

use std::collections::HashMap;

use glam::Vec3;
use tracing::debug;

use super::error::GeometryError;
use super::mesh::edge_key;
use super::vector::normalize_checked;

/// Midpoint vertices created during a single subdivision pass.
///
/// Indices are only meaningful for the vertex list of the pass that created
/// them, so a fresh cache is used for every pass.
#[derive(Debug, Default)]
pub struct EdgeMidpoints {
    midpoints: HashMap<(u32, u32), u32>,
}

impl EdgeMidpoints {
    /// Creates an empty cache sized for roughly `edges` edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            midpoints: HashMap::with_capacity(edges),
        }
    }

    /// Returns the number of midpoints created so far.
    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    /// Returns true if no midpoint has been created yet.
    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }

    /// Returns the midpoint vertex of edge `(a, b)`, creating it on first use.
    ///
    /// A new midpoint is `normalize(v[a] + v[b]) * radius` and is appended to
    /// `vertices`. Fails with [`GeometryError::VertexIndexOutOfRange`] if `a`
    /// or `b` is not a vertex.
    pub fn midpoint(
        &mut self,
        vertices: &mut Vec<Vec3>,
        a: u32,
        b: u32,
        radius: f32,
    ) -> Result<u32, GeometryError> {
        let key = edge_key(a, b);
        if let Some(&index) = self.midpoints.get(&key) {
            return Ok(index);
        }

        let vertex = |i: u32| {
            vertices.get(i as usize).copied().ok_or(GeometryError::VertexIndexOutOfRange {
                index: i,
                vertex_count: vertices.len(),
            })
        };
        let sum = vertex(a)? + vertex(b)?;
        let position = normalize_checked(sum).map_err(|_| GeometryError::DegenerateEdge(a, b))? * radius;

        let index = u32::try_from(vertices.len())
            .map_err(|_| GeometryError::IndexOverflow(vertices.len() + 1))?;
        vertices.push(position);
        self.midpoints.insert(key, index);
        Ok(index)
    }
}

/// Splits every triangle into four, projecting new vertices onto the sphere.
///
/// New midpoint vertices are appended to `vertices`; the refined face list is
/// returned. Shared edges get exactly one midpoint, so a closed input stays
/// closed. Each child keeps its parent's winding.
///
/// # Arguments
/// * `vertices` - Vertex positions, extended in place
/// * `faces` - Triangles of the current level
/// * `radius` - Radius of the sphere new vertices are projected onto
///
/// # Errors
/// * [`GeometryError::FaceIndexOutOfRange`] if a face references a missing vertex
/// * [`GeometryError::DegenerateEdge`] if an edge's endpoints cancel out
pub fn surface_subdivide(
    vertices: &mut Vec<Vec3>,
    faces: &[[u32; 3]],
    radius: f32,
) -> Result<Vec<[u32; 3]>, GeometryError> {
    let vertex_count = vertices.len();
    let mut edges = EdgeMidpoints::with_capacity(faces.len() * 3 / 2);
    let mut new_faces = Vec::with_capacity(faces.len() * 4);

    // Midpoints appended during this pass are never referenced by input faces
    for (face, indices) in faces.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }

    vertices.reserve(faces.len() * 3 / 2);

    for &[j, k, l] in faces {
        let children = edges.midpoint(vertices, j, k, radius).and_then(|jk| {
            let kl = edges.midpoint(vertices, k, l, radius)?;
            let jl = edges.midpoint(vertices, j, l, radius)?;
            Ok([[j, jk, jl], [jk, k, kl], [jl, kl, l], [jk, kl, jl]])
        });
        match children {
            Ok(children) => new_faces.extend(children),
            Err(err) => {
                vertices.truncate(vertex_count);
                return Err(err);
            }
        }
    }

    debug!(
        faces_in = faces.len(),
        faces_out = new_faces.len(),
        midpoints = edges.len(),
        "subdivision pass complete"
    );

    Ok(new_faces)
}
