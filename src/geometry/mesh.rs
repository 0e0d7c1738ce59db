//! Indexed triangle mesh.
//!
//! Vertices live in a flat array and faces refer to them by index, so a mesh
//! is a plain value that can be cloned, serialized and shared across threads.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::GeometryError;

/// A triangle mesh stored as vertex positions plus index triples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions; the index in this vector is the vertex id.
    pub vertices: Vec<Vec3>,
    /// Triangles as three indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from existing vertex and face buffers.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Builds a mesh from plain float/index triples, validating indices.
    pub fn from_buffers(vertices: &[[f32; 3]], faces: &[[u32; 3]]) -> Result<Self, GeometryError> {
        let mesh = Self::new(
            vertices.iter().map(|&v| Vec3::from_array(v)).collect(),
            faces.to_vec(),
        );
        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Checks that every face index refers to an existing vertex.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            for &index in indices {
                if index as usize >= vertex_count {
                    return Err(GeometryError::FaceIndexOutOfRange {
                        face,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Counts how many faces use each undirected edge.
    ///
    /// Keys are `(min, max)` vertex index pairs.
    pub fn edge_face_counts(&self) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::with_capacity(self.faces.len() * 3 / 2);
        for &[a, b, c] in &self.faces {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                *counts.entry(edge_key(p, q)).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns true when every edge is shared by exactly two faces.
    pub fn is_watertight(&self) -> bool {
        !self.faces.is_empty() && self.edge_face_counts().values().all(|&n| n == 2)
    }

    /// Returns the three corner positions of a face.
    ///
    /// # Panics
    /// Panics if `face` or any of its indices is out of range; call
    /// [`Mesh::validate`] first for untrusted meshes.
    pub fn face_corners(&self, face: usize) -> [Vec3; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Returns true if the face normal points away from the origin.
    pub fn face_is_outward(&self, face: usize) -> bool {
        let [a, b, c] = self.face_corners(face);
        let normal = (b - a).cross(c - a);
        normal.dot(a + b + c) > 0.0
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive when faces are wound counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> f32 {
        (0..self.faces.len())
            .map(|i| {
                let [a, b, c] = self.face_corners(i);
                a.dot(b.cross(c))
            })
            .sum::<f32>()
            / 6.0
    }

    /// Flips every face whose normal points towards the origin.
    ///
    /// Returns the number of faces that were flipped.
    pub fn orient_outward(&mut self) -> usize {
        let mut flipped = 0;
        for i in 0..self.faces.len() {
            if !self.face_is_outward(i) {
                self.faces[i].swap(1, 2);
                flipped += 1;
            }
        }
        flipped
    }

    /// Minimum and maximum vertex distance from the origin.
    pub fn radius_range(&self) -> (f32, f32) {
        self.vertices.iter().fold((f32::MAX, f32::MIN), |(min, max), v| {
            let len = v.length();
            (min.min(len), max.max(len))
        })
    }

    /// Converts the mesh into plain position and index triples.
    ///
    /// This is the form consumed by host mesh builders and the exporters.
    pub fn to_buffers(&self) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        (
            self.vertices.iter().map(|v| v.to_array()).collect(),
            self.faces.clone(),
        )
    }
}

/// Orders an edge's endpoints so both directions share one key.
pub(crate) fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}
