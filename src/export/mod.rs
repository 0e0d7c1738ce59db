//! Export module for handing generated meshes to other tools.
//!
//! Supports Wavefront OBJ for DCC tools and a compact little-endian binary
//! layout for engines.

use std::path::Path;

use thiserror::Error;

use crate::geometry::{GeometryError, Mesh};

mod obj;
mod raw;

pub use obj::{write_obj, export_mesh_obj};
pub use raw::{write_raw, read_raw, export_mesh_raw};

/// Errors that can occur during mesh export.
#[derive(Error, Debug)]
pub enum MeshExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Mesh is malformed: {0}")]
    Geometry(#[from] GeometryError),
    #[error("Mesh has {0} elements, more than the format can store")]
    TooLarge(usize),
}

/// Mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshFormat {
    /// Wavefront OBJ text.
    #[default]
    Obj,
    /// Little-endian binary positions and indices.
    Raw,
}

impl MeshFormat {
    /// File extension used for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Raw => "bin",
        }
    }
}

/// Exports a mesh to `path` in the given format.
pub fn export_mesh(mesh: &Mesh, path: &Path, format: MeshFormat) -> Result<(), MeshExportError> {
    match format {
        MeshFormat::Obj => export_mesh_obj(mesh, path),
        MeshFormat::Raw => export_mesh_raw(mesh, path),
    }
}
