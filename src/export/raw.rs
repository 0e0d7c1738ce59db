//! Compact binary mesh export.
//!
//! Layout, all little-endian:
//! `u32 vertex_count`, `u32 face_count`, `vertex_count * [f32; 3]` positions,
//! `face_count * [u32; 3]` indices.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::geometry::Mesh;

use super::MeshExportError;

/// Upper bound on elements preallocated from an untrusted header.
const MAX_PREALLOCATED: usize = 1 << 20;

/// Writes a mesh in the binary layout described in the module docs.
pub fn write_raw<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<(), MeshExportError> {
    mesh.validate()?;

    let vertex_count = u32::try_from(mesh.vertex_count())
        .map_err(|_| MeshExportError::TooLarge(mesh.vertex_count()))?;
    let face_count =
        u32::try_from(mesh.face_count()).map_err(|_| MeshExportError::TooLarge(mesh.face_count()))?;
    writer.write_all(&vertex_count.to_le_bytes())?;
    writer.write_all(&face_count.to_le_bytes())?;

    let (positions, faces) = mesh.to_buffers();
    if cfg!(target_endian = "little") {
        writer.write_all(bytemuck::cast_slice(positions.as_slice()))?;
        writer.write_all(bytemuck::cast_slice(faces.as_slice()))?;
    } else {
        for p in positions.iter().flatten() {
            writer.write_all(&p.to_le_bytes())?;
        }
        for i in faces.iter().flatten() {
            writer.write_all(&i.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Exports a mesh to a binary file at `path`.
pub fn export_mesh_raw(mesh: &Mesh, path: &Path) -> Result<(), MeshExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_raw(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a mesh written by [`write_raw`].
pub fn read_raw<R: Read>(reader: &mut R) -> Result<Mesh, MeshExportError> {
    let vertex_count = read_u32(reader)? as usize;
    let face_count = read_u32(reader)? as usize;

    let mut positions = Vec::with_capacity(vertex_count.min(MAX_PREALLOCATED));
    for _ in 0..vertex_count {
        let [x, y, z] = [read_u32(reader)?, read_u32(reader)?, read_u32(reader)?];
        positions.push([f32::from_bits(x), f32::from_bits(y), f32::from_bits(z)]);
    }

    let mut faces = Vec::with_capacity(face_count.min(MAX_PREALLOCATED));
    for _ in 0..face_count {
        faces.push([read_u32(reader)?, read_u32(reader)?, read_u32(reader)?]);
    }

    Ok(Mesh::from_buffers(&positions, &faces)?)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, MeshExportError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}
