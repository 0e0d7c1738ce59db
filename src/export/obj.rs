//! Wavefront OBJ export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::geometry::Mesh;

use super::MeshExportError;

/// Writes a mesh as Wavefront OBJ text.
///
/// Emits one `v x y z` line per vertex followed by one `f a b c` line per
/// triangle, using OBJ's 1-based indices.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<(), MeshExportError> {
    mesh.validate()?;

    writeln!(
        writer,
        "# planetgen: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    writeln!(writer, "o Planet")?;
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for &[a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

/// Exports a mesh to an OBJ file at `path`.
pub fn export_mesh_obj(mesh: &Mesh, path: &Path) -> Result<(), MeshExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_sphere, GeometryError};
    use glam::Vec3;

    #[test]
    fn test_write_obj_base_solid() {
        let mesh = build_sphere(0, 1.0).unwrap();
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let vertex_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("v ")).collect();
        let face_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();

        assert_eq!(vertex_lines.len(), 6);
        assert_eq!(face_lines.len(), 8);
        assert_eq!(vertex_lines[0], "v 1 0 0");
        assert_eq!(face_lines[0], "f 1 2 5");
    }

    #[test]
    fn test_write_obj_rejects_broken_mesh() {
        let mesh = Mesh::new(vec![Vec3::X], vec![[0, 0, 1]]);
        let err = write_obj(&mesh, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            MeshExportError::Geometry(GeometryError::FaceIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_export_obj_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.obj");
        let mesh = build_sphere(2, 1.0).unwrap();

        export_mesh_obj(&mesh, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 66);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 128);
    }
}
