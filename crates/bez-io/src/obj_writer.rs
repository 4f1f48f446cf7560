//! OBJ export with one unshared vertex triple per triangle.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bez_core::Result;
use bez_mesh::Model;

/// Write every triangle as three `v` records and one `f` record.
///
/// Vertex numbers run from 1 across the whole file; nothing is shared between
/// triangles and no normals are written.
pub fn write_obj<W: Write>(model: &Model, out: &mut W) -> Result<()> {
    let mut next = 1usize;
    for tri in model.triangles() {
        for p in tri.positions() {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(out, "f {} {} {}", next, next + 1, next + 2)?;
        next += 3;
    }
    Ok(())
}

pub fn to_obj_string(model: &Model) -> Result<String> {
    let mut buf = Vec::new();
    write_obj(model, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_obj_file(model: &Model, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj(model, &mut out)?;
    out.flush()?;
    log::info!("wrote {} triangles to {}", model.triangle_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bez_math::DVec3;
    use bez_mesh::{Patch, Triangle};

    #[test]
    fn test_running_vertex_counter() {
        let a = Triangle::from_positions(DVec3::ZERO, DVec3::X, DVec3::Y);
        let b = Triangle::from_positions(DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y);
        let model = Model::new(
            vec![Patch::from_triangles(vec![a]), Patch::from_triangles(vec![b])],
            None,
        );

        let text = to_obj_string(&model).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[1], "v 1 0 0");
        assert_eq!(lines[3], "f 1 2 3");
        assert_eq!(lines[5], "v 1 1 0");
        assert_eq!(lines[7], "f 4 5 6");
    }

    #[test]
    fn test_empty_model() {
        assert_eq!(to_obj_string(&Model::default()).unwrap(), "");
    }
}
