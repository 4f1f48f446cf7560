//! Parser for the indexed-face (`.obj`) format.
//!
//! Only `v` and `f` records are read. Faces become flat-shaded triangles that
//! bypass subdivision.

use std::fs;
use std::path::Path;

use bez_core::{BezError, Result};
use bez_math::{DVec3, Point3};
use bez_mesh::{Model, Patch, Triangle};

fn parse_vertex(line_no: usize, args: &[&str]) -> Result<Point3> {
    if args.len() < 3 {
        return Err(BezError::parse(
            line_no,
            format!("vertex needs 3 coordinates, found {}", args.len()),
        ));
    }
    let mut xyz = [0.0; 3];
    for (c, tok) in xyz.iter_mut().zip(args) {
        *c = tok
            .parse()
            .map_err(|e| BezError::parse(line_no, format!("invalid coordinate '{tok}': {e}")))?;
    }
    Ok(DVec3::new(xyz[0], xyz[1], xyz[2]))
}

/// Resolve a face token (`7`, `7/2`, `7//3`, `7/2/3`) to a vertex position.
fn resolve_index(line_no: usize, tok: &str, vertices: &[Point3]) -> Result<Point3> {
    let index_tok = tok.split('/').next().unwrap_or(tok);
    let index: usize = index_tok
        .parse()
        .map_err(|e| BezError::parse(line_no, format!("invalid vertex index '{index_tok}': {e}")))?;
    if index == 0 || index > vertices.len() {
        return Err(BezError::parse(
            line_no,
            format!("vertex index {index} out of range 1..={}", vertices.len()),
        ));
    }
    Ok(vertices[index - 1])
}

/// Parse OBJ text into a model holding one grid-less patch.
///
/// A quad `a b c d` becomes `(d, a, b)` and `(d, b, c)`, so the shared diagonal
/// joins its fourth and second vertices. Faces with other vertex counts are
/// skipped with a warning.
pub fn parse_obj(input: &str) -> Result<Model> {
    let mut vertices: Vec<Point3> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line_no = i + 1;
        let mut tokens = raw.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();

        match tag {
            "v" => vertices.push(parse_vertex(line_no, &args)?),
            "f" => {
                let corners = args
                    .iter()
                    .map(|tok| resolve_index(line_no, tok, &vertices))
                    .collect::<Result<Vec<Point3>>>()?;
                match corners.as_slice() {
                    &[a, b, c] => triangles.push(Triangle::from_positions(a, b, c)),
                    &[a, b, c, d] => {
                        triangles.push(Triangle::from_positions(d, a, b));
                        triangles.push(Triangle::from_positions(d, b, c));
                    }
                    _ => log::warn!(
                        "line {line_no}: skipping face with {} vertices, only triangles and quads are supported",
                        corners.len()
                    ),
                }
            }
            _ => {}
        }
    }

    log::debug!("parsed {} vertices into {} triangles", vertices.len(), triangles.len());
    Ok(Model::new(vec![Patch::from_triangles(triangles)], None))
}

/// Read and parse an OBJ file.
pub fn read_obj_file(path: &Path) -> Result<Model> {
    let text = fs::read_to_string(path)?;
    parse_obj(&text)
}
