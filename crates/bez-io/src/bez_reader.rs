//! Parser for the `.bez` control-point format.
//!
//! ```text
//! 2
//! x y z  x y z  x y z  x y z      <- row 0 of patch 1
//! ...                             <- rows 1..3
//!
//! x y z  x y z  x y z  x y z      <- row 0 of patch 2
//! ...
//! ```

use std::fs;
use std::path::Path;

use bez_core::{BezError, Result};
use bez_geometry::ControlGrid;
use bez_math::{Color, DVec3};
use bez_mesh::Model;

/// Color assigned to every model read from a `.bez` file.
pub const BEZ_MODEL_COLOR: Color = Color::GREEN;

/// Non-blank lines with their 1-based line numbers.
fn content_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_row(line_no: usize, line: &str) -> Result<[DVec3; 4]> {
    let numbers = line
        .split_whitespace()
        .take(12)
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|e| BezError::parse(line_no, format!("invalid number '{tok}': {e}")))
        })
        .collect::<Result<Vec<f64>>>()?;

    if numbers.len() < 12 {
        return Err(BezError::parse(
            line_no,
            format!("expected 12 coordinates (4 points), found {}", numbers.len()),
        ));
    }

    let mut row = [DVec3::ZERO; 4];
    for (p, xyz) in row.iter_mut().zip(numbers.chunks_exact(3)) {
        *p = DVec3::new(xyz[0], xyz[1], xyz[2]);
    }
    Ok(row)
}

/// Parse `.bez` text into an un-tessellated model.
pub fn parse_bez(input: &str) -> Result<Model> {
    let mut lines = content_lines(input);

    let (count_line, header) = lines
        .next()
        .ok_or_else(|| BezError::parse(1, "missing patch count"))?;
    let count_tok = header.split_whitespace().next().unwrap_or_default();
    let patch_count: usize = count_tok
        .parse()
        .map_err(|e| BezError::parse(count_line, format!("invalid patch count '{count_tok}': {e}")))?;

    let mut grids = Vec::new();
    let mut last_line = count_line;
    for patch in 0..patch_count {
        let mut points = [[DVec3::ZERO; 4]; 4];
        for row in points.iter_mut() {
            let (line_no, line) = lines.next().ok_or_else(|| {
                BezError::parse(
                    last_line,
                    format!("file ends inside patch {} of {patch_count}", patch + 1),
                )
            })?;
            *row = parse_row(line_no, line)?;
            last_line = line_no;
        }
        grids.push(ControlGrid::new(points));
    }

    if let Some((line_no, _)) = lines.next() {
        log::debug!("ignoring content after patch {patch_count} starting at line {line_no}");
    }
    log::debug!("parsed {} patches", grids.len());

    Ok(Model::from_grids(grids, BEZ_MODEL_COLOR))
}

/// Read and parse a `.bez` file.
pub fn read_bez_file(path: &Path) -> Result<Model> {
    let text = fs::read_to_string(path)?;
    parse_bez(&text)
}
