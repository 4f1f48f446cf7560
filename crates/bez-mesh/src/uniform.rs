//! Uniform tessellation of a Bézier patch at a fixed parametric step.

use bez_core::Tolerance;
use bez_geometry::ControlGrid;

use crate::config::MAX_UNIFORM_CELLS;
use crate::normal::{fill_missing, surface_normal};
use crate::{Triangle, Vertex};

/// Slack subtracted from `1 / step` so steps like `0.1` do not gain an extra row
/// through rounding.
const STEP_EPSILON: f64 = 1e-9;

/// Number of cells per axis for a parametric `step`: `ceil(1 / step)`, at least 1.
///
/// `None` when that exceeds [`MAX_UNIFORM_CELLS`], which includes a zero step, or is NaN.
pub fn checked_subdivision_count(step: f64) -> Option<usize> {
    let n = (1.0 / step - STEP_EPSILON).ceil();
    if n.is_nan() || n > MAX_UNIFORM_CELLS as f64 {
        return None;
    }
    Some(if n >= 1.0 { n as usize } else { 1 })
}

/// [`checked_subdivision_count`], clamped to `1..=MAX_UNIFORM_CELLS`.
pub fn subdivision_count(step: f64) -> usize {
    checked_subdivision_count(step).unwrap_or(if step > 0.0 { MAX_UNIFORM_CELLS } else { 1 })
}

/// Tessellate a patch on a regular `(n+1) × (n+1)` grid of samples.
///
/// Samples sit at `u = i/n`, `v = j/n` and are evaluated once, so neighbouring
/// cells share identical vertices. Each cell `(i, j)` yields the triangles
/// `(i,j)-(i+1,j)-(i+1,j+1)` and `(i,j)-(i+1,j+1)-(i,j+1)`, giving `2·n²` in total.
pub fn uniform_tessellate(grid: &ControlGrid, step: f64, tolerance: Tolerance) -> Vec<Triangle> {
    let n = subdivision_count(step);
    let count = n + 1;

    let mut positions = Vec::with_capacity(count * count);
    let mut normals = Vec::with_capacity(count * count);
    for i in 0..count {
        let u = i as f64 / n as f64;
        for j in 0..count {
            let v = j as f64 / n as f64;
            positions.push(grid.point_at(u, v));
            normals.push(surface_normal(grid, u, v, tolerance));
        }
    }
    let normals = fill_missing(&normals, count);

    let vertex = |i: usize, j: usize| -> Vertex {
        let k = i * count + j;
        Vertex::new(positions[k], normals[k])
    };

    let mut triangles = Vec::with_capacity(2 * n * n);
    for i in 0..n {
        for j in 0..n {
            triangles.push(Triangle::new(vertex(i, j), vertex(i + 1, j), vertex(i + 1, j + 1)));
            triangles.push(Triangle::new(vertex(i, j), vertex(i + 1, j + 1), vertex(i, j + 1)));
        }
    }

    triangles
}
