//! Normal recovery at singular surface samples.

use bez_core::Tolerance;
use bez_geometry::ControlGrid;
use bez_math::Vector3;

/// Surface normal at `(u, v)`, probing slightly toward the patch centre when
/// the tangents there are zero or parallel (poles, collapsed edges).
pub(crate) fn surface_normal(
    grid: &ControlGrid,
    u: f64,
    v: f64,
    tolerance: Tolerance,
) -> Option<Vector3> {
    grid.evaluate(u, v).normal(tolerance).or_else(|| {
        let k = 2.0 * tolerance.nudge;
        let pu = u + (0.5 - u) * k;
        let pv = v + (0.5 - v) * k;
        if pu == u && pv == v {
            return None;
        }
        grid.evaluate(pu, pv).normal(tolerance)
    })
}

/// Replace every missing normal of a `size × size` sample grid with the one
/// of the nearest sample that has a normal, scanning rings of growing radius.
///
/// Samples are indexed `i * size + j`. A grid with no normal at all gets `+Z`.
pub(crate) fn fill_missing(normals: &[Option<Vector3>], size: usize) -> Vec<Vector3> {
    let at = |i: usize, j: usize| normals[i * size + j];

    (0..size * size)
        .map(|k| {
            if let Some(n) = normals[k] {
                return n;
            }
            let (i, j) = (k / size, k % size);
            for radius in 1..size {
                let i0 = i.saturating_sub(radius);
                let j0 = j.saturating_sub(radius);
                let i1 = (i + radius).min(size - 1);
                let j1 = (j + radius).min(size - 1);
                for ii in i0..=i1 {
                    for jj in j0..=j1 {
                        let on_ring = ii.abs_diff(i) == radius || jj.abs_diff(j) == radius;
                        if on_ring {
                            if let Some(n) = at(ii, jj) {
                                return n;
                            }
                        }
                    }
                }
            }
            Vector3::Z
        })
        .collect()
}
