//! De Casteljau evaluation and subdivision of cubic Bézier curves.

use bez_math::{Point3, Vector3};

/// Linear interpolation that returns `a` at `t = 0` and `b` at `t = 1` exactly.
#[inline]
pub fn lerp(a: Point3, b: Point3, t: f64) -> Point3 {
    a * (1.0 - t) + b * t
}

/// Evaluate a cubic Bézier curve at `t`, returning the point and first derivative.
///
/// The derivative is `3 * (q1 - q0)` where `q0`, `q1` are the two points left
/// after the second reduction round.
pub fn eval(points: &[Point3; 4], t: f64) -> (Point3, Vector3) {
    let p01 = lerp(points[0], points[1], t);
    let p12 = lerp(points[1], points[2], t);
    let p23 = lerp(points[2], points[3], t);

    let q0 = lerp(p01, p12, t);
    let q1 = lerp(p12, p23, t);

    (lerp(q0, q1, t), (q1 - q0) * 3.0)
}

/// Split a cubic Bézier curve at `t` into the control polygons of `[0, t]` and `[t, 1]`.
///
/// Both halves share the split point as an end control point.
pub fn split(points: &[Point3; 4], t: f64) -> ([Point3; 4], [Point3; 4]) {
    let p01 = lerp(points[0], points[1], t);
    let p12 = lerp(points[1], points[2], t);
    let p23 = lerp(points[2], points[3], t);

    let q0 = lerp(p01, p12, t);
    let q1 = lerp(p12, p23, t);

    let mid = lerp(q0, q1, t);

    (
        [points[0], p01, q0, mid],
        [mid, q1, p23, points[3]],
    )
}
