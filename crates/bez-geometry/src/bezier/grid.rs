//! 4×4 control-point grid of a bicubic Bézier patch.

use bez_core::{BezError, Result, Tolerance};
use bez_math::{Point3, Vector3, DVec3};
use serde::{Deserialize, Serialize};

use super::decasteljau;

/// Position and first partial derivatives of a surface at one `(u, v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub position: Point3,
    pub tangent_u: Vector3,
    pub tangent_v: Vector3,
}

impl SurfaceSample {
    /// Unit normal `tangent_u × tangent_v`, or `None` when the tangents are
    /// zero or parallel.
    pub fn normal(&self, tolerance: Tolerance) -> Option<Vector3> {
        let n = self.tangent_u.cross(self.tangent_v);
        let scale = self.tangent_u.length_squared() * self.tangent_v.length_squared();
        if tolerance.is_degenerate(n.length_squared(), scale) {
            return None;
        }
        n.try_normalize()
    }
}

/// Control points of one bicubic Bézier patch.
///
/// `points[row][col]`: the column index runs along `u`, the row index along `v`,
/// so `points[0][0]`, `points[0][3]`, `points[3][0]` and `points[3][3]` are the
/// surface values at `(0,0)`, `(1,0)`, `(0,1)` and `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlGrid {
    pub points: [[Point3; 4]; 4],
}

impl ControlGrid {
    pub fn new(points: [[Point3; 4]; 4]) -> Self {
        Self { points }
    }

    /// Build a grid from 16 points in row-major order.
    pub fn from_slice(points: &[Point3]) -> Result<Self> {
        if points.len() != 16 {
            return Err(BezError::Geometry(format!(
                "a bicubic patch needs 16 control points, got {}",
                points.len()
            )));
        }
        let mut grid = [[DVec3::ZERO; 4]; 4];
        for (i, p) in points.iter().enumerate() {
            grid[i / 4][i % 4] = *p;
        }
        Ok(Self::new(grid))
    }

    /// Control points of column `col` (a curve along `v`).
    pub fn column(&self, col: usize) -> [Point3; 4] {
        [
            self.points[0][col],
            self.points[1][col],
            self.points[2][col],
            self.points[3][col],
        ]
    }

    /// Surface values at `(0,0)`, `(1,0)`, `(0,1)`, `(1,1)`.
    pub fn corners(&self) -> [Point3; 4] {
        [
            self.points[0][0],
            self.points[0][3],
            self.points[3][0],
            self.points[3][3],
        ]
    }

    /// Evaluate position and both tangents at `(u, v)` by de Casteljau reduction.
    ///
    /// Each row is reduced with `u`, giving a column of four points and a column
    /// of four row derivatives. Reducing the points with `v` yields the position
    /// and `∂S/∂v`; reducing the row derivatives with `v` yields `∂S/∂u`.
    pub fn evaluate(&self, u: f64, v: f64) -> SurfaceSample {
        let mut column = [DVec3::ZERO; 4];
        let mut column_du = [DVec3::ZERO; 4];
        for (r, row) in self.points.iter().enumerate() {
            let (p, du) = decasteljau::eval(row, u);
            column[r] = p;
            column_du[r] = du;
        }

        let (position, tangent_v) = decasteljau::eval(&column, v);
        let (tangent_u, _) = decasteljau::eval(&column_du, v);

        SurfaceSample {
            position,
            tangent_u,
            tangent_v,
        }
    }

    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.evaluate(u, v).position
    }

    pub fn normal_at(&self, u: f64, v: f64) -> Option<Vector3> {
        self.evaluate(u, v).normal(Tolerance::default())
    }

    /// Split along `u` at `t` into the patches covering `u ∈ [0, t]` and `[t, 1]`.
    pub fn split_u(&self, t: f64) -> (Self, Self) {
        let mut low = [[DVec3::ZERO; 4]; 4];
        let mut high = [[DVec3::ZERO; 4]; 4];
        for (r, row) in self.points.iter().enumerate() {
            let (a, b) = decasteljau::split(row, t);
            low[r] = a;
            high[r] = b;
        }
        (Self::new(low), Self::new(high))
    }

    /// Split along `v` at `t` into the patches covering `v ∈ [0, t]` and `[t, 1]`.
    pub fn split_v(&self, t: f64) -> (Self, Self) {
        let mut low = [[DVec3::ZERO; 4]; 4];
        let mut high = [[DVec3::ZERO; 4]; 4];
        for c in 0..4 {
            let (a, b) = decasteljau::split(&self.column(c), t);
            for r in 0..4 {
                low[r][c] = a[r];
                high[r][c] = b[r];
            }
        }
        (Self::new(low), Self::new(high))
    }

    /// Split at `u = v = 0.5` into four quadrants.
    ///
    /// Order: `(u low, v low)`, `(u high, v low)`, `(u low, v high)`, `(u high, v high)`.
    pub fn split_quad(&self) -> [Self; 4] {
        let (u_low, u_high) = self.split_u(0.5);
        let (ll, lh) = u_low.split_v(0.5);
        let (hl, hh) = u_high.split_v(0.5);
        [ll, hl, lh, hh]
    }

    /// Largest distance from a control point to the bilinear quad spanned by the corners.
    ///
    /// `P[r][c]` is compared with the bilinear interpolation at `(c/3, r/3)`.
    /// The patch lies within this distance of that quad, so a small value means
    /// the four corners alone describe it well.
    pub fn flatness(&self) -> f64 {
        let [p00, p10, p01, p11] = self.corners();
        let mut max_dist: f64 = 0.0;
        for (r, row) in self.points.iter().enumerate() {
            let t = r as f64 / 3.0;
            for (c, p) in row.iter().enumerate() {
                let s = c as f64 / 3.0;
                let bilinear = p00 * ((1.0 - s) * (1.0 - t))
                    + p10 * (s * (1.0 - t))
                    + p01 * ((1.0 - s) * t)
                    + p11 * (s * t);
                max_dist = max_dist.max((*p - bilinear).length());
            }
        }
        max_dist
    }

    pub fn is_flat(&self, tolerance: f64) -> bool {
        self.flatness() <= tolerance
    }
}
