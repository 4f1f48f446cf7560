//! Triangles with per-vertex normals.

use bez_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A mesh vertex: position plus shading normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3,
    pub normal: Vector3,
}

impl Vertex {
    pub fn new(position: Point3, normal: Vector3) -> Self {
        Self { position, normal }
    }
}

/// Three vertices wound counter-clockwise around their outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Build a flat-shaded triangle from bare positions.
    ///
    /// Degenerate faces get `+Z` since they have no direction of their own.
    pub fn from_positions(a: Point3, b: Point3, c: Point3) -> Self {
        let normal = face_normal(a, b, c).unwrap_or(Vector3::Z);
        Self::new(
            Vertex::new(a, normal),
            Vertex::new(b, normal),
            Vertex::new(c, normal),
        )
    }

    pub fn positions(&self) -> [Point3; 3] {
        [
            self.vertices[0].position,
            self.vertices[1].position,
            self.vertices[2].position,
        ]
    }

    /// Unit normal of the face from its winding, `None` if it has zero area.
    pub fn face_normal(&self) -> Option<Vector3> {
        let [a, b, c] = self.positions();
        face_normal(a, b, c)
    }

    pub fn area(&self) -> f64 {
        let [a, b, c] = self.positions();
        0.5 * (b - a).cross(c - a).length()
    }

    /// Copy of this triangle with every vertex normal set to the face normal.
    ///
    /// Zero-area faces keep their normals, so the result is stable under repetition.
    pub fn flat_shaded(&self) -> Triangle {
        match self.face_normal() {
            Some(n) => {
                let mut flat = *self;
                for v in &mut flat.vertices {
                    v.normal = n;
                }
                flat
            }
            None => *self,
        }
    }
}

fn face_normal(a: Point3, b: Point3, c: Point3) -> Option<Vector3> {
    (b - a).cross(c - a).try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bez_math::DVec3;

    fn ccw_triangle() -> Triangle {
        Triangle::new(
            Vertex::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(0.0, 0.6, 0.8)),
            Vertex::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.6, 0.0, 0.8)),
            Vertex::new(DVec3::new(0.0, 1.0, 0.0), DVec3::Z),
        )
    }

    #[test]
    fn test_face_normal_ccw() {
        let n = ccw_triangle().face_normal().unwrap();
        assert!((n - DVec3::Z).length() < 1e-12);
        assert!((ccw_triangle().area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_flat_shaded_is_idempotent() {
        let once = ccw_triangle().flat_shaded();
        for v in &once.vertices {
            assert_eq!(v.normal, DVec3::Z);
        }
        assert_eq!(once.flat_shaded(), once);
    }

    #[test]
    fn test_degenerate_keeps_normals() {
        let p = DVec3::new(1.0, 1.0, 1.0);
        let tri = Triangle::new(
            Vertex::new(p, DVec3::X),
            Vertex::new(p, DVec3::Y),
            Vertex::new(p, DVec3::Z),
        );
        assert!(tri.face_normal().is_none());
        assert_eq!(tri.flat_shaded(), tri);
    }

    #[test]
    fn test_from_positions() {
        let tri = Triangle::from_positions(DVec3::ZERO, DVec3::Y, DVec3::X);
        for v in &tri.vertices {
            assert!((v.normal + DVec3::Z).length() < 1e-12);
        }
    }
}
