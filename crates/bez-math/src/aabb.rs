use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.include(p);
        }
        Some(aabb)
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f64 {
        self.extents().length()
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_from_points() {
        let pts = vec![dvec3(1.0, 2.0, 3.0), dvec3(-1.0, 5.0, 0.0), dvec3(3.0, -1.0, 2.0)];
        let aabb = Aabb3::from_points(pts).unwrap();
        assert_eq!(aabb.min, dvec3(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, dvec3(3.0, 5.0, 3.0));
    }

    #[test]
    fn test_from_no_points() {
        assert!(Aabb3::from_points(std::iter::empty::<Point3>()).is_none());
    }

    #[test]
    fn test_merge_and_diagonal() {
        let a = Aabb3::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 1.0, 0.0));
        let b = Aabb3::new(dvec3(1.0, 1.0, 0.0), dvec3(3.0, 4.0, 0.0));
        let m = a.merge(&b);
        assert_eq!(m.min, dvec3(0.0, 0.0, 0.0));
        assert_eq!(m.max, dvec3(3.0, 4.0, 0.0));
        assert!((m.diagonal() - 5.0).abs() < 1e-12);
        assert_eq!(m.center(), dvec3(1.5, 2.0, 0.0));
    }
}
