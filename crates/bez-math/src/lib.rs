pub mod aabb;
pub mod color;

pub use glam::{DMat4, DVec2, DVec3};
pub use aabb::Aabb3;
pub use color::Color;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
