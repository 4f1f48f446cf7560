//! Bicubic Bézier patches.

pub mod decasteljau;
mod grid;

pub use grid::{ControlGrid, SurfaceSample};
