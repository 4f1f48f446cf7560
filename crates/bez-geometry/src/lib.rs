//! bezmesh geometry: bicubic Bézier patches and de Casteljau evaluation.

pub mod bezier;

pub use bezier::{ControlGrid, SurfaceSample};
