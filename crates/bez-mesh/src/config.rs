//! Tessellation settings chosen once at startup.

use bez_core::{BezError, Result, Tolerance, Validate};
use serde::{Deserialize, Serialize};

use crate::uniform::checked_subdivision_count;

/// Deepest quad-tree level the adaptive subdivider accepts.
///
/// At this depth a patch that never flattens yields `4^10` leaves.
pub const MAX_DEPTH_LIMIT: u32 = 10;

/// Most cells per axis the uniform subdivider accepts, matching the finest
/// adaptive level.
pub const MAX_UNIFORM_CELLS: usize = 1 << MAX_DEPTH_LIMIT;

/// Default recursion bound for adaptive subdivision.
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// How a patch is sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubdivisionMode {
    /// Fixed parametric step; the parameter is the step size.
    #[default]
    Uniform,
    /// Quad-tree refinement; the parameter is the flatness tolerance.
    Adaptive,
}

/// Which normals a consumer reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// One face normal per triangle.
    #[default]
    Flat,
    /// Per-vertex surface normals.
    Smooth,
}

impl ShadingMode {
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Smooth,
            ShadingMode::Smooth => ShadingMode::Flat,
        }
    }
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

/// Subdivision mode plus its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TessellationConfig {
    pub mode: SubdivisionMode,
    /// Step size (uniform) or flatness tolerance (adaptive), in model units for the latter
    pub parameter: f64,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default)]
    pub tolerance: Tolerance,
}

impl TessellationConfig {
    pub fn new(mode: SubdivisionMode, parameter: f64) -> Self {
        Self {
            mode,
            parameter,
            max_depth: DEFAULT_MAX_DEPTH,
            tolerance: Tolerance::default(),
        }
    }

    pub fn uniform(step: f64) -> Self {
        Self::new(SubdivisionMode::Uniform, step)
    }

    pub fn adaptive(tolerance: f64) -> Self {
        Self::new(SubdivisionMode::Adaptive, tolerance)
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Validate for TessellationConfig {
    fn validate(&self) -> Result<()> {
        if !self.parameter.is_finite() || self.parameter <= 0.0 {
            return Err(BezError::InvalidParameter(format!(
                "subdivision parameter must be a positive number, got {}",
                self.parameter
            )));
        }
        if self.mode == SubdivisionMode::Uniform
            && checked_subdivision_count(self.parameter).is_none()
        {
            return Err(BezError::InvalidParameter(format!(
                "step {} needs more than {MAX_UNIFORM_CELLS} cells per axis",
                self.parameter
            )));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(BezError::InvalidParameter(format!(
                "max depth {} exceeds the limit of {MAX_DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
