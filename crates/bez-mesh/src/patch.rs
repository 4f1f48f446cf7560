//! A single surface patch and its tessellation.

use bez_core::Tolerance;
use bez_geometry::ControlGrid;
use serde::{Deserialize, Serialize};

use crate::adaptive::adaptive_tessellate;
use crate::config::{SubdivisionMode, TessellationConfig};
use crate::uniform::uniform_tessellate;
use crate::Triangle;

/// One Bézier patch, or a bag of ready-made triangles from an indexed-face file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    grid: Option<ControlGrid>,
    triangles: Vec<Triangle>,
}

impl Patch {
    /// An un-tessellated patch.
    pub fn from_grid(grid: ControlGrid) -> Self {
        Self {
            grid: Some(grid),
            triangles: Vec::new(),
        }
    }

    /// A patch with no control grid that holds triangles directly.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            grid: None,
            triangles,
        }
    }

    pub fn grid(&self) -> Option<&ControlGrid> {
        self.grid.as_ref()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn is_tessellated(&self) -> bool {
        !self.triangles.is_empty()
    }

    /// Replace the triangles with a uniform tessellation at parametric `step`.
    pub fn uniform_subdivide(&mut self, step: f64) {
        if let Some(grid) = &self.grid {
            self.triangles = uniform_tessellate(grid, step, Tolerance::default());
        }
    }

    /// Replace the triangles with an adaptive tessellation at flatness `tolerance`.
    ///
    /// Returns the number of leaves forced flat at the default depth bound.
    pub fn adaptive_subdivide(&mut self, tolerance: f64) -> usize {
        let config = TessellationConfig::adaptive(tolerance);
        self.subdivide(&config)
    }

    /// Tessellate according to `config`, overwriting any earlier triangles.
    ///
    /// Patches without a control grid keep their triangles. Returns the number
    /// of adaptive leaves that hit the depth bound.
    pub fn subdivide(&mut self, config: &TessellationConfig) -> usize {
        let Some(grid) = &self.grid else {
            return 0;
        };

        match config.mode {
            SubdivisionMode::Uniform => {
                self.triangles = uniform_tessellate(grid, config.parameter, config.tolerance);
                0
            }
            SubdivisionMode::Adaptive => {
                let mesh = adaptive_tessellate(grid, config.parameter, config.max_depth, config.tolerance);
                if mesh.forced_leaves > 0 {
                    log::warn!(
                        "{} of {} leaves reached depth {} before becoming flat within {}",
                        mesh.forced_leaves,
                        mesh.leaf_count,
                        config.max_depth,
                        config.parameter
                    );
                }
                self.triangles = mesh.triangles;
                mesh.forced_leaves
            }
        }
    }
}

impl From<ControlGrid> for Patch {
    fn from(grid: ControlGrid) -> Self {
        Self::from_grid(grid)
    }
}
