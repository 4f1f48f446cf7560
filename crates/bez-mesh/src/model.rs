//! A collection of patches tessellated together.

use bez_core::{Result, Validate};
use bez_geometry::ControlGrid;
use bez_math::{Aabb3, Color};
use serde::{Deserialize, Serialize};

use crate::config::{ShadingMode, TessellationConfig};
use crate::{Patch, Triangle, TriangleMesh};

/// Totals from one subdivision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubdivisionStats {
    pub patches: usize,
    pub triangles: usize,
    /// Adaptive leaves emitted at the depth bound
    pub forced_leaves: usize,
}

/// Ordered patches plus the base color they are drawn with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub patches: Vec<Patch>,
    /// `None` for indexed-face input; renderers pick their own default.
    pub color: Option<Color>,
}

impl Model {
    pub fn new(patches: Vec<Patch>, color: Option<Color>) -> Self {
        Self { patches, color }
    }

    /// One un-tessellated patch per control grid.
    pub fn from_grids<I>(grids: I, color: Color) -> Self
    where
        I: IntoIterator<Item = ControlGrid>,
    {
        Self::new(grids.into_iter().map(Patch::from_grid).collect(), Some(color))
    }

    /// Tessellate every patch in place.
    ///
    /// The configuration is validated first; an invalid parameter leaves the
    /// model untouched.
    pub fn subdivide(&mut self, config: &TessellationConfig) -> Result<SubdivisionStats> {
        config.validate()?;

        let mut stats = SubdivisionStats {
            patches: self.patches.len(),
            ..Default::default()
        };
        for (i, patch) in self.patches.iter_mut().enumerate() {
            stats.forced_leaves += patch.subdivide(config);
            log::debug!("patch {i}: {} triangles", patch.triangles().len());
            stats.triangles += patch.triangles().len();
        }
        log::info!(
            "tessellated {} patches into {} triangles ({:?}, parameter {})",
            stats.patches,
            stats.triangles,
            config.mode,
            config.parameter
        );
        Ok(stats)
    }

    /// Consume the model and return it tessellated.
    pub fn subdivided(mut self, config: &TessellationConfig) -> Result<Self> {
        self.subdivide(config)?;
        Ok(self)
    }

    /// All triangles of all patches, in patch order.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.patches.iter().flat_map(|p| p.triangles().iter())
    }

    pub fn triangle_count(&self) -> usize {
        self.patches.iter().map(|p| p.triangles().len()).sum()
    }

    /// Copies of all triangles with per-face normals; the model is not modified.
    pub fn flat_normals(&self) -> Vec<Triangle> {
        self.triangles().map(Triangle::flat_shaded).collect()
    }

    /// All triangles with normals chosen by `shading`.
    pub fn shaded_triangles(&self, shading: ShadingMode) -> Vec<Triangle> {
        match shading {
            ShadingMode::Flat => self.flat_normals(),
            ShadingMode::Smooth => self.triangles().copied().collect(),
        }
    }

    /// Bounding box of all triangle vertices, `None` before tessellation.
    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.triangles().flat_map(|t| t.positions()))
    }

    /// Unshared-vertex mesh of the whole model, one patch after another.
    pub fn to_triangle_mesh(&self, shading: ShadingMode) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        for patch in &self.patches {
            let patch_mesh = match shading {
                ShadingMode::Flat => {
                    let flat: Vec<Triangle> = patch.triangles().iter().map(Triangle::flat_shaded).collect();
                    TriangleMesh::from_triangles(&flat)
                }
                ShadingMode::Smooth => TriangleMesh::from_triangles(patch.triangles()),
            };
            mesh.merge(&patch_mesh);
        }
        mesh
    }
}
