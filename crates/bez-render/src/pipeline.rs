use bez_math::{Color, DMat4, DVec3};
use bez_mesh::Model;
use bytemuck::{Pod, Zeroable};

use crate::view::{PolygonMode, ViewState};

/// Vertex color for models that carry none.
pub const DEFAULT_MODEL_COLOR: Color = Color::WHITE;

/// Directional light shining from `(-7, -7, 7)` toward the origin.
pub const LIGHT_DIRECTION: DVec3 = DVec3::new(-7.0, -7.0, 7.0);

/// Vertex with f32 data packed for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl GpuVertex {
    pub fn new(position: DVec3, normal: DVec3, color: Color) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
            color: color.to_array(),
        }
    }
}

/// Prepared render data ready for GPU upload.
#[derive(Debug, Clone, Default)]
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub polygon_mode: PolygonMode,
}

impl RenderMesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Convert a tessellated model to GPU-ready buffers.
///
/// Normals follow the view's shading mode. Every vertex takes the model color,
/// or [`DEFAULT_MODEL_COLOR`] when the model has none.
pub fn prepare_model(model: &Model, view: &ViewState) -> RenderMesh {
    let mesh = model.to_triangle_mesh(view.shading);
    let color = model.color.unwrap_or(DEFAULT_MODEL_COLOR).clamped();

    let vertices = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .map(|(&p, &n)| GpuVertex::new(p, n, color))
        .collect();

    RenderMesh {
        vertices,
        indices: mesh.indices,
        polygon_mode: view.polygon_mode,
    }
}

/// Per-frame uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz: unit direction toward the light, w: 0
    pub light_direction: [f32; 4],
    /// rgb: diffuse light color, a: 1
    pub light_color: [f32; 4],
}

impl FrameUniforms {
    pub fn from_view(view: &ViewState, width: u32, height: u32) -> Self {
        let [r, g, b] = view.light_color.clamped().to_array();
        let direction = LIGHT_DIRECTION.normalize().as_vec3();
        Self {
            model_view: to_f32_cols(view.model_view()),
            projection: to_f32_cols(view.projection(width, height)),
            light_direction: direction.extend(0.0).to_array(),
            light_color: [r, g, b, 1.0],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Column-major f32 copy of a matrix.
fn to_f32_cols(mat: DMat4) -> [[f32; 4]; 4] {
    mat.as_mat4().to_cols_array_2d()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bez_geometry::ControlGrid;
    use bez_mesh::{Patch, ShadingMode, TessellationConfig, Triangle};

    fn planar_model(color: Option<Color>) -> Model {
        let mut points = [[DVec3::ZERO; 4]; 4];
        for (r, row) in points.iter_mut().enumerate() {
            for (c, p) in row.iter_mut().enumerate() {
                *p = DVec3::new(c as f64 / 3.0, r as f64 / 3.0, 0.0);
            }
        }
        let mut model = Model::new(vec![Patch::from_grid(ControlGrid::new(points))], color);
        model.subdivide(&TessellationConfig::uniform(0.5)).unwrap();
        model
    }

    #[test]
    fn test_gpu_vertex_size() {
        // 3 floats (position) + 3 floats (normal) + 3 floats (color)
        assert_eq!(std::mem::size_of::<GpuVertex>(), 36);
    }

    #[test]
    fn test_prepare_model_counts_and_bytes() {
        let model = planar_model(Some(Color::GREEN));
        let mesh = prepare_model(&model, &ViewState::default());
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.vertex_bytes().len(), 24 * 36);
        assert_eq!(mesh.index_bytes().len(), 24 * 4);
        assert!(mesh.vertices.iter().all(|v| v.color == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_prepare_model_default_color() {
        let model = planar_model(None);
        let mesh = prepare_model(&model, &ViewState::default());
        assert!(mesh.vertices.iter().all(|v| v.color == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_prepare_model_follows_shading() {
        let tri = Triangle::from_positions(DVec3::ZERO, DVec3::X, DVec3::Y);
        let mut smooth = tri;
        smooth.vertices[0].normal = DVec3::X;
        let model = Model::new(vec![Patch::from_triangles(vec![smooth])], None);

        let view = ViewState::default();
        let flat = prepare_model(&model, &view.with_shading(ShadingMode::Flat));
        assert_eq!(flat.vertices[0].normal, [0.0, 0.0, 1.0]);

        let smooth = prepare_model(&model, &view.with_shading(ShadingMode::Smooth));
        assert_eq!(smooth.vertices[0].normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_frame_uniforms() {
        let view = ViewState::default();
        let uniforms = FrameUniforms::from_view(&view, 640, 480);
        // Translation lands in the last column.
        assert!((uniforms.model_view[3][2] + 15.0).abs() < 1e-5);
        assert_eq!(uniforms.light_color, [1.0, 0.0, 0.0, 1.0]);
        let d = uniforms.light_direction;
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-6);
        assert_eq!(uniforms.as_bytes().len(), std::mem::size_of::<FrameUniforms>());
    }
}
