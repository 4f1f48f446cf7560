use bez_math::{Point3, Vector3};

use crate::Triangle;

/// Indexed triangle mesh handed to render preparation.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Build a mesh with three unshared vertices per triangle.
    pub fn from_triangles<'a, I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = &'a Triangle>,
    {
        let mut mesh = TriangleMesh::default();
        for tri in triangles {
            for v in &tri.vertices {
                mesh.indices.push(mesh.positions.len() as u32);
                mesh.positions.push(v.position);
                mesh.normals.push(v.normal);
            }
        }
        mesh
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Merge another mesh into this one, offsetting indices appropriately.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }
}
