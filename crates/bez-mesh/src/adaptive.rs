//! Adaptive tessellation of Bézier patches.
//!
//! The control grid is split into four quadrants with de Casteljau subdivision
//! until each quadrant passes the flatness test or the depth bound is reached.
//! Leaves are emitted as quads over their corners; a leaf whose edges carry
//! corners of finer neighbours is fanned from its centre through those corners
//! so the mesh stays free of T-junction cracks.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use bez_core::Tolerance;
use bez_geometry::ControlGrid;
use bez_math::Vector3;

use crate::config::MAX_DEPTH_LIMIT;
use crate::normal::surface_normal;
use crate::{Triangle, Vertex};

/// Result of adaptively tessellating one patch.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveMesh {
    pub triangles: Vec<Triangle>,
    /// Number of quad-tree leaves
    pub leaf_count: usize,
    /// Leaves emitted at the depth bound without passing the flatness test
    pub forced_leaves: usize,
}

/// A quad-tree leaf in integer parameter coordinates (`resolution` units per axis).
#[derive(Debug, Clone, Copy)]
struct Leaf {
    x: u32,
    y: u32,
    size: u32,
}

/// Collects leaves during recursive subdivision.
struct LeafCollector {
    tolerance: f64,
    max_depth: u32,
    resolution: u32,
    leaves: Vec<Leaf>,
    forced: usize,
}

impl LeafCollector {
    fn new(tolerance: f64, max_depth: u32) -> Self {
        Self {
            tolerance,
            max_depth,
            resolution: 1 << max_depth,
            leaves: Vec::new(),
            forced: 0,
        }
    }

    fn subdivide(&mut self, grid: &ControlGrid, x: u32, y: u32, depth: u32) {
        let size = self.resolution >> depth;

        if grid.is_flat(self.tolerance) {
            self.leaves.push(Leaf { x, y, size });
            return;
        }
        if depth >= self.max_depth {
            self.forced += 1;
            self.leaves.push(Leaf { x, y, size });
            return;
        }

        let half = size / 2;
        let [ll, hl, lh, hh] = grid.split_quad();
        self.subdivide(&ll, x, y, depth + 1);
        self.subdivide(&hl, x + half, y, depth + 1);
        self.subdivide(&lh, x, y + half, depth + 1);
        self.subdivide(&hh, x + half, y + half, depth + 1);
    }
}

/// Emits triangles for collected leaves, sharing vertices through a cache.
struct LeafEmitter<'a> {
    grid: &'a ControlGrid,
    normal_tolerance: Tolerance,
    resolution: f64,
    /// Leaf corners by row (`y`) and by column (`x`)
    rows: BTreeMap<u32, BTreeSet<u32>>,
    columns: BTreeMap<u32, BTreeSet<u32>>,
    cache: HashMap<(u32, u32), Vertex>,
    last_normal: Option<Vector3>,
}

impl<'a> LeafEmitter<'a> {
    fn new(grid: &'a ControlGrid, normal_tolerance: Tolerance, resolution: u32, leaves: &[Leaf]) -> Self {
        let mut rows: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        let mut columns: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for leaf in leaves {
            let (x1, y1) = (leaf.x + leaf.size, leaf.y + leaf.size);
            for (x, y) in [(leaf.x, leaf.y), (x1, leaf.y), (x1, y1), (leaf.x, y1)] {
                rows.entry(y).or_default().insert(x);
                columns.entry(x).or_default().insert(y);
            }
        }
        Self {
            grid,
            normal_tolerance,
            resolution: resolution as f64,
            rows,
            columns,
            cache: HashMap::new(),
            last_normal: None,
        }
    }

    /// Evaluate (once) the vertex at integer parameter coordinates `(x, y)`.
    fn vertex(&mut self, x: u32, y: u32) -> Vertex {
        if let Some(v) = self.cache.get(&(x, y)) {
            return *v;
        }
        let u = x as f64 / self.resolution;
        let v = y as f64 / self.resolution;
        let normal = surface_normal(self.grid, u, v, self.normal_tolerance)
            .or(self.last_normal)
            .unwrap_or(Vector3::Z);
        self.last_normal = Some(normal);

        let vertex = Vertex::new(self.grid.point_at(u, v), normal);
        self.cache.insert((x, y), vertex);
        vertex
    }

    /// Corners strictly inside `(lo, hi)` on row `y`.
    fn row_between(&self, y: u32, lo: u32, hi: u32) -> Vec<u32> {
        self.rows
            .get(&y)
            .map(|xs| xs.range(lo + 1..hi).copied().collect())
            .unwrap_or_default()
    }

    /// Corners strictly inside `(lo, hi)` on column `x`.
    fn column_between(&self, x: u32, lo: u32, hi: u32) -> Vec<u32> {
        self.columns
            .get(&x)
            .map(|ys| ys.range(lo + 1..hi).copied().collect())
            .unwrap_or_default()
    }

    /// Boundary of a leaf, counter-clockwise in `(u, v)`, including T-junction corners.
    fn boundary(&self, leaf: &Leaf) -> Vec<(u32, u32)> {
        let (x0, y0) = (leaf.x, leaf.y);
        let (x1, y1) = (x0 + leaf.size, y0 + leaf.size);

        let mut ring = vec![(x0, y0)];
        ring.extend(self.row_between(y0, x0, x1).into_iter().map(|x| (x, y0)));
        ring.push((x1, y0));
        ring.extend(self.column_between(x1, y0, y1).into_iter().map(|y| (x1, y)));
        ring.push((x1, y1));
        ring.extend(self.row_between(y1, x0, x1).into_iter().rev().map(|x| (x, y1)));
        ring.push((x0, y1));
        ring.extend(self.column_between(x0, y0, y1).into_iter().rev().map(|y| (x0, y)));
        ring
    }

    fn emit(&mut self, leaf: &Leaf, triangles: &mut Vec<Triangle>) {
        let ring = self.boundary(leaf);

        if ring.len() == 4 {
            let c00 = self.vertex(ring[0].0, ring[0].1);
            let c10 = self.vertex(ring[1].0, ring[1].1);
            let c11 = self.vertex(ring[2].0, ring[2].1);
            let c01 = self.vertex(ring[3].0, ring[3].1);
            triangles.push(Triangle::new(c00, c10, c11));
            triangles.push(Triangle::new(c00, c11, c01));
            return;
        }

        // Only leaves above the finest level have neighbours with extra corners, so size >= 2.
        let half = leaf.size / 2;
        let center = self.vertex(leaf.x + half, leaf.y + half);
        for k in 0..ring.len() {
            let (ax, ay) = ring[k];
            let (bx, by) = ring[(k + 1) % ring.len()];
            let a = self.vertex(ax, ay);
            let b = self.vertex(bx, by);
            triangles.push(Triangle::new(center, a, b));
        }
    }
}

/// Adaptively tessellate a patch so every leaf is within `tolerance` of flat.
///
/// Flatness is measured by [`ControlGrid::flatness`]. Leaves still curved at
/// `max_depth` are emitted anyway and counted in
/// [`AdaptiveMesh::forced_leaves`]. Vertex positions and normals are evaluated
/// on the original patch at dyadic `(u, v)` corners and shared between leaves.
/// Triangles come out in depth-first quadrant order.
pub fn adaptive_tessellate(
    grid: &ControlGrid,
    tolerance: f64,
    max_depth: u32,
    normal_tolerance: Tolerance,
) -> AdaptiveMesh {
    let max_depth = max_depth.min(MAX_DEPTH_LIMIT);

    let mut collector = LeafCollector::new(tolerance, max_depth);
    collector.subdivide(grid, 0, 0, 0);

    let mut emitter = LeafEmitter::new(grid, normal_tolerance, collector.resolution, &collector.leaves);
    let mut triangles = Vec::with_capacity(collector.leaves.len() * 2);
    for leaf in &collector.leaves {
        emitter.emit(leaf, &mut triangles);
    }

    AdaptiveMesh {
        triangles,
        leaf_count: collector.leaves.len(),
        forced_leaves: collector.forced,
    }
}
