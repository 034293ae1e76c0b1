//! Debug wireframe line lists
//!
//! Simple line primitives for visualizing bounds and paths. Lines are
//! collected into a flat vertex/color stream each frame and drawn by the
//! debug stage of the main pass.

use crate::foundation::math::Vec3;
use crate::geometry::Aabb;

/// Edge list of a box as corner-index pairs
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0), // near face
    (4, 5), (5, 7), (7, 6), (6, 4), // far face
    (0, 4), (1, 5), (2, 6), (3, 7), // connecting edges
];

/// Accumulated debug lines for one frame
#[derive(Debug, Default)]
pub struct DebugLines {
    vertices: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl DebugLines {
    /// Create an empty line list
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all lines
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
    }

    /// Add a single line segment
    pub fn line(&mut self, start: Vec3, end: Vec3, color: Vec3) {
        self.vertices.push(start.into());
        self.vertices.push(end.into());
        let c: [f32; 3] = color.into();
        self.colors.push(c);
        self.colors.push(c);
    }

    /// Add the twelve edges of a box
    pub fn aabb(&mut self, bounds: &Aabb, color: Vec3) {
        let corners = bounds.corners();
        for (a, b) in BOX_EDGES {
            self.line(corners[a], corners[b], color);
        }
    }

    /// Add a polyline through the given points
    pub fn path(&mut self, points: &[Vec3], color: Vec3) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
    }

    /// Number of line vertices (two per segment)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether any lines were added
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Line vertices as bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Line colors as bytes for upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Sequential indices covering every line vertex
    pub fn indices(&self) -> Vec<u32> {
        (0..self.vertices.len() as u32).collect()
    }
}
