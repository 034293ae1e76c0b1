//! Placed model instances and world batching
//!
//! A [`Model`] is a placed instance of a shared mesh. [`WorldBatch`]
//! flattens every visible instance into one shared vertex stream and one
//! shared index stream with per-instance count/offset records, so the whole
//! scene renders as indexed sub-range draws out of a single buffer pair
//! instead of one buffer per object.

use std::mem::size_of;
use std::sync::Arc;

use crate::foundation::math::{trs, transform_point, Mat4, Vec3};
use crate::geometry::Aabb;
use crate::render::Mesh;

/// Attribute slots written per vertex: position, normal, and a duplicated
/// normal to satisfy the fixed three-slot stride of the mesh pipeline.
pub const SLOTS_PER_VERTEX: usize = 3;

/// A placed instance of a shared mesh
#[derive(Debug, Clone)]
pub struct Model {
    /// Shared, immutable mesh geometry
    pub mesh: Arc<Mesh>,
    /// World position
    pub position: Vec3,
    /// Euler rotation (applied X, then Y, then Z)
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Point the rotation and scale are applied about, in object space.
    /// Defaults to the center of the mesh bounds.
    pub pivot: Vec3,
}

impl Model {
    /// Place a mesh at the origin with its bounds center as pivot
    pub fn new(mesh: Arc<Mesh>) -> Self {
        let pivot = mesh.bounds.center();
        Self {
            mesh,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            pivot,
        }
    }

    /// World transform of this instance:
    /// `T(position) * R(rotation) * S(scale) * T(-pivot)`.
    pub fn transform(&self) -> Mat4 {
        trs(self.position, self.rotation, self.scale)
            * Mat4::new_translation(&-self.pivot)
    }

    /// World-space bounding box of the transformed mesh bounds
    pub fn world_bounds(&self) -> Aabb {
        let m = self.transform();
        let corners = self.mesh.bounds.corners().map(|c| transform_point(c, &m));
        let mut bounds = Aabb::new(corners[0], corners[0]);
        for c in &corners[1..] {
            bounds.min = bounds.min.inf(c);
            bounds.max = bounds.max.sup(c);
        }
        bounds
    }
}

/// Per-instance record inside a [`WorldBatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSlot(pub usize);

/// Flattened scene geometry ready for GPU upload.
///
/// Vertex data is laid out as [`SLOTS_PER_VERTEX`] consecutive `[f32; 3]`
/// entries per vertex. Index values are rebased so the shared index stream
/// addresses each instance's vertex slice; recorded byte offsets grow
/// monotonically and never overlap.
#[derive(Debug, Default)]
pub struct WorldBatch {
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
    counts: Vec<i32>,
    byte_offsets: Vec<usize>,
    transforms: Vec<[[f32; 4]; 4]>,
}

impl WorldBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry and records
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.counts.clear();
        self.byte_offsets.clear();
        self.transforms.clear();
    }

    /// Append one model instance; returns its slot for later transform
    /// refreshes.
    pub fn push(&mut self, model: &Model) -> BatchSlot {
        let mesh = &model.mesh;
        let vertex_offset = self.vertices.len();
        let index_offset = self.indices.len();
        let base = (vertex_offset / SLOTS_PER_VERTEX) as u32;

        self.vertices.reserve(mesh.vertex_count() * SLOTS_PER_VERTEX);
        for i in 0..mesh.vertex_count() {
            let normal: [f32; 3] = mesh.normals[i].into();
            self.vertices.push(mesh.positions[i].into());
            self.vertices.push(normal);
            self.vertices.push(normal);
        }

        self.indices.reserve(mesh.face_count() * 3);
        for tri in &mesh.indices {
            for &v in tri {
                self.indices.push(v + base);
            }
        }

        let slot = BatchSlot(self.counts.len());
        self.counts.push((mesh.face_count() * 3) as i32);
        self.byte_offsets.push(index_offset * size_of::<u32>());
        self.transforms.push(model.transform().into());
        slot
    }

    /// Refresh one instance's world transform without touching geometry
    pub fn set_transform(&mut self, slot: BatchSlot, model: &Model) {
        self.transforms[slot.0] = model.transform().into();
    }

    /// Number of batched instances
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the batch holds no instances
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Per-instance element counts (`faces * 3`)
    pub fn counts(&self) -> &[i32] {
        &self.counts
    }

    /// Per-instance byte offsets into the index stream
    pub fn byte_offsets(&self) -> &[usize] {
        &self.byte_offsets
    }

    /// Per-instance world transforms, column-major
    pub fn transforms(&self) -> &[[[f32; 4]; 4]] {
        &self.transforms
    }

    /// Raw vertex attribute stream
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Raw rebased index stream
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex stream as bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index stream as bytes for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Transform array as bytes for upload
    pub fn transform_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    fn mesh_with_vertices(n: usize) -> Arc<Mesh> {
        // n vertices, fanned into n-2 triangles.
        let positions: Vec<Vec3> = (0..n)
            .map(|i| Vec3::new(i as f32, (i % 2) as f32, 0.0))
            .collect();
        let indices: Vec<[u32; 3]> = (1..n as u32 - 1).map(|i| [0, i, i + 1]).collect();
        Arc::new(Mesh::from_positions(positions, indices))
    }

    #[test]
    fn flattens_two_instances_with_rebased_indices() {
        let mut batch = WorldBatch::new();
        batch.push(&Model::new(mesh_with_vertices(3)));
        batch.push(&Model::new(mesh_with_vertices(5)));

        // Three attribute slots per vertex.
        assert_eq!(batch.vertices().len(), 3 * 3 + 5 * 3);
        // The second instance's indices all address its own vertex slice.
        let second_offset = batch.byte_offsets()[1] / size_of::<u32>();
        assert!(batch.indices()[second_offset..].iter().all(|&i| i >= 3));
        assert!(batch.indices()[second_offset..].iter().all(|&i| i < 8));
    }

    #[test]
    fn records_counts_and_monotonic_offsets() {
        let mut batch = WorldBatch::new();
        batch.push(&Model::new(mesh_with_vertices(3)));
        batch.push(&Model::new(mesh_with_vertices(5)));
        batch.push(&Model::new(mesh_with_vertices(4)));

        assert_eq!(batch.counts(), &[3, 9, 6]);
        assert_eq!(batch.byte_offsets(), &[0, 12, 48]);
        // count * element size advances the offset exactly.
        for i in 1..batch.len() {
            assert_eq!(
                batch.byte_offsets()[i],
                batch.byte_offsets()[i - 1] + batch.counts()[i - 1] as usize * size_of::<u32>()
            );
        }
    }

    #[test]
    fn pivot_keeps_rotation_centered() {
        // A cube centered away from the origin still spins in place.
        let mesh = Arc::new(Mesh::new(
            vec![Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0)],
            vec![Vec3::new(0.0, 1.0, 0.0); 2],
            Vec::new(),
        ));
        let mut model = Model::new(mesh);
        assert_relative_eq!(model.pivot, Vec3::new(2.0, 2.0, 2.0));

        model.rotation = Vec3::new(0.0, HALF_PI, 0.0);
        let center = transform_point(model.pivot, &model.transform());
        assert_relative_eq!(center, Vec3::zeros(), epsilon = 1e-5);

        model.position = Vec3::new(7.0, 0.0, 0.0);
        let center = transform_point(model.pivot, &model.transform());
        assert_relative_eq!(center, Vec3::new(7.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn transform_refresh_leaves_geometry_alone() {
        let mut batch = WorldBatch::new();
        let mut model = Model::new(mesh_with_vertices(4));
        let slot = batch.push(&model);
        let vertices_before = batch.vertices().to_vec();

        model.position = Vec3::new(0.0, 5.0, 0.0);
        batch.set_transform(slot, &model);

        assert_eq!(batch.vertices(), vertices_before.as_slice());
        let m = batch.transforms()[slot.0];
        // Column-major: translation sits in the last column.
        assert_relative_eq!(m[3][1], 5.0 - model.pivot.y, epsilon = 1e-5);
    }

    #[test]
    fn world_bounds_follow_the_instance() {
        let mut model = Model::new(Arc::new(Mesh::cube(2.0)));
        model.position = Vec3::new(10.0, 0.0, 0.0);
        let bounds = model.world_bounds();
        assert_relative_eq!(bounds.center(), Vec3::new(10.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(bounds.width(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn byte_views_match_lengths() {
        let mut batch = WorldBatch::new();
        batch.push(&Model::new(mesh_with_vertices(3)));
        assert_eq!(batch.vertex_bytes().len(), batch.vertices().len() * 12);
        assert_eq!(batch.index_bytes().len(), batch.indices().len() * 4);
        assert_eq!(batch.transform_bytes().len(), 64);
    }
}
