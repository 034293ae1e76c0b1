//! Mesh representation for 3D models
//!
//! A mesh is immutable triangle geometry: positions, per-vertex normals, and
//! triangle index triples, plus the precomputed object-space bounding box.
//! Meshes are shared between model instances via `Arc`, so nothing here
//! mutates after construction.

use crate::foundation::math::Vec3;
use crate::geometry::Aabb;

/// Immutable triangle mesh data
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions in object space
    pub positions: Vec<Vec3>,
    /// Per-vertex unit normals, parallel to `positions`
    pub normals: Vec<Vec3>,
    /// Triangle index triples into `positions`
    pub indices: Vec<[u32; 3]>,
    /// Object-space bounding box of all positions
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from positions, normals, and triangle indices.
    ///
    /// `normals` must parallel `positions`; use [`Mesh::from_positions`] to
    /// have normals computed from the face geometry instead.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Create a mesh computing area-weighted vertex normals from the faces
    pub fn from_positions(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        let normals = Self::compute_normals(&positions, &indices);
        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn face_count(&self) -> usize {
        self.indices.len()
    }

    /// Bounding box of a position list
    fn compute_bounds(positions: &[Vec3]) -> Aabb {
        let mut bounds = match positions.first() {
            Some(&first) => Aabb::new(first, first),
            None => Aabb::new(Vec3::zeros(), Vec3::zeros()),
        };
        for p in positions {
            bounds.min = bounds.min.inf(p);
            bounds.max = bounds.max.sup(p);
        }
        bounds
    }

    /// Area-weighted vertex normals: each face's cross product accumulates
    /// onto its three corners, then everything is normalized.
    fn compute_normals(positions: &[Vec3], indices: &[[u32; 3]]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::zeros(); positions.len()];
        for tri in indices {
            let [a, b, c] = tri.map(|i| positions[i as usize]);
            let face = (b - a).cross(&(c - a));
            for &i in tri {
                normals[i as usize] += face;
            }
        }
        for n in &mut normals {
            let len = n.norm();
            if len > f32::EPSILON {
                *n /= len;
            } else {
                *n = Vec3::new(0.0, 1.0, 0.0);
            }
        }
        normals
    }

    /// Axis-aligned cube of the given edge length, centered at the origin.
    ///
    /// Vertices are duplicated per face so every face gets flat normals.
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(12);

        for normal in Aabb::face_normals() {
            // Build a tangent basis per face.
            let u = if normal.x.abs() > 0.5 {
                Vec3::new(0.0, 1.0, 0.0)
            } else {
                Vec3::new(1.0, 0.0, 0.0)
            };
            let v = normal.cross(&u);
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(normal * h + u * (su * h) + v * (sv * h));
                normals.push(normal);
            }
            indices.push([base, base + 1, base + 2]);
            indices.push([base, base + 2, base + 3]);
        }

        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Flat quad in the XZ plane of the given full size, facing +Y
    pub fn plane(size: f32) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(h, 0.0, -h),
            Vec3::new(h, 0.0, h),
            Vec3::new(-h, 0.0, h),
        ];
        let normals = vec![Vec3::new(0.0, 1.0, 0.0); 4];
        let indices = vec![[0, 2, 1], [0, 3, 2]];
        Self::new(positions, normals, indices)
    }

    /// Small octahedron used for particles
    pub fn particle(size: f32) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(h, 0.0, 0.0),
            Vec3::new(-h, 0.0, 0.0),
            Vec3::new(0.0, h, 0.0),
            Vec3::new(0.0, -h, 0.0),
            Vec3::new(0.0, 0.0, h),
            Vec3::new(0.0, 0.0, -h),
        ];
        let indices = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        Self::from_positions(positions, indices)
    }
}
