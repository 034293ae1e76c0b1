//! Ray primitive and intersection tests

use super::Plane;
use crate::foundation::math::{transform_point, Mat4, Vec3, Vec4};

/// Epsilon for the ray-parallel-to-plane test
const PARALLEL_EPSILON: f32 = 1e-6;

/// A ray for picking and intersection queries
///
/// The direction is used as-is for the parametric form
/// `origin + t * direction`; it does not have to be normalized, but t-values
/// are then measured in units of its length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point along the ray at parameter `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection point between this ray and a plane.
    ///
    /// Returns `None` when the ray is parallel to the plane (within epsilon)
    /// or when the intersection lies behind the origin.
    pub fn intersect(&self, plane: &Plane) -> Option<Vec3> {
        let denom = self.direction.dot(&plane.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (plane.origin - self.origin).dot(&plane.normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.point_at(t))
    }

    /// This ray carried through a transformation.
    ///
    /// The origin transforms as a point, the direction as a direction
    /// (translation ignored) without renormalization, so t-values are only
    /// meaningful relative to the transformed ray.
    pub fn transformed(&self, transform: &Mat4) -> Ray {
        let d = transform
            * Vec4::new(self.direction.x, self.direction.y, self.direction.z, 0.0);
        Ray {
            origin: transform_point(self.origin, transform),
            direction: Vec3::new(d.x, d.y, d.z),
        }
    }
}
