//! Axis-aligned bounding box

use super::Ray;
use crate::foundation::math::Vec3;

/// Axis-aligned bounding box.
///
/// The invariant `min <= max` componentwise is the caller's responsibility;
/// degenerate boxes are legal inputs for the derived quantities (volume may
/// then be zero or negative) but intersection results on them are unspecified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new box from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box centered at a point with the given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// The six outward face normals of any axis-aligned box
    pub fn face_normals() -> [Vec3; 6] {
        [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
        ]
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size of the box along each axis
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// X span of the box
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Change the X span, keeping the current center fixed
    pub fn set_width(&mut self, width: f32) {
        let c = self.center().x;
        self.min.x = c - width * 0.5;
        self.max.x = c + width * 0.5;
    }

    /// Y span of the box
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Change the Y span, keeping the current center fixed
    pub fn set_height(&mut self, height: f32) {
        let c = self.center().y;
        self.min.y = c - height * 0.5;
        self.max.y = c + height * 0.5;
    }

    /// Z span of the box
    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Change the Z span, keeping the current center fixed
    pub fn set_depth(&mut self, depth: f32) {
        let c = self.center().z;
        self.min.z = c - depth * 0.5;
        self.max.z = c + depth * 0.5;
    }

    /// Make the box a cube of the given span around its current center
    pub fn set_size(&mut self, size: f32) {
        self.set_width(size);
        self.set_height(size);
        self.set_depth(size);
    }

    /// Place the box by center and full size
    pub fn place(&mut self, center: Vec3, size: Vec3) {
        self.min = center - size * 0.5;
        self.max = center + size * 0.5;
    }

    /// Signed volume of the box.
    ///
    /// Degenerate boxes yield zero or negative volume; callers must not
    /// assume non-negativity after violating the `min <= max` invariant.
    pub fn volume(&self) -> f32 {
        self.width() * self.height() * self.depth()
    }

    /// The eight corner points of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Whether a point lies within `[min - eps, max + eps]` on all axes
    pub fn contains(&self, point: Vec3, eps: f32) -> bool {
        point.x >= self.min.x - eps
            && point.x <= self.max.x + eps
            && point.y >= self.min.y - eps
            && point.y <= self.max.y + eps
            && point.z >= self.min.z - eps
            && point.z <= self.max.z + eps
    }

    /// Whether this box overlaps another
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Nearest entry point of a ray into this box, via the slab method.
    ///
    /// Rays starting inside the box report the origin itself. Axis-parallel
    /// rays are handled through infinite inverse components: they only pass
    /// when the origin already lies within that axis' slab.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax >= tmin && tmax >= 0.0 {
            Some(ray.point_at(tmin.max(0.0)))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn contains_own_center() {
        let boxes = [
            unit_box(),
            Aabb::new(Vec3::new(2.0, 3.0, -5.0), Vec3::new(2.5, 9.0, -1.0)),
            Aabb::new(Vec3::zeros(), Vec3::zeros()),
        ];
        for b in boxes {
            assert!(b.contains(b.center(), 0.0));
        }
    }

    #[test]
    fn width_setter_keeps_center() {
        let mut b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(5.0, 2.0, 2.0));
        let center = b.center();
        b.set_width(10.0);
        assert_relative_eq!(b.width(), 10.0, epsilon = EPSILON);
        assert_relative_eq!(b.center(), center, epsilon = EPSILON);
    }

    #[test]
    fn resize_each_axis() {
        let mut b = unit_box();
        b.set_height(4.0);
        b.set_depth(0.5);
        assert_relative_eq!(b.height(), 4.0, epsilon = EPSILON);
        assert_relative_eq!(b.depth(), 0.5, epsilon = EPSILON);
        assert_relative_eq!(b.width(), 2.0, epsilon = EPSILON);
        assert_relative_eq!(b.center(), Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn degenerate_volume_does_not_crash() {
        let flat = Aabb::new(Vec3::zeros(), Vec3::new(2.0, 0.0, 2.0));
        assert_relative_eq!(flat.volume(), 0.0);
        let inverted = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert!(inverted.volume() < 0.0);
    }

    #[test]
    fn ray_hits_front_face() {
        let b = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = b.intersect(&ray).expect("ray aims at the box");
        assert_relative_eq!(hit, Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn ray_from_inside_reports_origin() {
        let b = unit_box();
        let ray = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = b.intersect(&ray).expect("origin is inside");
        assert_relative_eq!(hit, ray.origin, epsilon = EPSILON);
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        let b = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(b.intersect(&ray).is_none());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let b = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(b.intersect(&ray).is_none());
    }

    #[test]
    fn contains_respects_epsilon() {
        let b = unit_box();
        assert!(!b.contains(Vec3::new(1.05, 0.0, 0.0), 0.0));
        assert!(b.contains(Vec3::new(1.05, 0.0, 0.0), 0.1));
    }

    #[test]
    fn box_overlap() {
        let b = unit_box();
        let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let separate = Aabb::new(Vec3::new(3.0, 3.0, 3.0), Vec3::new(4.0, 4.0, 4.0));
        assert!(b.intersects(&touching));
        assert!(!b.intersects(&separate));
    }
}
