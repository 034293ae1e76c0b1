//! Interior containment collider

use crate::foundation::math::Vec3;
use crate::geometry::Aabb;

/// A box that objects collide with from the inside.
///
/// When an object's bounds poke through a wall, its position is pushed back
/// in and the matching velocity component is reflected, scaled by the
/// restitution factor.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorBox {
    /// The containing volume
    pub bounds: Aabb,
    /// Energy kept by a bounce, in `[0, 1]`
    pub restitution: f32,
}

impl InteriorBox {
    /// Create a containment box with the given restitution
    pub fn new(bounds: Aabb, restitution: f32) -> Self {
        Self { bounds, restitution }
    }

    /// Keep an object inside the box.
    ///
    /// `object` is the object's current world bounds; `position` and
    /// `velocity` are corrected in place. Returns true when any wall was
    /// hit. Objects larger than the box are clamped against the min wall
    /// last, so they never oscillate outside.
    pub fn confine(&self, object: &Aabb, position: &mut Vec3, velocity: &mut Vec3) -> bool {
        let mut bounced = false;
        for axis in 0..3 {
            let over = object.max[axis] - self.bounds.max[axis];
            if over > 0.0 {
                position[axis] -= over;
                if velocity[axis] > 0.0 {
                    velocity[axis] = -velocity[axis] * self.restitution;
                }
                bounced = true;
            }
            let under = self.bounds.min[axis] - object.min[axis];
            if under > 0.0 {
                position[axis] += under;
                if velocity[axis] < 0.0 {
                    velocity[axis] = -velocity[axis] * self.restitution;
                }
                bounced = true;
            }
        }
        bounced
    }
}
