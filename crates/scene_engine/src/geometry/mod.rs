//! Geometric primitives and intersection queries
//!
//! Value types for planes, rays, and axis-aligned bounding boxes. Queries
//! that can have no answer (ray/plane, ray/box) return `Option` rather than
//! panicking; malformed inputs are the caller's bug.

mod aabb;
mod plane;
mod ray;

pub use aabb::Aabb;
pub use plane::Plane;
pub use ray::Ray;
