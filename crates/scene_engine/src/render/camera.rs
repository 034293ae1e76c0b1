//! Camera state and view/projection construction

use crate::foundation::math::{
    direction, look_at, orthographic, perspective, towards, Mat4, Vec2, Vec3,
};

/// Projection kind of a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection with a full vertical field of view in radians
    Perspective {
        /// Vertical field of view in radians
        fov: f32,
    },
    /// Orthographic projection over a width/height extent
    Orthographic {
        /// Full width and height of the view volume
        size: Vec2,
    },
}

/// A camera placed in the world by position and Euler orientation
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World position of the eye
    pub position: Vec3,
    /// Euler orientation; `direction(rotation)` is the view direction
    pub rotation: Vec3,
    /// Projection parameters
    pub projection: Projection,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Camera {
    /// Perspective camera at a position, looking along +X until rotated
    pub fn perspective(position: Vec3, fov: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Vec3::zeros(),
            projection: Projection::Perspective { fov },
            near,
            far,
        }
    }

    /// Orthographic camera over the given extent
    pub fn orthographic(position: Vec3, size: Vec2, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Vec3::zeros(),
            projection: Projection::Orthographic { size },
            near,
            far,
        }
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        direction(self.rotation)
    }

    /// Orient the camera towards a world point
    pub fn look_at(&mut self, target: Vec3) {
        self.rotation = towards(self.position, target);
    }

    /// View matrix for the current placement
    pub fn view(&self) -> Mat4 {
        look_at(
            self.position,
            self.position + self.forward(),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    /// Projection matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov } => perspective(fov, aspect, self.near, self.far),
            Projection::Orthographic { size } => orthographic(size, self.near, self.far),
        }
    }

    /// This camera mirrored across the horizontal plane `y = plane_y`.
    ///
    /// Used for the reflection pass: the eye is reflected through the plane
    /// and the pitch negated, so the mirrored camera sees what the surface
    /// reflects.
    pub fn mirrored(&self, plane_y: f32) -> Camera {
        let mut mirrored = self.clone();
        mirrored.position.y = 2.0 * plane_y - self.position.y;
        mirrored.rotation.y = -self.rotation.y;
        mirrored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 2.0, 8.0), 1.0, 0.1, 100.0);
        camera.look_at(Vec3::zeros());
        let expected = (Vec3::zeros() - camera.position).normalize();
        assert_relative_eq!(camera.forward(), expected, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_centers_the_target() {
        let mut camera = Camera::perspective(Vec3::new(5.0, 1.0, 2.0), 1.0, 0.1, 100.0);
        camera.look_at(Vec3::zeros());
        let v = camera.view() * nalgebra::Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-4);
        assert!(v.z < 0.0);
    }

    #[test]
    fn mirrored_camera_reflects_eye_and_pitch() {
        let mut camera = Camera::perspective(Vec3::new(1.0, 3.0, 0.0), 1.0, 0.1, 100.0);
        camera.look_at(Vec3::new(0.0, 0.0, -4.0));
        let mirrored = camera.mirrored(0.0);

        assert_relative_eq!(mirrored.position.y, -3.0, epsilon = 1e-5);
        let fwd = camera.forward();
        let mfwd = mirrored.forward();
        assert_relative_eq!(mfwd.x, fwd.x, epsilon = 1e-5);
        assert_relative_eq!(mfwd.y, -fwd.y, epsilon = 1e-5);
        assert_relative_eq!(mfwd.z, fwd.z, epsilon = 1e-5);
    }
}
