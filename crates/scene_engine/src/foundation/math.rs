//! Math utilities and types
//!
//! Provides the fundamental math types plus the projection, view, and
//! angle-conversion helpers used throughout the engine. All matrices follow
//! the GL column-vector convention: they compose as `proj * view * model`
//! and clip-space depth spans `[-1, 1]`.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi, a full turn
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation between two values
    pub fn lerp<T>(a: T, b: T, t: f32) -> T
    where
        T: Copy + std::ops::Add<Output = T> + std::ops::Sub<Output = T> + std::ops::Mul<f32, Output = T>,
    {
        a + (b - a) * t
    }
}

/// Compose a rotation by applying the X, then Y, then Z axis rotations.
///
/// The order is fixed: `euler(v)` is `Qx(v.x) * Qy(v.y) * Qz(v.z)`.
pub fn euler(axis_angles: Vec3) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), axis_angles.x)
        * Quat::from_axis_angle(&Vec3::y_axis(), axis_angles.y)
        * Quat::from_axis_angle(&Vec3::z_axis(), axis_angles.z)
}

/// Rotate a vector by the given Euler angles
pub fn rotate(v: Vec3, axis_angles: Vec3) -> Vec3 {
    euler(axis_angles) * v
}

/// Unit direction corresponding to the given Euler angles
pub fn direction(axis_angles: Vec3) -> Vec3 {
    Vec3::new(
        axis_angles.y.cos() * axis_angles.x.cos(),
        axis_angles.y.sin(),
        axis_angles.y.cos() * axis_angles.x.sin(),
    )
}

/// Euler angles of the rotation from `a` to `b`
pub fn towards(a: Vec3, b: Vec3) -> Vec3 {
    let delta = b - a;
    Vec3::new(
        delta.z.atan2(delta.x),
        delta.y.atan2((delta.x * delta.x + delta.z * delta.z).sqrt()),
        0.0,
    )
}

/// Euler angles pointing along the given direction
///
/// Inverse of [`direction`]; the roll component is always zero.
pub fn dir_to_rot(dir: Vec3) -> Vec3 {
    Vec3::new(
        dir.z.atan2(dir.x),
        dir.y.atan2((dir.x * dir.x + dir.z * dir.z).sqrt()),
        0.0,
    )
}

/// Convert spherical to cartesian coordinates (+Y up).
///
/// `phi` is the horizontal angle, `theta` the vertical angle; the distance
/// from the origin is always 1 and `sphere_point(0.0, 0.0) == (0, 0, 1)`.
pub fn sphere_point(phi: f32, theta: f32) -> Vec3 {
    Vec3::new(theta.cos() * phi.sin(), theta.sin(), theta.cos() * phi.cos())
}

/// Convert a cartesian point on the unit sphere to `(phi, theta)` (+Y up).
///
/// Inverse of [`sphere_point`] for `theta` within `[-pi/2, pi/2]`.
pub fn point_sphere(point: Vec3) -> Vec2 {
    Vec2::new(point.x.atan2(point.z), point.y.clamp(-1.0, 1.0).asin())
}

/// Build a right-handed view matrix from camera position, target, and up.
///
/// Degenerate inputs (`center == eye`, `up` parallel to the view direction)
/// produce NaNs; avoiding them is the caller's responsibility.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let f = (center - eye).normalize();
    let s = f.cross(&up).normalize();
    let u = s.cross(&f);

    Mat4::new(
        s.x, s.y, s.z, -s.dot(&eye),
        u.x, u.y, u.z, -u.dot(&eye),
        -f.x, -f.y, -f.z, f.dot(&eye),
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed perspective projection.
///
/// `fov` is the full vertical field of view in radians. Depth maps to
/// `[-1, 1]` with `z = -near` landing exactly on -1. Requires
/// `far > near > 0` and `aspect > 0`.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    debug_assert!(near > 0.0 && far > near, "perspective requires far > near > 0");
    debug_assert!(aspect > 0.0, "perspective requires a positive aspect ratio");
    let f = 1.0 / (fov * 0.5).tan();

    Mat4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, -(far + near) / (far - near), -2.0 * far * near / (far - near),
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Orthographic projection mapping a width/height extent to clip space
pub fn orthographic(size: Vec2, near: f32, far: f32) -> Mat4 {
    Mat4::new(
        2.0 / size.x, 0.0, 0.0, 0.0,
        0.0, 2.0 / size.y, 0.0, 0.0,
        0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near),
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Affine matrix from translation, Euler rotation, and scale (`T * R * S`)
pub fn trs(translation: Vec3, axis_angles: Vec3, scale: Vec3) -> Mat4 {
    Mat4::new_translation(&translation)
        * euler(axis_angles).to_homogeneous()
        * Mat4::new_nonuniform_scaling(&scale)
}

/// Apply a transformation to a point (applies translation, no divide)
pub fn transform_point(point: Vec3, transform: &Mat4) -> Vec3 {
    let h = transform * Vec4::new(point.x, point.y, point.z, 1.0);
    Vec3::new(h.x, h.y, h.z)
}

/// Apply a transformation to a direction (ignores translation, normalizes)
pub fn transform_dir(dir: Vec3, transform: &Mat4) -> Vec3 {
    let h = transform * Vec4::new(dir.x, dir.y, dir.z, 0.0);
    Vec3::new(h.x, h.y, h.z).normalize()
}

/// Project vector `a` onto `b`
pub fn project(a: Vec3, b: Vec3) -> Vec3 {
    b * (a.dot(&b) / b.dot(&b))
}

/// Skew-symmetric (cross-product) matrix of a vector
pub fn skew(v: Vec3) -> Mat3 {
    Mat3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}

/// Planar angle of a 2D vector, wrapped to `[0, tau)`
pub fn angle_2d(v: Vec2) -> f32 {
    let a = v.y.atan2(v.x);
    if a < 0.0 {
        a + constants::TAU
    } else {
        a
    }
}

/// Convert HSV (hue in degrees `[0, 360)`, saturation and value in `[0, 1]`)
/// to RGB
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let h = hsv.x.rem_euclid(360.0) / 60.0;
    let c = hsv.z * hsv.y;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = hsv.z - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Vec3::new(r + m, g + m, b + m)
}

/// Cantor's pairing function: a unique `u64` for every `(x, y)` pair
pub fn cantor(x: u32, y: u32) -> u64 {
    let (x, y) = (u64::from(x), u64::from(y));
    (x + y) * (x + y + 1) / 2 + y
}
