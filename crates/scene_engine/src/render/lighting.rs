//! Light emitters and their GPU-facing layout

use crate::foundation::math::Vec3;

/// Kind of a light emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel light defined by a direction
    Directional,
    /// Omnidirectional light defined by a position
    Point,
}

/// A light attached to a scene entity
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Directional or point
    pub kind: LightKind,
    /// Position of a point light, or the direction a directional light
    /// shines along
    pub vector: Vec3,
    /// Linear RGB color
    pub color: Vec3,
    /// Brightness multiplier
    pub intensity: f32,
}

impl Light {
    /// A directional light shining along `direction`
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            vector: direction.normalize(),
            color,
            intensity,
        }
    }

    /// A point light at `position`
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            vector: position,
            color,
            intensity,
        }
    }
}

/// One packed light: `[x, y, z, kind, r, g, b, intensity]`, where kind is
/// 0 for directional and 1 for point
pub type PackedLight = [f32; 8];

/// Pack lights into the flat layout the lighting shader consumes
pub fn pack_lights<'a>(lights: impl Iterator<Item = &'a Light>) -> Vec<PackedLight> {
    lights
        .map(|light| {
            let kind = match light.kind {
                LightKind::Directional => 0.0,
                LightKind::Point => 1.0,
            };
            [
                light.vector.x,
                light.vector.y,
                light.vector.z,
                kind,
                light.color.x,
                light.color.y,
                light.color.z,
                light.intensity,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn directional_lights_normalize_their_direction() {
        let light = Light::directional(Vec3::new(0.0, -2.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0);
        assert_relative_eq!(light.vector, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn packing_preserves_order_and_kind() {
        let lights = vec![
            Light::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.9, 0.8), 1.5),
            Light::point(Vec3::new(2.0, 3.0, 4.0), Vec3::new(0.2, 0.4, 0.6), 5.0),
        ];
        let packed = pack_lights(lights.iter());
        assert_eq!(packed.len(), 2);
        assert_relative_eq!(packed[0][3], 0.0);
        assert_relative_eq!(packed[1][3], 1.0);
        assert_relative_eq!(packed[1][0], 2.0);
        assert_relative_eq!(packed[1][7], 5.0);
    }
}
