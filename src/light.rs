//! Lighting types for the renderer.
//!
//! One directional light, a Lambert term per face and an ambient floor.

use crate::math::vec3::Vec3;

/// Faces at or below this intensity are culled.
pub const CULL_EPSILON: f32 = 1e-6;

/// Unit normal of a triangle: `normalize((C - A) x (B - A))`.
///
/// The edge order fixes the sign of the normal. Returns `None` for a
/// zero-area triangle.
pub fn face_normal(vertices: &[Vec3; 3]) -> Option<Vec3> {
    let edge1 = vertices[2] - vertices[0];
    let edge2 = vertices[1] - vertices[0];
    edge1.cross(edge2).try_normalize()
}

/// A directional light that illuminates the scene uniformly from a direction.
///
/// A surface is lit in proportion to `dot(normal, direction)`, so with the
/// default direction `(0, 0, -1)` a face whose [`face_normal`] points down −z
/// is fully lit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized light direction.
    pub direction: Vec3,
    /// Added to the Lambert term before clamping.
    pub ambient: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::BACK)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically; a zero vector falls
    /// back to the default `(0, 0, -1)`.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.try_normalize().unwrap_or(Vec3::BACK),
            ambient: 0.0,
        }
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    /// `clamp(dot(normal, direction) + ambient, 0, 1)`.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        (normal.dot(self.direction) + self.ambient).clamp(0.0, 1.0)
    }

    /// Intensity for a face, or `None` when the face must be culled: it is
    /// degenerate, turned away from the light, or unlit.
    pub fn face_intensity(&self, vertices: &[Vec3; 3]) -> Option<f32> {
        let normal = face_normal(vertices)?;
        let intensity = self.intensity(normal);
        (intensity > CULL_EPSILON).then_some(intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn facing(normal_z: f32) -> [Vec3; 3] {
        // (C - A) x (B - A) = (0,1,0) x (1,0,0) = (0,0,-1)
        let tri = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        if normal_z < 0.0 {
            tri
        } else {
            [tri[0], tri[2], tri[1]]
        }
    }

    #[test]
    fn normal_follows_edge_order() {
        let n = face_normal(&facing(-1.0)).unwrap();
        assert_eq!(n, Vec3::new(0.0, 0.0, -1.0));
        let n = face_normal(&facing(1.0)).unwrap();
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn direct_illumination() {
        let light = DirectionalLight::default();
        assert_relative_eq!(light.face_intensity(&facing(-1.0)).unwrap(), 1.0);
    }

    #[test]
    fn facing_away_is_culled() {
        let light = DirectionalLight::default();
        assert_eq!(light.face_intensity(&facing(1.0)), None);
    }

    #[test]
    fn perpendicular_is_culled_without_ambient() {
        let light = DirectionalLight::new(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(light.face_intensity(&facing(-1.0)), None);
    }

    #[test]
    fn ambient_lifts_perpendicular_faces() {
        let light = DirectionalLight::new(Vec3::new(1.0, 0.0, 0.0)).with_ambient(0.2);
        assert_relative_eq!(light.face_intensity(&facing(-1.0)).unwrap(), 0.2);
    }

    #[test]
    fn opposed_beyond_ambient_is_culled() {
        let light = DirectionalLight::default().with_ambient(0.5);
        assert_eq!(light.face_intensity(&facing(1.0)), None);
    }

    #[test]
    fn intensity_is_clamped() {
        let light = DirectionalLight::default().with_ambient(0.5);
        assert_relative_eq!(light.intensity(Vec3::BACK), 1.0);
    }

    #[test]
    fn angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, -1.0, -1.0).normalize();
        assert_relative_eq!(light.intensity(normal), 0.70710677, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_face_is_culled() {
        let light = DirectionalLight::default().with_ambient(1.0);
        let line = [Vec3::ZERO, Vec3::ONE, Vec3::ONE * 2.0];
        assert_eq!(light.face_intensity(&line), None);
    }
}
