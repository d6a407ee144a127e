//! Look-at camera.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system, matching
//! [`Projection`](crate::projection::Projection):
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into the screen)

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Camera placed at `position`, looking at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
}

impl Default for Camera {
    /// Three units behind the origin, looking at it.
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO)
    }
}

impl Camera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
        }
    }

    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::FORWARD)
    }

    /// World → view transform. In view space the camera sits at the origin
    /// and looks down +z.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.position + self.forward(), self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn target_lands_on_view_axis() {
        let camera = Camera::looking_at(Vec3::new(2.0, 1.0, -4.0), Vec3::new(2.0, 1.0, 0.0));
        let p = camera.view_matrix().transform_point(Vec3::new(2.0, 1.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_target_falls_back_to_forward() {
        let camera = Camera::looking_at(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(camera.forward(), Vec3::FORWARD);
    }
}
