//! 3x3 matrix for planar (2D) studies, using homogeneous 2D coordinates.
//!
//! Follows the same conventions as [`Mat4`](super::mat4::Mat4): column vectors
//! on the right, translation in the last column, `A * B * v` applies B first.

use std::ops::Mul;

use super::vec2::Vec2;
use super::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn translation(x: f32, y: f32) -> Self {
        Mat3::new([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    pub fn scaling(x: f32, y: f32) -> Self {
        Mat3::new([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Shear: x grows by `xy` per unit of y, y grows by `yx` per unit of x.
    pub fn shearing(xy: f32, yx: f32) -> Self {
        Mat3::new([[1.0, xy, 0.0], [yx, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat3::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Transforms a 2D point (homogeneous 1) and divides by the resulting
    /// third component. A zero third component skips the divide.
    pub fn transform_point2(&self, p: Vec2) -> Vec2 {
        let h = *self * Vec3::new(p.x, p.y, 1.0);
        if h.z == 0.0 {
            h.xy()
        } else {
            Vec2::new(h.x / h.z, h.y / h.z)
        }
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }
        Mat3::new(result)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let row = |r: usize| self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z;
        Vec3::new(row(0), row(1), row(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn scale_rotate_translate_in_order() {
        let m = Mat3::translation(0.5, 0.0) * Mat3::rotation(FRAC_PI_2) * Mat3::scaling(2.0, 2.0);
        let p = m.transform_point2(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn projective_row_divides() {
        let m = Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_eq!(m.transform_point2(Vec2::new(4.0, 2.0)), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn zero_homogeneous_component_is_not_divided() {
        let m = Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(m.transform_point2(Vec2::new(4.0, 2.0)), Vec2::new(4.0, 2.0));
    }
}
