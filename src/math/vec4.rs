//! 4D vector for homogeneous coordinates.

use super::vec3::Vec3;

/// A homogeneous point. After a projection matrix has been applied this is a
/// clip-space position and must go through [`Vec4::perspective_divide`]
/// before it can be mapped to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Create a Vec4 from a Vec3 with specified w component.
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Convert to Vec3, discarding w.
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divides x, y and z by w.
    ///
    /// A w of exactly zero skips the divide and returns x, y, z unchanged, as
    /// if the point were already normalized. This keeps the pipeline free of
    /// division faults; it says nothing about the geometric meaning of such a
    /// point.
    pub fn perspective_divide(self) -> Vec3 {
        if self.w == 0.0 {
            self.xyz()
        } else {
            Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        }
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v.x, v.y, v.z)
    }
}
