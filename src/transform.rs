//! Model transform: scale, shear, rotation and translation.
//!
//! Provides a [`Transform`] struct with a fluent API. The matrix always applies
//! the parts in the same order: scale first, then shear, then rotation (X, Y,
//! Z Euler angles), then translation.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// Shear factors. `xy` is how far x moves per unit of y, and so on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shear {
    pub xy: f32,
    pub xz: f32,
    pub yx: f32,
    pub yz: f32,
    pub zx: f32,
    pub zy: f32,
}

impl Shear {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::shearing(self.xy, self.xz, self.yx, self.yz, self.zx, self.zy)
    }
}

/// A 3D transform with position, rotation (Euler angles), shear and scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(0.7, 0.7, 0.0)
///     .set_rotation_xyz(0.0, 0.0, 0.17)
///     .set_scale_uniform(0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
    shear: Shear,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            shear: Shear::default(),
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0,
    /// no shear, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn shear(&self) -> Shear {
        self.shear
    }

    pub fn set_shear(&mut self, shear: Shear) -> &mut Self {
        self.shear = shear;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Generate the transformation matrix.
    ///
    /// Order: Translation * RotationX * RotationY * RotationZ * Shear * Scale
    /// (scale applied first, translation last).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * self.shear.to_matrix()
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}
