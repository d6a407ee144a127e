//! Normalized device coordinates → pixel coordinates.

use crate::math::vec3::Vec3;

/// Maps points in `[-1, 1]` normalized space onto a `width x height` surface.
///
/// The surface is rarely square. [`ScreenMapper::new`] divides the coordinate
/// on the wider axis by `max(w, h) / min(w, h)` first, so a unit square in
/// normalized space stays square on screen. A perspective projection already
/// divides x by its own aspect ratio; its output goes through
/// [`ScreenMapper::stretched`], which spans the full surface on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMapper {
    width: u32,
    height: u32,
    aspect: f32,
}

impl ScreenMapper {
    pub fn new(width: u32, height: u32) -> Self {
        let (long, short) = (width.max(height), width.min(height));
        let aspect = if short == 0 { 1.0 } else { long as f32 / short as f32 };
        Self {
            width,
            height,
            aspect,
        }
    }

    /// Maps `[-1, 1]` onto the full width and height with no aspect
    /// correction.
    pub fn stretched(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            aspect: 1.0,
        }
    }

    /// The factor applied to the wider axis: `max(w, h) / min(w, h)`, or 1
    /// for a [`stretched`](Self::stretched) mapper.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Pixel position of `ndc`. x and y are rounded to the nearest integer;
    /// z passes through untouched.
    pub fn map(&self, ndc: Vec3) -> Vec3 {
        let (mut x, mut y) = (ndc.x, ndc.y);
        if self.width > self.height {
            x /= self.aspect;
        } else if self.height > self.width {
            y /= self.aspect;
        }

        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;
        Vec3::new(
            (x * half_w + half_w).round(),
            (y * half_h + half_h).round(),
            ndc.z,
        )
    }
}
