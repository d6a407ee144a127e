//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage, the depth test and barycentric weights; a
//! shader only turns the weights of an accepted sample into a colour.

use super::barycentric::interpolate;
use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::surface::PixelSurface;
use crate::texture::sample_nearest;

/// Trait for per-pixel shading computations.
///
/// The `lambda` parameter contains the three barycentric weights of the
/// sample, `[λ₀, λ₁, λ₂]`, which sum to 1 inside the triangle. Any per-vertex
/// attribute interpolates as `λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> Color;
}

/// Returns a constant colour for all pixels.
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> Color {
        self.color
    }
}

/// Samples a texture at perspective-correct texture coordinates and
/// modulates the result by a light intensity.
///
/// Screen-space weights are linear in screen space, but texture coordinates
/// are linear in view space. Interpolating `uv / w` and `1 / w` and dividing
/// per pixel undoes the projection. With every `w = 1` (orthographic) this is
/// plain affine interpolation.
pub struct TextureShader<'a, T: PixelSurface + ?Sized> {
    texture: &'a T,
    /// Per-vertex `u / w`, `v / w`.
    u_over_w: [f32; 3],
    v_over_w: [f32; 3],
    inv_w: [f32; 3],
    intensity: f32,
}

impl<'a, T: PixelSurface + ?Sized> TextureShader<'a, T> {
    /// `inv_w` holds `1 / w` for each vertex (all ones for orthographic).
    /// `intensity` is clamped to [0, 1] when applied.
    pub fn new(texture: &'a T, uvs: [Vec2; 3], inv_w: [f32; 3], intensity: f32) -> Self {
        Self {
            texture,
            u_over_w: [uvs[0].x * inv_w[0], uvs[1].x * inv_w[1], uvs[2].x * inv_w[2]],
            v_over_w: [uvs[0].y * inv_w[0], uvs[1].y * inv_w[1], uvs[2].y * inv_w[2]],
            inv_w,
            intensity,
        }
    }

    /// Texture coordinates of the sample with the projection divided back out.
    #[inline]
    pub fn interpolate_uv(&self, lambda: [f32; 3]) -> Vec2 {
        let inv_w = interpolate(lambda, self.inv_w);
        let u = interpolate(lambda, self.u_over_w);
        let v = interpolate(lambda, self.v_over_w);
        if inv_w == 0.0 {
            Vec2::new(u, v)
        } else {
            Vec2::new(u / inv_w, v / inv_w)
        }
    }
}

impl<T: PixelSurface + ?Sized> PixelShader for TextureShader<'_, T> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> Color {
        let uv = self.interpolate_uv(lambda);
        sample_nearest(self.texture, uv.x, uv.y).modulate(self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use approx::assert_relative_eq;

    fn uvs() -> [Vec2; 3] {
        [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]
    }

    #[test]
    fn affine_when_w_is_one() {
        let tex = Canvas::new(1, 1);
        let shader = TextureShader::new(&tex, uvs(), [1.0; 3], 1.0);
        let uv = shader.interpolate_uv([0.5, 0.5, 0.0]);
        assert_relative_eq!(uv.x, 0.5);
        assert_relative_eq!(uv.y, 0.0);
    }

    #[test]
    fn perspective_pulls_toward_the_nearer_vertex() {
        let tex = Canvas::new(1, 1);
        // vertex 0 at w=1, vertex 1 at w=3: halfway on screen is a quarter of
        // the way in texture space
        let shader = TextureShader::new(&tex, uvs(), [1.0, 1.0 / 3.0, 1.0], 1.0);
        let uv = shader.interpolate_uv([0.5, 0.5, 0.0]);
        assert_relative_eq!(uv.x, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn modulates_and_forces_alpha() {
        let tex = Canvas::filled(2, 2, Color::rgba(200, 100, 50, 7));
        let shader = TextureShader::new(&tex, uvs(), [1.0; 3], 0.5);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), Color::rgba(100, 50, 25, 255));
    }

    #[test]
    fn flat_ignores_weights() {
        let shader = FlatShader::new(Color::RED);
        assert_eq!(shader.shade([0.2, 0.3, 0.5]), Color::RED);
    }
}
