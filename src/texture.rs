use std::path::Path;

use log::debug;

use crate::colors::Color;
use crate::error::RenderError;
use crate::surface::{Canvas, PixelSurface};

/// Represents a 2D texture for texture mapping.
///
/// Texel row 0 is the *bottom* row of the source image, matching the OBJ
/// convention where v = 0 is the bottom edge. Images are flipped on load.
#[derive(Clone, Debug)]
pub struct Texture {
    canvas: Canvas,
}

impl Texture {
    /// Load a texture from an image file (PNG, TGA, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let mut canvas = Canvas::from_rgba_image(&img);
        canvas.flip_vertically();
        debug!(
            "loaded texture {} ({}x{})",
            path.display(),
            canvas.width(),
            canvas.height()
        );
        Ok(Self { canvas })
    }

    /// Uses the canvas as-is; row 0 is taken to be v = 0.
    pub fn from_canvas(canvas: Canvas) -> Self {
        Self { canvas }
    }

    /// Nearest-texel sample at normalized `(u, v)`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color {
        sample_nearest(&self.canvas, u, v)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl PixelSurface for Texture {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.canvas.get(x, y)
    }

    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        self.canvas.set(x, y, color)
    }
}

/// Samples any surface at normalized `(u, v)` using nearest-neighbour lookup.
///
/// `(u, v)` is scaled by the texture extent and truncated to a texel index,
/// then clamped to the last row/column so `u = 1` or `v = 1` stay in range.
/// An empty surface samples as black.
#[inline]
pub fn sample_nearest<T: PixelSurface + ?Sized>(texture: &T, u: f32, v: f32) -> Color {
    let (width, height) = (texture.width(), texture.height());
    if width == 0 || height == 0 {
        return Color::BLACK;
    }
    let x = ((u * width as f32) as i32).clamp(0, width as i32 - 1);
    let y = ((v * height as f32) as i32).clamp(0, height as i32 - 1);
    texture.get(x, y).unwrap_or(Color::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_texture() -> Texture {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(0, 0, Color::RED);
        canvas.set(1, 0, Color::GREEN);
        canvas.set(0, 1, Color::BLUE);
        canvas.set(1, 1, Color::WHITE);
        Texture::from_canvas(canvas)
    }

    #[test]
    fn samples_each_quadrant() {
        let tex = quad_texture();
        assert_eq!(tex.sample(0.0, 0.0), Color::RED);
        assert_eq!(tex.sample(0.75, 0.25), Color::GREEN);
        assert_eq!(tex.sample(0.25, 0.75), Color::BLUE);
        assert_eq!(tex.sample(0.9, 0.9), Color::WHITE);
    }

    #[test]
    fn edges_clamp_into_range() {
        let tex = quad_texture();
        assert_eq!(tex.sample(1.0, 1.0), Color::WHITE);
        assert_eq!(tex.sample(-0.5, 0.0), Color::RED);
    }

    #[test]
    fn empty_texture_samples_black() {
        let tex = Texture::from_canvas(Canvas::new(0, 0));
        assert_eq!(tex.sample(0.5, 0.5), Color::BLACK);
    }
}
