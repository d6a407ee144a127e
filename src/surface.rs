//! Pixel surfaces the rasterizer reads from and writes to.
//!
//! The pipeline only needs (x, y) addressed get/set on a fixed extent, so it is
//! written against the [`PixelSurface`] trait. [`Canvas`] is the crate's own
//! owned raster; `image::RgbaImage` implements the trait as well so callers
//! can render straight into a buffer from the `image` crate.
//!
//! Origin convention is up to the caller. The demo renders with the origin at
//! the bottom-left and calls [`Canvas::flip_vertically`] once before encoding.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::colors::Color;
use crate::error::RenderError;

/// A 2D grid of colours addressed by `(x, y)` in `[0, width) x [0, height)`.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Colour at `(x, y)`, or `None` outside the surface.
    fn get(&self, x: i32, y: i32) -> Option<Color>;

    /// Writes `color` at `(x, y)`. Returns `false` (and writes nothing) when
    /// the coordinates fall outside the surface.
    fn set(&mut self, x: i32, y: i32, color: Color) -> bool;

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }
}

/// Owned colour raster stored row-major, `index = x + y * width`.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Creates a canvas filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: vec![color; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wraps existing pixel data. Fails if the length does not match the extent.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, RenderError> {
        if pixels.len() != width as usize * height as usize {
            return Err(RenderError::InvalidSurface { width, height });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Color::rgba(r, g, b, a)
            })
            .collect();
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.pixels[self.index(x, y)];
            Rgba([c.r, c.g, c.b, c.a])
        })
    }

    /// Encodes the canvas to `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Mirrors the rows so the first row becomes the last.
    pub fn flip_vertically(&mut self) {
        let row = self.width as usize;
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.pixels.split_at_mut((height - 1 - y) * row);
            top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }
}

impl PixelSurface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.contains(x, y)
            .then(|| self.pixels[self.index(x as u32, y as u32)])
    }

    #[inline]
    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = self.index(x as u32, y as u32);
        self.pixels[idx] = color;
        true
    }
}

impl PixelSurface for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        let [r, g, b, a] = self.get_pixel(x as u32, y as u32).0;
        Some(Color::rgba(r, g, b, a))
    }

    fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.put_pixel(x as u32, y as u32, Rgba([color.r, color.g, color.b, color.a]));
        true
    }
}
