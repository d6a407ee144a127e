//! 8-bit RGBA colour with saturating arithmetic, plus a small named palette.
//!
//! Channels are stored in B, G, R, A order so a `[Color]` slice matches the
//! byte layout of TGA/BGRA rasters; constructors and accessors speak RGBA.

use std::ops::{Add, Mul};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GREY: Self = Self::rgb(127, 127, 127);
    pub const DARK_GREY: Self = Self::rgb(64, 64, 64);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Scales R, G and B by `intensity` (clamped to [0, 1]) and forces the
    /// result fully opaque.
    pub fn modulate(self, intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self::rgb(
            scale_channel(self.r, intensity),
            scale_channel(self.g, intensity),
            scale_channel(self.b, intensity),
        )
    }
}

#[inline]
fn scale_channel(channel: u8, factor: f32) -> u8 {
    (channel as f32 * factor).clamp(0.0, 255.0) as u8
}

/// Per-channel sum, saturating at 255.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Self::rgba(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
            self.a.saturating_add(rhs.a),
        )
    }
}

/// Per-channel product, saturating at 255.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Self::rgba(
            self.r.saturating_mul(rhs.r),
            self.g.saturating_mul(rhs.g),
            self.b.saturating_mul(rhs.b),
            self.a.saturating_mul(rhs.a),
        )
    }
}

/// Scales every channel, alpha included, saturating at 255 (and at 0 for
/// negative factors).
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::rgba(
            scale_channel(self.r, rhs),
            scale_channel(self.g, rhs),
            scale_channel(self.b, rhs),
            scale_channel(self.a, rhs),
        )
    }
}
