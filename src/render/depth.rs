//! Per-pixel depth store for hidden surface removal.
//!
//! # Depth convention
//!
//! Larger depth values are **nearer** to the camera. A fragment replaces the
//! stored one only when its depth is strictly greater, so every slot holds
//! the maximum depth accepted so far and only ever grows during a pass. The
//! engine produces depth keys that follow this rule for both projections; see
//! [`engine`](crate::engine).

use crate::colors::Color;
use crate::surface::PixelSurface;

/// "Nothing written yet". Any finite depth beats it.
pub const EMPTY_DEPTH: f32 = f32::NEG_INFINITY;

/// Dense `width * height` array of depths, indexed `x + y * width`.
///
/// Owned by a single render pass. Not designed for shared access; a tiled
/// multi-threaded renderer would give each thread its own disjoint slots.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![EMPTY_DEPTH; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Slot index of pixel `(x, y)`. Caller guarantees the pixel is in range.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Stores `depth` at `index` if it is strictly greater than the current
    /// value. Returns whether the write happened. Out-of-range indices and NaN
    /// depths are rejected.
    #[inline]
    pub fn test_and_set(&mut self, index: usize, depth: f32) -> bool {
        match self.data.get_mut(index) {
            Some(slot) if depth > *slot => {
                *slot = depth;
                true
            }
            _ => false,
        }
    }

    /// Resets every slot to [`EMPTY_DEPTH`] for a new pass.
    pub fn clear(&mut self) {
        self.data.fill(EMPTY_DEPTH);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Range of depths actually written, or `None` if nothing was drawn.
    pub fn written_range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }

    /// Writes a greyscale picture of the buffer into `surface` for debugging.
    ///
    /// Each written slot becomes grey level `(0.5 + n) / 2 * 255`, where `n`
    /// is its depth rescaled to [0, 1] over the written range. Untouched
    /// slots are black. Nearer pixels come out brighter.
    pub fn write_debug<S: PixelSurface + ?Sized>(&self, surface: &mut S) {
        let (lo, hi) = self.written_range().unwrap_or((0.0, 0.0));
        let span = hi - lo;

        for y in 0..self.height {
            for x in 0..self.width {
                let depth = self.data[self.index(x, y)];
                let color = if depth.is_finite() {
                    let normalized = if span > 0.0 { (depth - lo) / span } else { 1.0 };
                    Color::gray(((0.5 + normalized) / 2.0 * 255.0) as u8)
                } else {
                    Color::BLACK
                };
                surface.set(x as i32, y as i32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    #[test]
    fn starts_empty() {
        let depth = DepthBuffer::new(3, 2);
        assert_eq!(depth.len(), 6);
        assert!(depth.as_slice().iter().all(|&d| d == EMPTY_DEPTH));
        assert_eq!(depth.written_range(), None);
    }

    #[test]
    fn greater_depth_wins() {
        let mut depth = DepthBuffer::new(2, 2);
        let idx = depth.index(1, 1);
        assert_eq!(idx, 3);
        assert!(depth.test_and_set(idx, -5.0));
        assert!(depth.test_and_set(idx, 2.0));
        assert!(!depth.test_and_set(idx, 1.0));
        assert!(!depth.test_and_set(idx, 2.0), "equal depth must not win");
        assert_eq!(depth.get(idx), Some(2.0));
    }

    #[test]
    fn rejects_nan_and_out_of_range() {
        let mut depth = DepthBuffer::new(1, 1);
        assert!(!depth.test_and_set(0, f32::NAN));
        assert!(!depth.test_and_set(7, 1.0));
        assert_eq!(depth.get(0), Some(EMPTY_DEPTH));
    }

    #[test]
    fn clear_resets_slots() {
        let mut depth = DepthBuffer::new(2, 1);
        depth.test_and_set(0, 1.0);
        depth.clear();
        assert_eq!(depth.get(0), Some(EMPTY_DEPTH));
    }

    #[test]
    fn debug_dump_scales_written_range() {
        let mut depth = DepthBuffer::new(3, 1);
        depth.test_and_set(0, 1.0);
        depth.test_and_set(1, 3.0);
        let mut canvas = Canvas::new(3, 1);
        depth.write_debug(&mut canvas);
        assert_eq!(canvas.get(0, 0), Some(Color::gray(63)));
        assert_eq!(canvas.get(1, 0), Some(Color::gray(191)));
        assert_eq!(canvas.get(2, 0), Some(Color::BLACK));
    }
}
