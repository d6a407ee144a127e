//! Bounding-box triangle rasterization driven by barycentric weights.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's axis-aligned bounding box and clamp it to the
//!    target surface. A triangle entirely off-surface yields an empty box.
//! 2. Visit every integer sample point `(x, y)` inside the box.
//! 3. Compute barycentric weights for the sample; it is covered iff all three
//!    are non-negative. Degenerate triangles produce negative weights
//!    everywhere and so cover nothing.
//! 4. Hand covered samples to the fill mode: a flat colour write, or a depth
//!    test followed by a [`PixelShader`].
//!
//! Samples sit on integer coordinates: the pixel `(x, y)` is covered when the
//! point `(x, y)` is. A triangle with vertices (0,0), (2,0), (0,2) therefore
//! covers the six pixels with `x + y <= 2`.
//!
//! Both fill modes return the number of pixels they wrote.

use super::barycentric::{barycentric2d, interpolate, is_inside, DEGENERATE_EPSILON};
use super::depth::DepthBuffer;
use super::shader::PixelShader;
use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::surface::PixelSurface;

/// Inclusive range of integer sample points to visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Bounding box of the triangle's sample points, clamped to
    /// `[0, width - 1] x [0, height - 1]`. `None` when nothing is left.
    pub fn clamped(points: &[Vec2; 3], width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let min_x = points[0].x.min(points[1].x).min(points[2].x);
        let max_x = points[0].x.max(points[1].x).max(points[2].x);
        let min_y = points[0].y.min(points[1].y).min(points[2].y);
        let max_y = points[0].y.max(points[1].y).max(points[2].y);

        let bbox = Self {
            min_x: (min_x.ceil() as i32).max(0),
            min_y: (min_y.ceil() as i32).max(0),
            max_x: (max_x.floor() as i32).min(width as i32 - 1),
            max_y: (max_y.floor() as i32).min(height as i32 - 1),
        };
        (bbox.min_x <= bbox.max_x && bbox.min_y <= bbox.max_y).then_some(bbox)
    }
}

/// Triangle rasterizer testing every sample of the clamped bounding box.
///
/// Both windings are accepted; the barycentric formulation needs no separate
/// orientation check.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Visits every covered sample of `points` inside a `width x height` target.
    fn scan<F>(points: &[Vec2; 3], width: u32, height: u32, mut visit: F)
    where
        F: FnMut(i32, i32, [f32; 3]),
    {
        let ab = points[1] - points[0];
        let ac = points[2] - points[0];
        if ac.perp_dot(ab).abs() < DEGENERATE_EPSILON {
            return;
        }
        let Some(bbox) = BoundingBox::clamped(points, width, height) else {
            return;
        };

        for y in bbox.min_y..=bbox.max_y {
            for x in bbox.min_x..=bbox.max_x {
                let lambda = barycentric2d(points, Vec2::new(x as f32, y as f32));
                if is_inside(lambda) {
                    visit(x, y, lambda);
                }
            }
        }
    }

    /// Paints every covered pixel with `color`. No depth test.
    pub fn fill_triangle<S>(&self, points: &[Vec2; 3], surface: &mut S, color: Color) -> usize
    where
        S: PixelSurface + ?Sized,
    {
        let (width, height) = (surface.width(), surface.height());
        let mut written = 0;
        Self::scan(points, width, height, |x, y, _| {
            if surface.set(x, y, color) {
                written += 1;
            }
        });
        written
    }

    /// Depth-tested fill.
    ///
    /// The z of each point is its depth key (larger is nearer). For every
    /// covered pixel the key is interpolated with the barycentric weights and
    /// passed to [`DepthBuffer::test_and_set`]; only if the fragment wins is
    /// the shader run and its colour written.
    pub fn fill_triangle_depth<S, P>(
        &self,
        points: &[Vec3; 3],
        surface: &mut S,
        depth: &mut DepthBuffer,
        shader: &P,
    ) -> usize
    where
        S: PixelSurface + ?Sized,
        P: PixelShader + ?Sized,
    {
        let width = surface.width().min(depth.width());
        let height = surface.height().min(depth.height());
        let screen = [points[0].xy(), points[1].xy(), points[2].xy()];
        let keys = [points[0].z, points[1].z, points[2].z];

        let mut written = 0;
        Self::scan(&screen, width, height, |x, y, lambda| {
            let z = interpolate(lambda, keys);
            let index = depth.index(x as u32, y as u32);
            if depth.test_and_set(index, z) && surface.set(x, y, shader.shade(lambda)) {
                written += 1;
            }
        });
        written
    }
}

/// Draws a line with Bresenham's algorithm. Returns the number of pixels
/// written.
///
/// The segment is first clipped to the surface, so endpoints may lie
/// arbitrarily far off-surface without the loop walking the hidden part.
pub fn draw_line<S>(surface: &mut S, from: (i32, i32), to: (i32, i32), color: Color) -> usize
where
    S: PixelSurface + ?Sized,
{
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return 0;
    }
    let max = ((width - 1) as f64, (height - 1) as f64);
    let Some((start, end)) = clip_segment(
        (from.0 as f64, from.1 as f64),
        (to.0 as f64, to.1 as f64),
        max,
    ) else {
        return 0;
    };

    let (mut x, mut y) = (start.0.round() as i64, start.1.round() as i64);
    let (x1, y1) = (end.0.round() as i64, end.1.round() as i64);
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let step_x = if x < x1 { 1 } else { -1 };
    let step_y = if y < y1 { 1 } else { -1 };

    // Positive error favours stepping in x, negative in y.
    let mut err = dx - dy;
    let mut written = 0;

    loop {
        if surface.set(x as i32, y as i32, color) {
            written += 1;
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += step_x;
        }
        if e2 < dx {
            err += dx;
            y += step_y;
        }
    }
    written
}

/// Liang-Barsky clip of the segment `a -> b` against `[0, max.0] x [0, max.1]`.
/// `None` when no part of it is inside.
fn clip_segment(a: (f64, f64), b: (f64, f64), max: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [(-dx, a.0), (dx, max.0 - a.0), (-dy, a.1), (dy, max.1 - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Draws the three edges of a triangle, rounding vertices to pixels.
pub fn draw_triangle_outline<S>(surface: &mut S, points: &[Vec2; 3], color: Color)
where
    S: PixelSurface + ?Sized,
{
    let px = |p: Vec2| (p.x.round() as i32, p.y.round() as i32);
    for i in 0..3 {
        draw_line(surface, px(points[i]), px(points[(i + 1) % 3]), color);
    }
}
