//! Barycentric weights via the cross-product formulation.
//!
//! For a triangle (A, B, C) and a query point P, form
//!
//! ```text
//! s0 = (Cx - Ax, Bx - Ax, Ax - Px)
//! s1 = (Cy - Ay, By - Ay, Ay - Py)
//! (p, q, r) = s0 x s1
//! ```
//!
//! `r` is twice the signed area of the triangle. When it is non-zero the
//! weights are `(1 - (p + q) / r, q / r, p / r)`, so that
//! `P = w0 * A + w1 * B + w2 * C`. Flipping the winding flips the sign of all
//! three of `p`, `q` and `r`, leaving the weights unchanged, so "every weight
//! is non-negative" is a complete inside test for either winding.
//!
//! Only x and y take part; the 3D variant ignores z.

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Below this `|r|` the triangle is treated as degenerate. Raster-space
/// vertices sit on integer coordinates, so any real triangle has `|r| >= 1`.
pub const DEGENERATE_EPSILON: f32 = 1e-2;

/// Returned for degenerate triangles. The negative first weight makes every
/// caller that rejects "any weight < 0" discard the sample.
pub const DEGENERATE_WEIGHTS: [f32; 3] = [-1.0, 1.0, 1.0];

#[inline]
fn weights(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> [f32; 3] {
    let s0 = Vec3::new(c.x - a.x, b.x - a.x, a.x - p.x);
    let s1 = Vec3::new(c.y - a.y, b.y - a.y, a.y - p.y);
    let u = s0.cross(s1);

    if u.z.abs() < DEGENERATE_EPSILON {
        return DEGENERATE_WEIGHTS;
    }
    [1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z]
}

/// Barycentric weights of `p` with respect to a 2D triangle.
#[inline]
pub fn barycentric2d(triangle: &[Vec2; 3], p: Vec2) -> [f32; 3] {
    weights(triangle[0], triangle[1], triangle[2], p)
}

/// Barycentric weights of `p` with respect to a 3D triangle, using only the
/// x and y components of every point.
#[inline]
pub fn barycentric3d(triangle: &[Vec3; 3], p: Vec3) -> [f32; 3] {
    weights(triangle[0].xy(), triangle[1].xy(), triangle[2].xy(), p.xy())
}

/// True when the sample lies inside the triangle or on its boundary.
#[inline]
pub fn is_inside(weights: [f32; 3]) -> bool {
    weights[0] >= 0.0 && weights[1] >= 0.0 && weights[2] >= 0.0
}

/// True when the triangle's screen-space (x, y) footprint has no area.
pub fn is_degenerate(triangle: &[Vec3; 3]) -> bool {
    let ab = triangle[1].xy() - triangle[0].xy();
    let ac = triangle[2].xy() - triangle[0].xy();
    ac.perp_dot(ab).abs() < DEGENERATE_EPSILON
}

/// Weighted sum of three per-vertex scalars.
#[inline]
pub fn interpolate(weights: [f32; 3], values: [f32; 3]) -> f32 {
    weights[0] * values[0] + weights[1] * values[1] + weights[2] * values[2]
}
