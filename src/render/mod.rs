//! Rasterization primitives: barycentric coverage, depth buffer, shaders.

pub mod barycentric;
pub mod depth;
pub mod rasterizer;
pub mod shader;

pub use barycentric::{barycentric2d, barycentric3d, is_inside};
pub use depth::DepthBuffer;
pub use rasterizer::{draw_line, draw_triangle_outline, BoundingBox, Rasterizer};
pub use shader::{FlatShader, PixelShader, TextureShader};
