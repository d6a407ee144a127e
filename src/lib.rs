//! A CPU rasterizer for textured, lit triangle meshes.
//!
//! Vertices go from model space through an optional camera and perspective
//! projection to screen space. Triangles are filled with barycentric
//! coverage, hidden surfaces are removed with a depth buffer, and texels are
//! sampled perspective-correctly and modulated by a directional light.
//!
//! # Quick Start
//!
//! ```ignore
//! use texraster::prelude::*;
//!
//! let model = Model::from_obj("head.obj")?;
//! let texture = Texture::from_file("head_diffuse.tga")?;
//! let mut canvas = Canvas::new(800, 800);
//!
//! let stats = render(&model, &mut canvas, Some(&texture), RenderConfig::default())?;
//! canvas.flip_vertically();
//! canvas.save("output.tga")?;
//! ```

pub mod camera;
pub mod colors;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod model;
pub mod projection;
pub mod render;
pub mod surface;
pub mod texture;
pub mod transform;
pub mod viewport;

// Re-export commonly needed types at crate root for convenience
pub use engine::{render, RenderConfig, RenderOutput, RenderPass, RenderStats};
pub use error::RenderError;
pub use model::{Face, Model};
pub use projection::Projection;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use texraster::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{render, RenderConfig, RenderOutput, RenderPass, RenderStats};
    pub use crate::error::RenderError;

    // Scene
    pub use crate::camera::Camera;
    pub use crate::light::DirectionalLight;
    pub use crate::model::{Face, Model};
    pub use crate::projection::Projection;
    pub use crate::transform::{Shear, Transform};

    // Pixels
    pub use crate::colors::Color;
    pub use crate::surface::{Canvas, PixelSurface};
    pub use crate::texture::Texture;

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}
