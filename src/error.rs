//! Error type for everything that can stop a render pass before it starts.
//!
//! Per-face problems (degenerate or unlit triangles) are never errors; they are
//! skipped and counted in [`RenderStats`](crate::engine::RenderStats).

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum RenderError {
    /// The OBJ loader could not read or parse the model.
    Load(tobj::LoadError),
    /// An image could not be decoded or encoded.
    Image(image::ImageError),
    /// The model parsed but produced no triangles to draw.
    EmptyModel { path: Option<PathBuf> },
    /// A surface with a zero dimension, or one that does not fit in memory.
    InvalidSurface { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Load(e) => write!(f, "failed to load model: {e}"),
            RenderError::Image(e) => write!(f, "image error: {e}"),
            RenderError::EmptyModel { path: Some(path) } => {
                write!(f, "model {} contains no faces", path.display())
            }
            RenderError::EmptyModel { path: None } => write!(f, "no faces to render"),
            RenderError::InvalidSurface { width, height } => {
                write!(f, "invalid surface size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Load(e) => Some(e),
            RenderError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for RenderError {
    fn from(e: tobj::LoadError) -> Self {
        RenderError::Load(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}
