//! Triangle meshes loaded from Wavefront OBJ files.
//!
//! A [`Model`] is a flat list of [`Face`]s. Every object and group in the file
//! is merged into that list, and polygons with more than three corners are
//! triangulated on load.

use std::path::Path;

use log::{debug, warn};

use crate::error::RenderError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// One triangle with its per-corner attributes.
///
/// Attributes the source file does not provide are zero: normals are
/// `(0, 0, 0)` and texture coordinates `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Face {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub texcoords: [Vec2; 3],
}

impl Face {
    /// A face with positions only.
    pub fn new(positions: [Vec3; 3]) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn with_texcoords(mut self, texcoords: [Vec2; 3]) -> Self {
        self.texcoords = texcoords;
        self
    }

    pub fn with_normals(mut self, normals: [Vec3; 3]) -> Self {
        self.normals = normals;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    faces: Vec<Face>,
}

impl Model {
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Load every mesh of an OBJ file into one face list.
    ///
    /// Fails with [`RenderError::Load`] when the file cannot be parsed and
    /// with [`RenderError::EmptyModel`] when it contains no triangles.
    /// Materials are ignored.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (meshes, _materials) = tobj::load_obj(path, &options)?;

        let mut faces = Vec::new();
        let mut missing_texcoords = 0usize;
        let mut missing_normals = 0usize;
        for model in &meshes {
            let mesh = &model.mesh;
            let has_texcoords = !mesh.texcoords.is_empty();
            let has_normals = !mesh.normals.is_empty();

            for tri in mesh.indices.chunks_exact(3) {
                let mut face = Face::default();
                for (corner, &index) in tri.iter().enumerate() {
                    let i = index as usize;
                    face.positions[corner] = vec3_at(&mesh.positions, i);
                    if has_texcoords {
                        face.texcoords[corner] = vec2_at(&mesh.texcoords, i);
                    }
                    if has_normals {
                        face.normals[corner] = vec3_at(&mesh.normals, i);
                    }
                }
                if !has_texcoords {
                    missing_texcoords += 1;
                }
                if !has_normals {
                    missing_normals += 1;
                }
                faces.push(face);
            }
        }

        if faces.is_empty() {
            return Err(RenderError::EmptyModel {
                path: Some(path.to_path_buf()),
            });
        }
        if missing_texcoords > 0 {
            warn!(
                "{}: {missing_texcoords} faces without texture coordinates",
                path.display()
            );
        }
        if missing_normals > 0 {
            warn!("{}: {missing_normals} faces without normals", path.display());
        }
        debug!(
            "loaded {} ({} meshes, {} faces)",
            path.display(),
            meshes.len(),
            faces.len()
        );

        Ok(Self { faces })
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.iter()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl<'a> IntoIterator for &'a Model {
    type Item = &'a Face;
    type IntoIter = std::slice::Iter<'a, Face>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

// Attribute arrays are flat; a short array reads as zero rather than panicking.
fn vec3_at(data: &[f32], i: usize) -> Vec3 {
    match data.get(3 * i..3 * i + 3) {
        Some(v) => Vec3::new(v[0], v[1], v[2]),
        None => Vec3::ZERO,
    }
}

fn vec2_at(data: &[f32], i: usize) -> Vec2 {
    match data.get(2 * i..2 * i + 2) {
        Some(v) => Vec2::new(v[0], v[1]),
        None => Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "texraster-{}-{name}.obj",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_textured_triangle() {
        let path = write_obj(
            "tri",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 -1\nf 1/1/1 2/2/1 3/3/1\n",
        );
        let model = Model::from_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(model.len(), 1);
        let face = model.faces().next().unwrap();
        assert_eq!(face.positions[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(face.texcoords[2], Vec2::new(0.0, 1.0));
        assert_eq!(face.normals[0], Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn quads_are_triangulated() {
        let path = write_obj("quad", "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        let model = Model::from_obj(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn missing_attributes_default_to_zero() {
        let path = write_obj("bare", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let model = Model::from_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        let face = model.faces().next().unwrap();
        assert_eq!(face.texcoords, [Vec2::ZERO; 3]);
        assert_eq!(face.normals, [Vec3::ZERO; 3]);
    }

    #[test]
    fn file_without_faces_is_empty_model() {
        let path = write_obj("empty", "v 0 0 0\nv 1 0 0\n");
        let result = Model::from_obj(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RenderError::EmptyModel { path: Some(_) })));
    }

    #[test]
    fn missing_file_is_load_error() {
        let result = Model::from_obj("/nonexistent/texraster/model.obj");
        assert!(matches!(result, Err(RenderError::Load(_))));
    }
}
