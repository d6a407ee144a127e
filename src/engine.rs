//! Render driver.
//!
//! A [`RenderPass`] owns the depth buffer for one frame and pushes faces
//! through the pipeline one at a time:
//!
//! 1. model transform ([`Transform`]) into world space
//! 2. lighting on the world-space triangle; unlit faces are dropped here
//! 3. view transform ([`Camera`]) and, if configured, [`Projection`]
//! 4. perspective divide and [`ScreenMapper`]. The aspect correction happens
//!    once: in the projection matrix when one is set, otherwise in the mapper.
//!    A projection should therefore use the surface's `width / height`.
//! 5. depth-tested fill with a [`TextureShader`] or a [`FlatShader`]
//!
//! Faces that cannot be drawn are skipped and counted in [`RenderStats`];
//! nothing about a single face is an error.
//!
//! # Depth keys
//!
//! The depth buffer keeps the *largest* key. Without a projection the key is
//! the z coordinate: the viewer looks down −z, so larger z is nearer. When a
//! camera is set its view space looks down +z and the key is −z instead. With
//! a projection the key is `1 − ndc_z`, which maps the near plane to 1 and the
//! far plane to 0.

use std::fmt;

use log::{debug, trace, warn};

use crate::camera::Camera;
use crate::colors::Color;
use crate::error::RenderError;
use crate::light::{face_normal, DirectionalLight};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::model::Face;
use crate::projection::Projection;
use crate::render::barycentric::is_degenerate;
use crate::render::{DepthBuffer, FlatShader, Rasterizer, TextureShader};
use crate::surface::PixelSurface;
use crate::transform::Transform;
use crate::viewport::ScreenMapper;

/// Everything that stays fixed for one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub light: DirectionalLight,
    /// `None` renders orthographically.
    pub projection: Option<Projection>,
    /// `None` uses world space as view space.
    pub camera: Option<Camera>,
    pub model_transform: Transform,
    /// Colour of untextured faces, before lighting.
    pub base_color: Color,
    /// Drop faces with a vertex at or behind the eye plane (`w <= 0`).
    pub cull_behind_camera: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            light: DirectionalLight::default(),
            projection: None,
            camera: None,
            model_transform: Transform::default(),
            base_color: Color::WHITE,
            cull_behind_camera: true,
        }
    }
}

impl RenderConfig {
    pub fn with_light(mut self, light: DirectionalLight) -> Self {
        self.light = light;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_model_transform(mut self, transform: Transform) -> Self {
        self.model_transform = transform;
        self
    }

    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    pub fn with_cull_behind_camera(mut self, cull: bool) -> Self {
        self.cull_behind_camera = cull;
        self
    }
}

/// Per-pass face counters.
///
/// `faces_total` equals `drawn + culled_unlit + culled_behind_camera +
/// degenerate`. A drawn face may still write zero pixels when it is hidden or
/// off-surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_total: usize,
    pub drawn: usize,
    pub culled_unlit: usize,
    pub culled_behind_camera: usize,
    pub degenerate: usize,
    pub pixels_written: usize,
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} faces: {} drawn, {} unlit, {} behind camera, {} degenerate; {} pixels",
            self.faces_total,
            self.drawn,
            self.culled_unlit,
            self.culled_behind_camera,
            self.degenerate,
            self.pixels_written
        )
    }
}

/// What a finished pass hands back.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub depth: DepthBuffer,
    pub stats: RenderStats,
}

/// Why a face was not drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Skip {
    Degenerate,
    Unlit,
    BehindCamera,
}

/// One frame of rendering into a borrowed surface.
pub struct RenderPass<'a, S: PixelSurface + ?Sized> {
    surface: &'a mut S,
    texture: Option<&'a dyn PixelSurface>,
    depth: DepthBuffer,
    config: RenderConfig,
    mapper: ScreenMapper,
    model_matrix: Mat4,
    view_matrix: Mat4,
    projection_matrix: Option<Mat4>,
    rasterizer: Rasterizer,
    stats: RenderStats,
}

impl<'a, S: PixelSurface + ?Sized> RenderPass<'a, S> {
    /// Starts a pass and allocates its depth buffer.
    ///
    /// Fails with [`RenderError::InvalidSurface`] if the surface has a zero
    /// dimension.
    pub fn new(surface: &'a mut S, config: RenderConfig) -> Result<Self, RenderError> {
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurface { width, height });
        }
        debug!(
            "render pass {width}x{height}, {}",
            if config.projection.is_some() {
                "perspective"
            } else {
                "orthographic"
            }
        );
        let mapper = match config.projection {
            Some(projection) => {
                let surface_aspect = width as f32 / height as f32;
                if (projection.aspect_ratio() - surface_aspect).abs() > 1e-3 {
                    warn!(
                        "projection aspect {} does not match surface {width}x{height}",
                        projection.aspect_ratio()
                    );
                }
                ScreenMapper::stretched(width, height)
            }
            None => ScreenMapper::new(width, height),
        };

        Ok(Self {
            surface,
            texture: None,
            depth: DepthBuffer::new(width, height),
            mapper,
            model_matrix: config.model_transform.to_matrix(),
            view_matrix: config.camera.map(|c| c.view_matrix()).unwrap_or_default(),
            projection_matrix: config.projection.map(|p| p.matrix()),
            config,
            rasterizer: Rasterizer::new(),
            stats: RenderStats::default(),
        })
    }

    /// Textures every following face. Without a texture faces are filled with
    /// the lit base colour.
    pub fn with_texture(mut self, texture: &'a dyn PixelSurface) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Draws one face. Returns the number of pixels written.
    pub fn draw_face(&mut self, face: &Face) -> usize {
        self.stats.faces_total += 1;
        match self.rasterize_face(face) {
            Ok(written) => {
                self.stats.drawn += 1;
                self.stats.pixels_written += written;
                written
            }
            Err(skip) => {
                trace!("face {} skipped: {skip:?}", self.stats.faces_total - 1);
                match skip {
                    Skip::Degenerate => self.stats.degenerate += 1,
                    Skip::Unlit => self.stats.culled_unlit += 1,
                    Skip::BehindCamera => self.stats.culled_behind_camera += 1,
                }
                0
            }
        }
    }

    pub fn draw_faces<'f, I>(&mut self, faces: I)
    where
        I: IntoIterator<Item = &'f Face>,
    {
        for face in faces {
            self.draw_face(face);
        }
    }

    /// Ends the pass and releases the surface.
    pub fn finish(self) -> RenderOutput {
        debug!("render pass finished: {}", self.stats);
        RenderOutput {
            depth: self.depth,
            stats: self.stats,
        }
    }

    fn rasterize_face(&mut self, face: &Face) -> Result<usize, Skip> {
        let world = face
            .positions
            .map(|p| self.model_matrix.transform_point(p).xyz());
        let intensity = match self.config.light.face_intensity(&world) {
            Some(intensity) => intensity,
            None if face_normal(&world).is_none() => return Err(Skip::Degenerate),
            None => return Err(Skip::Unlit),
        };

        let view = world.map(|p| self.view_matrix.transform_point(p));
        let (screen, inv_w) = match self.projection_matrix {
            Some(projection) => {
                let clip = view.map(|p| projection * p);
                if self.config.cull_behind_camera && clip.iter().any(|c| c.w <= 0.0) {
                    return Err(Skip::BehindCamera);
                }
                let screen = clip.map(|c| {
                    let ndc = c.perspective_divide();
                    let mut p = self.mapper.map(ndc);
                    p.z = 1.0 - ndc.z;
                    p
                });
                let inv_w = clip.map(|c| if c.w == 0.0 { 1.0 } else { 1.0 / c.w });
                (screen, inv_w)
            }
            None => {
                let flip = if self.config.camera.is_some() { -1.0 } else { 1.0 };
                let screen = view.map(|v| {
                    let mut p = self.mapper.map(v.xyz());
                    p.z = flip * v.z;
                    p
                });
                (screen, [1.0; 3])
            }
        };

        if is_degenerate(&screen) {
            return Err(Skip::Degenerate);
        }

        let written = match self.texture {
            Some(texture) => {
                let shader = TextureShader::new(texture, face.texcoords, inv_w, intensity);
                self.rasterizer
                    .fill_triangle_depth(&screen, &mut *self.surface, &mut self.depth, &shader)
            }
            None => {
                let shader = FlatShader::new(self.config.base_color.modulate(intensity));
                self.rasterizer
                    .fill_triangle_depth(&screen, &mut *self.surface, &mut self.depth, &shader)
            }
        };
        Ok(written)
    }
}

/// Renders `faces` into `surface` in a single pass.
///
/// An empty face list is an error ([`RenderError::EmptyModel`]); faces that
/// are skipped are not.
pub fn render<'f, I, S>(
    faces: I,
    surface: &mut S,
    texture: Option<&dyn PixelSurface>,
    config: RenderConfig,
) -> Result<RenderStats, RenderError>
where
    I: IntoIterator<Item = &'f Face>,
    S: PixelSurface + ?Sized,
{
    let mut faces = faces.into_iter().peekable();
    if faces.peek().is_none() {
        return Err(RenderError::EmptyModel { path: None });
    }

    let mut pass = RenderPass::new(surface, config)?;
    if let Some(texture) = texture {
        pass = pass.with_texture(texture);
    }
    pass.draw_faces(faces);
    Ok(pass.finish().stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::surface::Canvas;

    /// Lit by the default light: `(C - A) x (B - A)` points down −z.
    fn lit_face(z: f32) -> Face {
        Face::new([
            Vec3::new(-0.5, -0.5, z),
            Vec3::new(0.5, -0.5, z),
            Vec3::new(-0.5, 0.5, z),
        ])
    }

    fn count(canvas: &Canvas, color: Color) -> usize {
        canvas.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let mut canvas = Canvas::new(0, 4);
        let result = RenderPass::new(&mut canvas, RenderConfig::default());
        assert!(matches!(
            result,
            Err(RenderError::InvalidSurface { width: 0, height: 4 })
        ));
    }

    #[test]
    fn flat_face_uses_lit_base_color() {
        let mut canvas = Canvas::new(16, 16);
        let config = RenderConfig::default().with_base_color(Color::RED);
        let mut pass = RenderPass::new(&mut canvas, config).unwrap();
        let written = pass.draw_face(&lit_face(0.0));
        let output = pass.finish();

        assert!(written > 0);
        assert_eq!(output.stats.drawn, 1);
        assert_eq!(count(&canvas, Color::RED), written);
    }

    #[test]
    fn unlit_face_is_counted_not_drawn() {
        let mut canvas = Canvas::new(16, 16);
        let face = lit_face(0.0);
        let back = Face::new([face.positions[0], face.positions[2], face.positions[1]]);
        let stats = render([&back], &mut canvas, None, RenderConfig::default()).unwrap();

        assert_eq!(stats.culled_unlit, 1);
        assert_eq!(stats.pixels_written, 0);
        assert_eq!(count(&canvas, Color::BLACK), 256);
    }

    #[test]
    fn degenerate_face_is_counted() {
        let mut canvas = Canvas::new(8, 8);
        let line = Face::new([Vec3::ZERO, Vec3::ONE * 0.1, Vec3::ONE * 0.2]);
        let stats = render([&line], &mut canvas, None, RenderConfig::default()).unwrap();
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.faces_total, 1);
    }

    #[test]
    fn nearer_face_wins_in_either_order() {
        let near = lit_face(0.5);
        let far = lit_face(-0.5);
        for order in [[&near, &far], [&far, &near]] {
            let mut canvas = Canvas::new(16, 16);
            let mut pass = RenderPass::new(&mut canvas, RenderConfig::default()).unwrap();
            pass.draw_faces(order);
            let output = pass.finish();
            assert_eq!(output.depth.written_range(), Some((0.5, 0.5)));
        }
    }

    #[test]
    fn camera_flips_orthographic_depth() {
        // camera on +z looking back at the origin sees the z = 0.5 face first
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let config = RenderConfig::default().with_camera(camera);
        let mut canvas = Canvas::new(16, 16);
        let mut pass = RenderPass::new(&mut canvas, config).unwrap();
        pass.draw_faces([&lit_face(0.5), &lit_face(-0.5)]);
        let output = pass.finish();
        assert_eq!(output.depth.written_range(), Some((-4.5, -4.5)));
    }

    #[test]
    fn face_behind_camera_is_culled() {
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO);
        let config = RenderConfig::default()
            .with_camera(camera)
            .with_projection(Projection::default());
        let mut canvas = Canvas::new(16, 16);
        let stats = render([&lit_face(-3.0)], &mut canvas, None, config).unwrap();
        assert_eq!(stats.culled_behind_camera, 1);
        assert_eq!(stats.pixels_written, 0);
    }

    #[test]
    fn perspective_face_in_front_is_drawn() {
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO);
        let config = RenderConfig::default()
            .with_camera(camera)
            .with_projection(Projection::default());
        let mut canvas = Canvas::new(32, 32);
        let mut pass = RenderPass::new(&mut canvas, config).unwrap();
        pass.draw_face(&lit_face(0.0));
        let output = pass.finish();

        assert_eq!(output.stats.drawn, 1);
        let (lo, hi) = output.depth.written_range().unwrap();
        assert!(lo > 0.0 && hi < 1.0);
    }

    /// Bounding box of all non-black pixels as `(width, height)`.
    fn painted_extent(canvas: &Canvas) -> (i32, i32) {
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if canvas.get(x, y) != Some(Color::BLACK) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        (max_x - min_x + 1, max_y - min_y + 1)
    }

    #[test]
    fn square_stays_square_on_wide_perspective_surface() {
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO);
        let config = RenderConfig::default()
            .with_camera(camera)
            .with_projection(Projection::from_degrees(60.0, 2.0, 0.5, 50.0));
        let square = [
            Face::new([
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ]),
            Face::new([
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ]),
        ];
        let mut canvas = Canvas::new(200, 100);
        let stats = render(&square, &mut canvas, None, config).unwrap();
        assert_eq!(stats.drawn, 2);

        let (w, h) = painted_extent(&canvas);
        assert!((w - h).abs() <= 1, "painted {w}x{h}");
        assert!(w > 50, "painted {w}x{h}");
    }

    #[test]
    fn texture_replaces_base_color() {
        let texture = Canvas::filled(2, 2, Color::GREEN);
        let face = lit_face(0.0).with_texcoords([Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
        let mut canvas = Canvas::new(16, 16);
        let stats = render([&face], &mut canvas, Some(&texture), RenderConfig::default()).unwrap();

        assert!(stats.pixels_written > 0);
        assert_eq!(count(&canvas, Color::GREEN), stats.pixels_written);
    }

    #[test]
    fn empty_face_list_is_an_error() {
        let mut canvas = Canvas::new(4, 4);
        let result = render(&[] as &[Face], &mut canvas, None, RenderConfig::default());
        assert!(matches!(result, Err(RenderError::EmptyModel { path: None })));
    }

    #[test]
    fn stats_add_up() {
        let face = lit_face(0.0);
        let back = Face::new([face.positions[0], face.positions[2], face.positions[1]]);
        let line = Face::new([Vec3::ZERO; 3]);
        let mut canvas = Canvas::new(8, 8);
        let stats = render([&face, &back, &line], &mut canvas, None, RenderConfig::default()).unwrap();

        assert_eq!(stats.faces_total, 3);
        assert_eq!(
            stats.drawn + stats.culled_unlit + stats.culled_behind_camera + stats.degenerate,
            stats.faces_total
        );
    }
}
