//! The immediate-mode drawing capability the chart renders through.
//!
//! Every batch carries its [`Transform`] by value, so backends never keep a
//! matrix stack of their own.
use core::fmt;

use crate::{
    Color, error::ChartError, geometry::LineGeometry, point::Point, point::Rect,
    transform::Transform,
};

pub mod recording;

/// Kind of primitive assembled from a batch of vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    /// Independent segments, two vertices each.
    Lines,
    LineStrip,
    /// Independent quads, four vertices each.
    Quads,
}

/// Backend-side handle of a compiled line geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Backend-side handle of an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

impl fmt::Display for GeometryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geometry({})", self.0)
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Texture({})", self.0)
    }
}

/// A texture living in the backend, with its size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Raw RGBA8 pixels to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// A single-color image.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let px = color.into_rgba8();
        let rgba = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// Drawing surface used by the chart.
///
/// Vertices are given in the local space of the batch; the batch transform
/// maps them onto the unit square, which the backend projects onto the whole
/// surface (x right, y up).
pub trait DrawBackend {
    /// Current pixel size of the surface.
    fn surface_size(&self) -> (u32, u32);

    /// The host resized the surface.
    fn resize_surface(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: Color);

    fn set_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    fn set_smoothing(&mut self, enabled: bool);

    fn begin(&mut self, primitive: Primitive, transform: Transform);

    fn vertex(&mut self, point: Point);

    fn end(&mut self);

    /// Compile a line strip for repeated drawing.
    fn compile_geometry(&mut self, geometry: &LineGeometry) -> Result<GeometryHandle, ChartError>;

    fn draw_geometry(
        &mut self,
        handle: GeometryHandle,
        transform: Transform,
    ) -> Result<(), ChartError>;

    fn release_geometry(&mut self, handle: GeometryHandle) -> Result<(), ChartError>;

    fn upload_texture(&mut self, image: &TextureImage) -> Result<Texture, ChartError>;

    /// Rasterize `text` with the backend's label font.
    fn rasterize_text(&mut self, text: &str) -> Result<Texture, ChartError>;

    /// Blit a texture onto `quad`, given in the batch's local space.
    fn draw_texture(
        &mut self,
        texture: TextureHandle,
        quad: Rect,
        transform: Transform,
    ) -> Result<(), ChartError>;

    fn release_texture(&mut self, handle: TextureHandle) -> Result<(), ChartError>;

    /// Show the finished frame.
    fn present(&mut self);
}

/// Emit one complete batch.
pub(crate) fn batch<B, I>(backend: &mut B, primitive: Primitive, transform: Transform, vertices: I)
where
    B: DrawBackend + ?Sized,
    I: IntoIterator<Item = Point>,
{
    backend.begin(primitive, transform);
    for v in vertices {
        backend.vertex(v);
    }
    backend.end();
}

/// Run `f` with line smoothing disabled.
pub(crate) fn without_smoothing<B, T>(backend: &mut B, f: impl FnOnce(&mut B) -> T) -> T
where
    B: DrawBackend + ?Sized,
{
    backend.set_smoothing(false);
    let out = f(backend);
    backend.set_smoothing(true);
    out
}
