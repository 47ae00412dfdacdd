//! A headless backend that records every command it receives.
//!
//! Useful for tests, for hosts that replay frames into another renderer, and
//! for checking resource lifetimes: it tracks live geometry and textures and
//! rejects any handle it did not issue or has already freed.
use indexmap::IndexMap;

use super::{DrawBackend, GeometryHandle, Primitive, Texture, TextureHandle, TextureImage};
use crate::{
    Color,
    error::ChartError,
    geometry::{LineGeometry, Vertex},
    point::{Point, Rect},
    transform::Transform,
};

/// Approximate cell size of the label font, in pixels.
const GLYPH_WIDTH: u32 = 7;
const GLYPH_HEIGHT: u32 = 13;

/// One recorded backend call. `begin`/`vertex`/`end` collapse into `Batch`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    Clear(Color),
    SetColor(Color),
    SetLineWidth(f32),
    SetSmoothing(bool),
    Batch {
        primitive: Primitive,
        transform: Transform,
        vertices: Vec<Point>,
    },
    CompileGeometry {
        handle: GeometryHandle,
        vertex_count: usize,
        byte_len: usize,
    },
    DrawGeometry {
        handle: GeometryHandle,
        transform: Transform,
    },
    ReleaseGeometry(GeometryHandle),
    UploadTexture(Texture),
    RasterizeText {
        texture: Texture,
        text: String,
    },
    DrawTexture {
        handle: TextureHandle,
        quad: Rect,
        transform: Transform,
    },
    ReleaseTexture(TextureHandle),
    Present,
}

#[derive(Debug, Clone)]
pub struct RecordingBackend {
    size: (u32, u32),
    commands: Vec<DrawCommand>,
    open_batch: Option<(Primitive, Transform, Vec<Point>)>,
    next_handle: u64,
    geometry: IndexMap<GeometryHandle, Vec<Vertex>>,
    textures: IndexMap<TextureHandle, Texture>,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
            open_batch: None,
            next_handle: 1,
            geometry: IndexMap::new(),
            textures: IndexMap::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the log, keeping live resources.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Vertices of a live compiled geometry.
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&[Vertex]> {
        self.geometry.get(&handle).map(Vec::as_slice)
    }

    pub fn live_geometry(&self) -> usize {
        self.geometry.len()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Number of presented frames still in the log.
    pub fn frames(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Present))
            .count()
    }

    fn issue(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl DrawBackend for RecordingBackend {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::SetSmoothing(enabled));
    }

    fn begin(&mut self, primitive: Primitive, transform: Transform) {
        if self.open_batch.is_some() {
            tracing::warn!("begin({:?}) inside an open batch; discarding it", primitive);
        }
        self.open_batch = Some((primitive, transform, Vec::new()));
    }

    fn vertex(&mut self, point: Point) {
        match self.open_batch.as_mut() {
            Some((_, _, vertices)) => vertices.push(point),
            None => tracing::warn!("vertex outside of a batch ignored"),
        }
    }

    fn end(&mut self) {
        match self.open_batch.take() {
            Some((primitive, transform, vertices)) => self.commands.push(DrawCommand::Batch {
                primitive,
                transform,
                vertices,
            }),
            None => tracing::warn!("end without begin ignored"),
        }
    }

    fn compile_geometry(&mut self, geometry: &LineGeometry) -> Result<GeometryHandle, ChartError> {
        let handle = GeometryHandle(self.issue());
        self.geometry.insert(handle, geometry.vertices().to_vec());
        self.commands.push(DrawCommand::CompileGeometry {
            handle,
            vertex_count: geometry.vertices().len(),
            byte_len: geometry.as_bytes().len(),
        });
        Ok(handle)
    }

    fn draw_geometry(
        &mut self,
        handle: GeometryHandle,
        transform: Transform,
    ) -> Result<(), ChartError> {
        if !self.geometry.contains_key(&handle) {
            return Err(ChartError::UnknownHandle {
                resource: "geometry",
                id: handle.0,
            });
        }
        self.commands
            .push(DrawCommand::DrawGeometry { handle, transform });
        Ok(())
    }

    fn release_geometry(&mut self, handle: GeometryHandle) -> Result<(), ChartError> {
        if self.geometry.shift_remove(&handle).is_none() {
            return Err(ChartError::UnknownHandle {
                resource: "geometry",
                id: handle.0,
            });
        }
        self.commands.push(DrawCommand::ReleaseGeometry(handle));
        Ok(())
    }

    fn upload_texture(&mut self, image: &TextureImage) -> Result<Texture, ChartError> {
        let texture = Texture {
            handle: TextureHandle(self.issue()),
            width: image.width,
            height: image.height,
        };
        self.textures.insert(texture.handle, texture);
        self.commands.push(DrawCommand::UploadTexture(texture));
        Ok(texture)
    }

    fn rasterize_text(&mut self, text: &str) -> Result<Texture, ChartError> {
        let texture = Texture {
            handle: TextureHandle(self.issue()),
            width: GLYPH_WIDTH * text.chars().count() as u32,
            height: GLYPH_HEIGHT,
        };
        self.textures.insert(texture.handle, texture);
        self.commands.push(DrawCommand::RasterizeText {
            texture,
            text: text.to_owned(),
        });
        Ok(texture)
    }

    fn draw_texture(
        &mut self,
        handle: TextureHandle,
        quad: Rect,
        transform: Transform,
    ) -> Result<(), ChartError> {
        if !self.textures.contains_key(&handle) {
            return Err(ChartError::UnknownHandle {
                resource: "texture",
                id: handle.0,
            });
        }
        self.commands.push(DrawCommand::DrawTexture {
            handle,
            quad,
            transform,
        });
        Ok(())
    }

    fn release_texture(&mut self, handle: TextureHandle) -> Result<(), ChartError> {
        if self.textures.shift_remove(&handle).is_none() {
            return Err(ChartError::UnknownHandle {
                resource: "texture",
                id: handle.0,
            });
        }
        self.commands.push(DrawCommand::ReleaseTexture(handle));
        Ok(())
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}
