//! Overlay markers drawn in data space after the lines.
use core::fmt;

use crate::{
    Color,
    backend::{self, DrawBackend, Primitive, Texture, TextureImage},
    error::ChartError,
    point::{Point, Rect},
    transform::Transform,
    viewport::Viewport,
};

/// Registry key of a marker in a [`crate::LineGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub(crate) u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({})", self.0)
    }
}

/// Something drawn on top of the lines.
///
/// `transform` maps data space onto the unit square for the current frame.
/// The chart disposes a marker exactly once, when it is removed.
pub trait Marker {
    fn draw(
        &self,
        viewport: &Viewport,
        transform: Transform,
        backend: &mut dyn DrawBackend,
    ) -> Result<(), ChartError>;

    /// Release any backend resources held by the marker.
    fn dispose(&mut self, _backend: &mut dyn DrawBackend) -> Result<(), ChartError> {
        Ok(())
    }
}

/// Data-space quad of `width_px`x`height_px` pixels centered on `center`.
fn centered_quad(viewport: &Viewport, center: Point, width_px: f64, height_px: f64) -> Rect {
    let size = viewport.magnitude(width_px, height_px);
    Rect {
        origin: Point::new(center.x - size.x / 2.0, center.y - size.y / 2.0),
        width: size.x,
        height: size.y,
    }
}

/// A persistent texture pinned to a data location, drawn at its pixel size
/// whatever the zoom level.
#[derive(Debug)]
pub struct TextureMarker {
    texture: Texture,
    location: Point,
    released: bool,
}

impl TextureMarker {
    /// Upload `image` and pin it at `location`.
    pub fn upload(
        backend: &mut dyn DrawBackend,
        image: &TextureImage,
        location: Point,
    ) -> Result<Self, ChartError> {
        let texture = backend.upload_texture(image)?;
        Ok(Self {
            texture,
            location,
            released: false,
        })
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Marker for TextureMarker {
    fn draw(
        &self,
        viewport: &Viewport,
        transform: Transform,
        backend: &mut dyn DrawBackend,
    ) -> Result<(), ChartError> {
        if self.released {
            return Err(ChartError::Disposed {
                resource: "texture",
            });
        }
        let quad = centered_quad(
            viewport,
            self.location,
            self.texture.width as f64,
            self.texture.height as f64,
        );
        backend.set_color(Color::WHITE);
        backend.draw_texture(self.texture.handle, quad, transform)
    }

    fn dispose(&mut self, backend: &mut dyn DrawBackend) -> Result<(), ChartError> {
        if self.released {
            return Err(ChartError::Disposed {
                resource: "texture",
            });
        }
        backend.release_texture(self.texture.handle)?;
        self.released = true;
        Ok(())
    }
}

/// A filled square of fixed pixel size at a data location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotMarker {
    pub location: Point,
    pub color: Color,
    pub size_px: f64,
}

impl DotMarker {
    pub fn new(location: Point, color: Color, size_px: f64) -> Self {
        Self {
            location,
            color,
            size_px,
        }
    }
}

impl Marker for DotMarker {
    fn draw(
        &self,
        viewport: &Viewport,
        transform: Transform,
        backend: &mut dyn DrawBackend,
    ) -> Result<(), ChartError> {
        let quad = centered_quad(viewport, self.location, self.size_px, self.size_px);
        let (x0, y0) = (quad.origin.x, quad.origin.y);
        let (x1, y1) = (quad.right(), quad.top());
        backend.set_color(self.color);
        backend::batch(
            backend,
            Primitive::Quads,
            transform,
            [
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
                Point::new(x0, y0),
            ],
        );
        Ok(())
    }
}
