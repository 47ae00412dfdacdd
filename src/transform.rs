//! Mappings between data space, pixel space and the unit square the
//! backend projects onto.
use glam::{DAffine2, DVec2};

use crate::{
    error::ChartError,
    point::Point,
    viewport::{GUTTER_PX, Viewport},
};

/// Map a screen pixel (origin top-left, `y` down) into data space.
pub fn screen_to_data(viewport: &Viewport, p: Point) -> Result<Point, ChartError> {
    viewport.ensure_drawable()?;
    let window_h = viewport.window_height as f64;

    let x = p.x - GUTTER_PX;
    let y = (window_h - p.y) - GUTTER_PX;

    let scale = viewport.scale();
    Ok(Point::new(
        x * scale.x + viewport.data_origin.x,
        y * scale.y + viewport.data_origin.y,
    ))
}

/// Map a data-space point onto the screen. Exact inverse of [`screen_to_data`].
pub fn data_to_screen(viewport: &Viewport, p: Point) -> Result<Point, ChartError> {
    viewport.ensure_drawable()?;
    let window_h = viewport.window_height as f64;

    let scale = viewport.scale();
    let x = (p.x - viewport.data_origin.x) / scale.x + GUTTER_PX;
    let y = (p.y - viewport.data_origin.y) / scale.y + GUTTER_PX;

    Ok(Point::new(x, window_h - y))
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// An affine map from some local space onto the unit square.
///
/// Built by composing steps in the order a nested matrix stack would apply
/// them, then handed by value to the backend with every batch.
pub struct Transform(DAffine2);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self(DAffine2::IDENTITY);

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self(DAffine2::from_scale(DVec2::new(sx, sy)))
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self(DAffine2::from_translation(DVec2::new(tx, ty)))
    }

    /// Append `inner`; it is applied to vertices before `self`.
    pub fn then(self, inner: Transform) -> Self {
        Self(self.0 * inner.0)
    }

    pub fn apply(&self, p: Point) -> Point {
        self.0.transform_point2(p.into()).into()
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    pub fn matrix(&self) -> DAffine2 {
        self.0
    }

    /// Pixel space (origin bottom-left) onto the unit square.
    pub fn pixels(viewport: &Viewport) -> Self {
        Self::scale(
            1.0 / viewport.window_width as f64,
            1.0 / viewport.window_height as f64,
        )
    }

    /// Pixel space shifted right by the vertical axis gutter.
    pub(crate) fn pixels_past_gutter_x(viewport: &Viewport) -> Self {
        let (w, h) = window(viewport);
        Self::pixels(viewport)
            .then(Self::translate(GUTTER_PX, 0.0))
            .then(Self::scale(w, h))
    }

    /// Pixel space shifted up by the horizontal axis gutter.
    pub(crate) fn pixels_past_gutter_y(viewport: &Viewport) -> Self {
        let (w, h) = window(viewport);
        Self::pixels(viewport)
            .then(Self::translate(0.0, GUTTER_PX))
            .then(Self::scale(w, h))
    }

    /// Data space onto the unit square, past both gutters.
    pub fn data(viewport: &Viewport) -> Self {
        let (w, h) = window(viewport);
        Self::pixels(viewport)
            .then(Self::translate(GUTTER_PX, GUTTER_PX))
            .then(Self::scale(w, h))
            .then(Self::scale(1.0 / viewport.data_width, 1.0 / viewport.data_height))
            .then(Self::translate(-viewport.data_origin.x, -viewport.data_origin.y))
    }
}

fn window(viewport: &Viewport) -> (f64, f64) {
    (
        viewport.window_width as f64,
        viewport.window_height as f64,
    )
}
