use glam::DVec2;

use crate::{
    controls::DEFAULT_MIN_EXTENT,
    error::ChartError,
    point::{Point, Rect},
    transform,
};

/// Width of the pixel band reserved for each axis decoration.
pub const GUTTER_PX: f64 = 50.0;

/// Data extent used when a frame is requested before any display rect.
pub(crate) const DEFAULT_EXTENT: f64 = 100.0;

/// Largest zoom step, as a percentage of the current extent.
pub(crate) const MAX_ZOOM_STEP_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
/// The visible data rectangle plus the pixel size of the surface it maps onto.
///
/// Extents are always strictly positive. The window size may be zero until the
/// host has laid the surface out; nothing is drawn in that state.
pub struct Viewport {
    pub(crate) data_origin: Point,
    pub(crate) data_width: f64,
    pub(crate) data_height: f64,
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
}

impl Viewport {
    /// Create a viewport showing `rect` on a `width`x`height` surface.
    pub fn new(rect: Rect, width: u32, height: u32) -> Result<Self, ChartError> {
        rect.validate()?;
        Ok(Self {
            data_origin: rect.origin,
            data_width: rect.width,
            data_height: rect.height,
            window_width: width,
            window_height: height,
        })
    }

    /// The 100x100 data window anchored at the origin.
    pub(crate) fn with_window(width: u32, height: u32) -> Self {
        Self {
            data_origin: Point::ORIGIN,
            data_width: DEFAULT_EXTENT,
            data_height: DEFAULT_EXTENT,
            window_width: width,
            window_height: height,
        }
    }

    pub fn data_origin(&self) -> Point {
        self.data_origin
    }

    pub fn data_width(&self) -> f64 {
        self.data_width
    }

    pub fn data_height(&self) -> f64 {
        self.data_height
    }

    pub fn window_width(&self) -> u32 {
        self.window_width
    }

    pub fn window_height(&self) -> u32 {
        self.window_height
    }

    pub fn start(&self) -> f64 {
        self.data_origin.x
    }

    pub fn finish(&self) -> f64 {
        self.data_origin.x + self.data_width
    }

    pub fn bottom(&self) -> f64 {
        self.data_origin.y
    }

    pub fn top(&self) -> f64 {
        self.data_origin.y + self.data_height
    }

    pub fn data_rect(&self) -> Rect {
        Rect {
            origin: self.data_origin,
            width: self.data_width,
            height: self.data_height,
        }
    }

    /// Data width over data height.
    pub fn aspect_ratio(&self) -> f64 {
        self.data_width / self.data_height
    }

    /// True when both window dimensions are non-zero.
    pub fn is_drawable(&self) -> bool {
        self.window_width != 0 && self.window_height != 0
    }

    pub(crate) fn ensure_drawable(&self) -> Result<(), ChartError> {
        if self.is_drawable() {
            Ok(())
        } else {
            Err(ChartError::ZeroWindow {
                width: self.window_width,
                height: self.window_height,
            })
        }
    }

    /// Data units per pixel along each axis.
    pub(crate) fn scale(&self) -> DVec2 {
        DVec2::new(
            self.data_width / self.window_width as f64,
            self.data_height / self.window_height as f64,
        )
    }

    /// Convert a pixel extent into a data extent.
    pub fn magnitude(&self, dx_px: f64, dy_px: f64) -> Point {
        let scale = self.scale();
        Point::new(dx_px * scale.x, dy_px * scale.y)
    }

    pub fn screen_to_data(&self, p: Point) -> Result<Point, ChartError> {
        transform::screen_to_data(self, p)
    }

    pub fn data_to_screen(&self, p: Point) -> Result<Point, ChartError> {
        transform::data_to_screen(self, p)
    }

    /// Shift the data origin by a pixel delta measured in screen space.
    ///
    /// Dragging right moves the view left in data space; dragging down moves
    /// it up, so the content follows the cursor.
    pub(crate) fn pan(&mut self, dx_px: f64, dy_px: f64) {
        if !self.is_drawable() {
            return;
        }
        let scale = self.scale();
        self.data_origin = Point::new(
            self.data_origin.x - dx_px * scale.x,
            self.data_origin.y + dy_px * scale.y,
        );
    }

    /// Shrink (`delta > 0`) or grow (`delta <= 0`) both extents by
    /// `step_percent` of their current size, keeping the center fixed.
    ///
    /// `step_percent` is clamped to `(0, 100]`; a non-positive or non-finite
    /// step leaves the view unchanged. A shrink never takes an extent below
    /// `min_extent`, and a growth whose extents or origin would no longer be
    /// finite is skipped.
    pub(crate) fn zoom(&mut self, delta: f64, step_percent: f64, min_extent: f64) {
        if !(step_percent.is_finite() && step_percent > 0.0) {
            tracing::warn!("ignoring zoom with step of {}%", step_percent);
            return;
        }
        let step_percent = step_percent.min(MAX_ZOOM_STEP_PERCENT);
        let floor = if min_extent.is_finite() && min_extent > 0.0 {
            min_extent
        } else {
            DEFAULT_MIN_EXTENT
        };
        let step_w = self.data_width / 100.0 * step_percent;
        let step_h = self.data_height / 100.0 * step_percent;

        let (dw, dh) = if delta > 0.0 {
            let width = (self.data_width - step_w).max(floor.min(self.data_width));
            let height = (self.data_height - step_h).max(floor.min(self.data_height));
            (width - self.data_width, height - self.data_height)
        } else {
            (step_w, step_h)
        };

        let width = self.data_width + dw;
        let height = self.data_height + dh;
        let origin = Point::new(
            self.data_origin.x - dw / 2.0,
            self.data_origin.y - dh / 2.0,
        );
        let finite = [width, height, origin.x, origin.y, origin.x + width, origin.y + height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            tracing::debug!("zoom out past the representable range skipped");
            return;
        }

        self.data_width = width;
        self.data_height = height;
        self.data_origin = origin;
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) -> Result<(), ChartError> {
        rect.validate()?;
        self.data_origin = rect.origin;
        self.data_width = rect.width;
        self.data_height = rect.height;
        Ok(())
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_is_clamped_to_floor() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 1.0, 1.0), 100, 100).unwrap();
        for _ in 0..500 {
            vp.zoom(1.0, 10.0, 0.25);
        }
        assert!((vp.data_width - 0.25).abs() < 1e-12);
        assert!((vp.data_height - 0.25).abs() < 1e-12);
        // Center stays at (0.5, 0.5).
        assert!((vp.data_origin.x + vp.data_width / 2.0 - 0.5).abs() < 1e-12);
        assert!((vp.data_origin.y + vp.data_height / 2.0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn pan_without_window_is_ignored() {
        let mut vp = Viewport::with_window(0, 0);
        vp.pan(10.0, 10.0);
        assert_eq!(vp.data_origin, Point::ORIGIN);
    }
}
