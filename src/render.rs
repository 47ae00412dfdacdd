//! Per-frame render pipeline.
//!
//! One linear pass per frame, in this order: background, grid cross-lines,
//! line geometry, markers, axis bands, dead-corner mask, present. Grid lines
//! stay beneath the content, axis text above it, and the mask goes last.
use crate::{
    Color, LineGraph,
    backend::{self, DrawBackend, Primitive},
    error::ChartError,
    point::Point,
    transform::Transform,
    viewport::{GUTTER_PX, Viewport},
};

impl<B: DrawBackend> LineGraph<B> {
    /// Render one frame.
    ///
    /// Creates the default viewport on first use. A surface with a zero
    /// dimension skips the frame without drawing anything.
    pub fn draw(&mut self) -> Result<(), ChartError> {
        let viewport = *self.viewport_or_default();
        if !viewport.is_drawable() {
            tracing::debug!(
                "skipping frame on {}x{} surface",
                viewport.window_width(),
                viewport.window_height()
            );
            return Ok(());
        }

        let compiled = self
            .cache
            .sync(&self.lines, &viewport, &mut self.backend)?;

        self.backend.clear(Color::WHITE);

        self.left_axis.configure(&viewport);
        self.bottom_axis.configure(&viewport);
        tracing::trace!(
            "frame: {} lines ({} recompiled), x ticks {:?}, y ticks {:?}",
            self.lines.len(),
            compiled,
            self.bottom_axis.density(),
            self.left_axis.density()
        );

        self.left_axis.draw_cross_lines(&viewport, &mut self.backend);
        self.bottom_axis
            .draw_cross_lines(&viewport, &mut self.backend);

        self.draw_data_and_markers(&viewport)?;

        if self.controls.show_tick_labels {
            self.left_axis.draw_ticks(&viewport, &mut self.backend)?;
            self.bottom_axis.draw_ticks(&viewport, &mut self.backend)?;
        }

        draw_dead_space(&viewport, &mut self.backend);

        self.backend.present();
        Ok(())
    }

    fn draw_data_and_markers(&mut self, viewport: &Viewport) -> Result<(), ChartError> {
        let transform = Transform::data(viewport);
        self.cache.draw(&self.lines, transform, &mut self.backend)?;
        for marker in self.markers.values() {
            marker.draw(viewport, transform, &mut self.backend)?;
        }
        Ok(())
    }
}

/// Cover the corner where both gutters overlap.
fn draw_dead_space<B: DrawBackend + ?Sized>(viewport: &Viewport, backend: &mut B) {
    backend.set_color(Color::WHITE);
    backend::batch(
        backend,
        Primitive::Quads,
        Transform::pixels(viewport),
        [
            Point::new(0.0, GUTTER_PX),
            Point::new(GUTTER_PX, GUTTER_PX),
            Point::new(GUTTER_PX, 0.0),
            Point::new(0.0, 0.0),
        ],
    );
}
