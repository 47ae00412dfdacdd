//! Pan/zoom gesture handling.
use glam::DVec2;
use iced::mouse::{self, Event, ScrollDelta};

use crate::{LineGraph, backend::DrawBackend, error::ChartError};

/// Drag-to-pan state. `last` is the cursor position of the previous pan step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PanState {
    pub active: bool,
    pub last: DVec2,
    /// Latest cursor position seen by the mouse handler.
    pub cursor: DVec2,
}

impl<B: DrawBackend> LineGraph<B> {
    pub fn is_panning(&self) -> bool {
        self.pan.active
    }

    pub fn pan_enabled(&self) -> bool {
        self.controls.pan.drag_to_pan
    }

    /// Enable or disable drag-to-pan. Disabling ends a pan in progress.
    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.controls.pan.drag_to_pan = enabled;
        if !enabled {
            self.pan.active = false;
        }
    }

    /// Begin a pan gesture at pixel position (`x`, `y`).
    pub fn start_pan(&mut self, x: f64, y: f64) {
        self.pan.active = true;
        self.pan.last = DVec2::new(x, y);
    }

    pub fn stop_pan(&mut self) {
        self.pan.active = false;
    }

    /// Move the active pan to pixel position (`x`, `y`) and redraw.
    ///
    /// Returns whether the view moved; without an active pan this does
    /// nothing.
    pub fn pan(&mut self, x: f64, y: f64) -> Result<bool, ChartError> {
        if !self.pan.active {
            return Ok(false);
        }
        let position = DVec2::new(x, y);
        let delta = position - self.pan.last;
        self.pan.last = position;
        self.viewport_or_default().pan(delta.x, delta.y);
        self.draw()?;
        Ok(true)
    }

    /// Zoom in for `delta > 0`, out otherwise, then redraw.
    pub fn zoom(&mut self, delta: f64) -> Result<(), ChartError> {
        let zoom = self.controls.zoom;
        self.viewport_or_default()
            .zoom(delta, zoom.step_percent, zoom.min_extent);
        self.draw()
    }

    /// The host surface changed size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ChartError> {
        tracing::debug!("resize to {}x{}", width, height);
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.resize(width, height);
        }
        self.backend.resize_surface(width, height);
        self.draw()
    }

    /// Map a mouse event onto pan and zoom gestures.
    ///
    /// Cursor positions are pixels relative to the chart surface. Returns
    /// whether a frame was drawn.
    pub fn handle_mouse_event(&mut self, event: Event) -> Result<bool, ChartError> {
        match event {
            Event::CursorMoved { position } => {
                self.pan.cursor = DVec2::new(position.x as f64, position.y as f64);
                if !self.controls.pan.drag_to_pan {
                    return Ok(false);
                }
                self.pan(self.pan.cursor.x, self.pan.cursor.y)
            }
            Event::ButtonPressed(mouse::Button::Left) if self.controls.pan.drag_to_pan => {
                self.start_pan(self.pan.cursor.x, self.pan.cursor.y);
                Ok(false)
            }
            Event::ButtonReleased(mouse::Button::Left) if self.controls.pan.drag_to_pan => {
                self.stop_pan();
                Ok(false)
            }
            Event::WheelScrolled { delta } if self.controls.zoom.scroll_to_zoom => {
                let y = match delta {
                    ScrollDelta::Lines { y, .. } => y,
                    ScrollDelta::Pixels { y, .. } => y,
                };
                // Purely horizontal scrolling carries no zoom direction.
                if y == 0.0 {
                    return Ok(false);
                }
                self.zoom(y as f64)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
