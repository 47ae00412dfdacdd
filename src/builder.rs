use std::sync::Arc;

use crate::{
    LineGraph,
    axis::{AxisDecorator, AxisKind},
    backend::DrawBackend,
    controls::ChartControls,
    error::ChartError,
    line::Line,
    point::Rect,
    ticks::{Tick, TickFormatter},
    viewport::Viewport,
};

/// Builder for configuring and constructing a [`LineGraph`].
///
/// All settings have sensible defaults.
///
/// # Example
///
/// ```ignore
/// let graph = LineGraphBuilder::new()
///     .with_display_rect(Rect::new(0.0, -2.0, 10.0, 4.0))
///     .with_text_enabled(false)
///     .add_line(Line::new(1.0, Color::BLACK, [[0.0, 0.0], [1.0, 1.0]]))
///     .build(backend)?;
/// ```
#[derive(Default)]
pub struct LineGraphBuilder {
    controls: Option<ChartControls>,
    text_enabled: Option<bool>,
    pan_enabled: Option<bool>,
    display_rect: Option<Rect>,
    x_formatter: Option<TickFormatter>,
    y_formatter: Option<TickFormatter>,
    lines: Vec<Line>,
}

impl LineGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole control set.
    pub fn with_controls(mut self, controls: ChartControls) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Draw axis bands and tick labels. Enabled by default.
    pub fn with_text_enabled(mut self, enabled: bool) -> Self {
        self.text_enabled = Some(enabled);
        self
    }

    /// Enable drag-to-pan. Enabled by default.
    pub fn with_pan_enabled(mut self, enabled: bool) -> Self {
        self.pan_enabled = Some(enabled);
        self
    }

    /// Initial visible data rectangle.
    pub fn with_display_rect(mut self, rect: Rect) -> Self {
        self.display_rect = Some(rect);
        self
    }

    /// Set a custom formatter for the x-axis tick labels.
    pub fn with_x_tick_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Tick) -> String + Send + Sync + 'static,
    {
        self.x_formatter = Some(Arc::new(formatter));
        self
    }

    /// Set a custom formatter for the y-axis tick labels.
    pub fn with_y_tick_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Tick) -> String + Send + Sync + 'static,
    {
        self.y_formatter = Some(Arc::new(formatter));
        self
    }

    pub fn add_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the chart around `backend`.
    ///
    /// The display rect, if any, is applied without drawing, so the surface
    /// may still be unsized at this point.
    pub fn build<B: DrawBackend>(self, backend: B) -> Result<LineGraph<B>, ChartError> {
        let mut controls = self.controls.unwrap_or_default();
        if let Some(enabled) = self.text_enabled {
            controls.show_tick_labels = enabled;
        }
        if let Some(enabled) = self.pan_enabled {
            controls.pan.drag_to_pan = enabled;
        }

        let mut left = AxisDecorator::new(AxisKind::Vertical);
        if let Some(f) = self.y_formatter {
            left = left.with_formatter(f);
        }
        let mut bottom = AxisDecorator::new(AxisKind::Horizontal);
        if let Some(f) = self.x_formatter {
            bottom = bottom.with_formatter(f);
        }

        let mut graph = LineGraph::from_parts(backend, controls, left, bottom);
        if let Some(rect) = self.display_rect {
            let (w, h) = graph.backend.surface_size();
            graph.viewport = Some(Viewport::new(rect, w, h)?);
        }
        for line in self.lines {
            graph.add_line(line)?;
        }
        Ok(graph)
    }
}
