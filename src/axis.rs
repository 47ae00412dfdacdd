//! Axis bands: background, tick marks, tick labels and grid cross-lines.
//!
//! The vertical decorator mirrors the horizontal one with the coordinates
//! swapped. Positions below are written as (along, across) pairs, where
//! "along" runs with the axis and "across" runs through its gutter.
use std::{collections::HashMap, sync::Arc};

use crate::{
    Color,
    backend::{self, DrawBackend, Primitive, Texture},
    error::ChartError,
    point::{Point, Rect},
    ticks::{self, Tick, TickDensity, TickFormatter, TickWeight},
    transform::Transform,
    viewport::{GUTTER_PX, Viewport},
};

const MAJOR_TICK_LENGTH_PX: f64 = 20.0;
const MINOR_TICK_LENGTH_PX: f64 = 10.0;
/// Labels are nudged back so they sit roughly centered on their tick.
const LABEL_OFFSET_PX: f64 = 5.0;
const CROSS_LINE_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.25,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Runs along the bottom edge, ticks at x values.
    Horizontal,
    /// Runs along the left edge, ticks at y values.
    Vertical,
}

impl AxisKind {
    fn point(self, along: f64, across: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(along, across),
            Self::Vertical => Point::new(across, along),
        }
    }

    fn data_start(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Horizontal => viewport.start(),
            Self::Vertical => viewport.bottom(),
        }
    }

    fn data_stop(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Horizontal => viewport.finish(),
            Self::Vertical => viewport.top(),
        }
    }

    fn data_extent(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Horizontal => viewport.data_width(),
            Self::Vertical => viewport.data_height(),
        }
    }

    fn window_along(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Horizontal => viewport.window_width() as f64,
            Self::Vertical => viewport.window_height() as f64,
        }
    }

    fn window_across(self, viewport: &Viewport) -> f64 {
        match self {
            Self::Horizontal => viewport.window_height() as f64,
            Self::Vertical => viewport.window_width() as f64,
        }
    }

    /// Pixel space moved past the other axis' gutter.
    fn past_gutter(self, viewport: &Viewport) -> Transform {
        match self {
            Self::Horizontal => Transform::pixels_past_gutter_x(viewport),
            Self::Vertical => Transform::pixels_past_gutter_y(viewport),
        }
    }

    /// Data units along the axis, pixels across it shifted by `across_px`.
    fn data_along(self, viewport: &Viewport, across_px: f64) -> Transform {
        let origin = viewport.data_origin();
        match self {
            Self::Horizontal => Transform::scale(
                1.0 / viewport.data_width(),
                1.0 / viewport.window_height() as f64,
            )
            .then(Transform::translate(-origin.x, across_px)),
            Self::Vertical => Transform::scale(
                1.0 / viewport.window_width() as f64,
                1.0 / viewport.data_height(),
            )
            .then(Transform::translate(across_px, -origin.y)),
        }
    }

    fn label_shift(self) -> Transform {
        let p = self.point(GUTTER_PX, 0.0);
        Transform::translate(p.x, p.y)
    }
}

/// Draws one axis of the chart.
///
/// Label textures are cached per formatted string and reused across frames
/// until [`AxisDecorator::dispose`].
pub struct AxisDecorator {
    kind: AxisKind,
    density: TickDensity,
    tick_origin: f64,
    range_start: f64,
    range_stop: f64,
    formatter: TickFormatter,
    labels: HashMap<String, Texture>,
}

impl core::fmt::Debug for AxisDecorator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisDecorator")
            .field("kind", &self.kind)
            .field("density", &self.density)
            .field("tick_origin", &self.tick_origin)
            .field("range_start", &self.range_start)
            .field("range_stop", &self.range_stop)
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl AxisDecorator {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            density: TickDensity::default(),
            tick_origin: 0.0,
            range_start: 0.0,
            range_stop: 0.0,
            formatter: Arc::new(ticks::default_formatter),
            labels: HashMap::new(),
        }
    }

    pub fn with_formatter(mut self, formatter: TickFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn density(&self) -> TickDensity {
        self.density
    }

    /// `(range_start, range_stop)` used for tick placement.
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_stop)
    }

    /// Number of cached label textures.
    pub fn cached_labels(&self) -> usize {
        self.labels.len()
    }

    /// Recompute density and range from the current viewport.
    pub fn configure(&mut self, viewport: &Viewport) {
        self.density = TickDensity::for_extent(self.kind.data_extent(viewport));
        self.tick_origin = 0.0;
        self.range_start = self.kind.data_start(viewport).floor();
        self.range_stop = self.kind.data_stop(viewport).ceil();
    }

    pub fn major_ticks(&self) -> Vec<f64> {
        ticks::find_ticks(self.density.major, self.range_start, self.range_stop)
    }

    /// Minor ticks with the ones under a major tick removed.
    pub fn minor_ticks(&self) -> Vec<f64> {
        ticks::minor_ticks(
            self.density.minor,
            &self.major_ticks(),
            self.range_start,
            self.range_stop,
        )
    }

    /// Full-length grid lines at each major tick, beneath the chart content.
    pub fn draw_cross_lines<B: DrawBackend + ?Sized>(&self, viewport: &Viewport, backend: &mut B) {
        let kind = self.kind;
        let transform = kind
            .past_gutter(viewport)
            .then(kind.data_along(viewport, GUTTER_PX));
        let across = kind.window_across(viewport);
        let majors = self.major_ticks();

        backend.set_color(CROSS_LINE_COLOR);
        backend::without_smoothing(backend, |b| {
            backend::batch(
                b,
                Primitive::Lines,
                transform,
                majors.iter().flat_map(|&tick| {
                    let at = self.tick_origin + tick;
                    [kind.point(at, 0.0), kind.point(at, across)]
                }),
            );
        });
    }

    /// Band background, tick marks and tick labels, on top of the content.
    pub fn draw_ticks<B: DrawBackend + ?Sized>(
        &mut self,
        viewport: &Viewport,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        self.draw_background(viewport, backend);
        self.draw_tick_marks(viewport, backend);
        self.draw_labels(viewport, backend)
    }

    fn draw_background<B: DrawBackend + ?Sized>(&self, viewport: &Viewport, backend: &mut B) {
        let kind = self.kind;
        let along = kind.window_along(viewport);
        let transform = Transform::pixels(viewport);

        backend::without_smoothing(backend, |b| {
            b.set_color(Color::WHITE);
            backend::batch(
                b,
                Primitive::Quads,
                transform,
                [
                    kind.point(0.0, GUTTER_PX),
                    kind.point(along, GUTTER_PX),
                    kind.point(along, 0.0),
                    kind.point(0.0, 0.0),
                ],
            );

            b.set_color(Color::BLACK);
            backend::batch(
                b,
                Primitive::Lines,
                transform,
                [kind.point(GUTTER_PX, GUTTER_PX), kind.point(along, GUTTER_PX)],
            );
        });
    }

    fn draw_tick_marks<B: DrawBackend + ?Sized>(&self, viewport: &Viewport, backend: &mut B) {
        let kind = self.kind;
        let transform = kind.past_gutter(viewport).then(kind.data_along(viewport, 0.0));
        let ticks = self.density.ticks(self.range_start, self.range_stop);

        backend.set_color(Color::BLACK);
        backend::without_smoothing(backend, |b| {
            backend::batch(
                b,
                Primitive::Lines,
                transform,
                ticks.iter().flat_map(|tick| {
                    let at = self.tick_origin + tick.value;
                    let length = match tick.weight {
                        TickWeight::Major => MAJOR_TICK_LENGTH_PX,
                        TickWeight::Minor => MINOR_TICK_LENGTH_PX,
                    };
                    [kind.point(at, GUTTER_PX), kind.point(at, GUTTER_PX - length)]
                }),
            );
        });
    }

    fn draw_labels<B: DrawBackend + ?Sized>(
        &mut self,
        viewport: &Viewport,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        let kind = self.kind;
        let transform = Transform::pixels(viewport).then(kind.label_shift());
        let start = kind.data_start(viewport);
        let extent = kind.data_extent(viewport);
        let along_px = kind.window_along(viewport);

        for value in self.major_ticks() {
            let text = (self.formatter)(Tick::new(value, self.density.major, TickWeight::Major));
            let texture = match self.labels.get(&text) {
                Some(texture) => *texture,
                None => {
                    let texture = backend.rasterize_text(&text)?;
                    self.labels.insert(text, texture);
                    texture
                }
            };
            let at = (value - start) / extent * along_px - LABEL_OFFSET_PX;
            let origin = kind.point(at, 0.0);
            let quad = Rect {
                origin,
                width: texture.width as f64,
                height: texture.height as f64,
            };
            backend.draw_texture(texture.handle, quad, transform)?;
        }
        Ok(())
    }

    /// Release every cached label texture.
    pub fn dispose<B: DrawBackend + ?Sized>(&mut self, backend: &mut B) -> Result<(), ChartError> {
        let mut result = Ok(());
        for (_, texture) in self.labels.drain() {
            if let Err(e) = backend.release_texture(texture.handle) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}
