use indexmap::IndexMap;

use crate::{
    axis::{AxisDecorator, AxisKind},
    backend::DrawBackend,
    controls::ChartControls,
    error::ChartError,
    geometry::GeometryCache,
    interaction::PanState,
    line::{Line, LineId},
    marker::{Marker, MarkerId},
    point::Rect,
    viewport::Viewport,
};

/// An interactive line chart rendering through a [`DrawBackend`].
///
/// Owns the lines and markers, the viewport, the geometry cache and both axis
/// decorators. All mutation goes through `&mut self`, so a chart is driven
/// from a single thread.
pub struct LineGraph<B: DrawBackend> {
    pub(crate) backend: B,
    // Data
    pub(crate) lines: IndexMap<LineId, Line>,
    pub(crate) markers: IndexMap<MarkerId, Box<dyn Marker>>,
    next_id: u64,
    // Render state
    pub(crate) cache: GeometryCache,
    pub(crate) viewport: Option<Viewport>,
    pub(crate) left_axis: AxisDecorator,
    pub(crate) bottom_axis: AxisDecorator,
    // Configuration / interaction
    pub(crate) controls: ChartControls,
    pub(crate) pan: PanState,
}

impl<B: DrawBackend> LineGraph<B> {
    /// Create a chart with default controls around `backend`.
    pub fn new(backend: B) -> Self {
        Self::from_parts(
            backend,
            ChartControls::default(),
            AxisDecorator::new(AxisKind::Vertical),
            AxisDecorator::new(AxisKind::Horizontal),
        )
    }

    pub(crate) fn from_parts(
        backend: B,
        controls: ChartControls,
        left_axis: AxisDecorator,
        bottom_axis: AxisDecorator,
    ) -> Self {
        Self {
            backend,
            lines: IndexMap::new(),
            markers: IndexMap::new(),
            next_id: 0,
            cache: GeometryCache::new(),
            viewport: None,
            left_axis,
            bottom_axis,
            controls,
            pan: PanState::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Current viewport.
    ///
    /// `None` until something needs one: a display rect, a frame, a line
    /// being added, or a pan or zoom step. All but the display rect create
    /// the default 100x100 view at the origin.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn controls(&self) -> &ChartControls {
        &self.controls
    }

    pub fn geometry_cache(&self) -> &GeometryCache {
        &self.cache
    }

    pub fn left_axis(&self) -> &AxisDecorator {
        &self.left_axis
    }

    pub fn bottom_axis(&self) -> &AxisDecorator {
        &self.bottom_axis
    }

    pub fn text_enabled(&self) -> bool {
        self.controls.show_tick_labels
    }

    pub fn set_text_enabled(&mut self, enabled: bool) {
        self.controls.show_tick_labels = enabled;
    }

    /// The viewport to build geometry against, creating the default one if
    /// nothing was displayed yet.
    pub(crate) fn viewport_or_default(&mut self) -> &mut Viewport {
        let (w, h) = self.backend.surface_size();
        self.viewport.get_or_insert_with(|| Viewport::with_window(w, h))
    }

    fn issue_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // Lines

    /// Register a line and compile its geometry right away.
    pub fn add_line(&mut self, line: Line) -> Result<LineId, ChartError> {
        let id = LineId(self.issue_id());
        let viewport = *self.viewport_or_default();
        self.cache.load(id, &line, &viewport, &mut self.backend)?;
        tracing::debug!("added {} with {} points", id, line.len());
        self.lines.insert(id, line);
        Ok(id)
    }

    /// Unregister a line, releasing its geometry.
    ///
    /// The geometry is released first; if that fails the line stays
    /// registered and is recompiled by the next frame.
    pub fn remove_line(&mut self, id: LineId) -> Result<Line, ChartError> {
        if !self.lines.contains_key(&id) {
            return Err(ChartError::UnknownLine(id));
        }
        self.cache.remove(id, &mut self.backend)?;
        let line = self
            .lines
            .shift_remove(&id)
            .ok_or(ChartError::UnknownLine(id))?;
        tracing::debug!("removed {}", id);
        Ok(line)
    }

    /// Drop every line and release all cached geometry.
    pub fn clear_lines(&mut self) -> Result<(), ChartError> {
        tracing::debug!("clearing {} lines", self.lines.len());
        self.lines.clear();
        self.cache.release_all(&mut self.backend)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Mutable access to a line. Changes made through [`Line`]'s notifying
    /// methods are picked up before the next frame.
    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.get_mut(&id)
    }

    /// Update a line by its id.
    pub fn update_line<F: FnOnce(&mut Line)>(&mut self, id: LineId, f: F) -> Result<(), ChartError> {
        let line = self.lines.get_mut(&id).ok_or(ChartError::UnknownLine(id))?;
        f(line);
        Ok(())
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines.iter().map(|(id, line)| (*id, line))
    }

    // Markers

    pub fn add_marker(&mut self, marker: impl Marker + 'static) -> MarkerId {
        let id = MarkerId(self.issue_id());
        self.markers.insert(id, Box::new(marker));
        tracing::debug!("added {}", id);
        id
    }

    /// Unregister a marker and dispose it.
    pub fn remove_marker(&mut self, id: MarkerId) -> Result<(), ChartError> {
        let mut marker = self
            .markers
            .shift_remove(&id)
            .ok_or(ChartError::UnknownMarker(id))?;
        tracing::debug!("removed {}", id);
        marker.dispose(&mut self.backend)
    }

    /// Dispose and drop every marker.
    pub fn clear_markers(&mut self) -> Result<(), ChartError> {
        let mut result = Ok(());
        for (_, mut marker) in self.markers.drain(..) {
            if let Err(e) = marker.dispose(&mut self.backend) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    // Viewport

    /// Show exactly `rect`, sized to the backend surface.
    ///
    /// Fails without touching the viewport when the surface has a zero
    /// dimension. A change of the data aspect ratio beyond
    /// [`ChartControls::aspect_tolerance`] schedules a full geometry rebuild.
    pub fn display(&mut self, rect: Rect, draw_now: bool) -> Result<(), ChartError> {
        let (width, height) = self.backend.surface_size();
        if width == 0 || height == 0 {
            return Err(ChartError::ZeroWindow { width, height });
        }
        rect.validate()?;

        let previous_ratio = self.viewport.as_ref().map(Viewport::aspect_ratio);
        let viewport = self.viewport_or_default();
        viewport.set_rect(rect)?;
        viewport.resize(width, height);
        let new_ratio = viewport.aspect_ratio();
        tracing::debug!(
            "display {:?} on {}x{} surface",
            rect,
            width,
            height
        );

        if let Some(previous) = previous_ratio {
            if (new_ratio - previous).abs() > self.controls.aspect_tolerance * previous.abs() {
                tracing::debug!(
                    "aspect ratio {} -> {}; scheduling full geometry rebuild",
                    previous,
                    new_ratio
                );
                self.cache.mark_full_rebuild();
            }
        }

        if draw_now {
            self.draw()?;
        }
        Ok(())
    }

    /// Release all cached geometry, label textures and markers.
    ///
    /// Lines stay registered; their geometry is rebuilt by the next frame.
    pub fn cleanup(&mut self) -> Result<(), ChartError> {
        tracing::debug!("cleanup");
        let results = [
            self.cache.release_all(&mut self.backend),
            self.left_axis.dispose(&mut self.backend),
            self.bottom_axis.dispose(&mut self.backend),
            self.clear_markers(),
        ];
        results.into_iter().collect()
    }
}
