//! Compiled per-line geometry and the cache that owns it.
use indexmap::IndexMap;

use crate::{
    backend::{DrawBackend, GeometryHandle},
    error::ChartError,
    line::{Line, LineId},
    point::Point,
    transform::Transform,
    viewport::Viewport,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// A line-strip vertex in data coordinates.
pub struct Vertex {
    pub position: [f64; 2],
}

impl From<Point> for Vertex {
    fn from(p: Point) -> Self {
        Self {
            position: [p.x, p.y],
        }
    }
}

/// Index of the first point strictly inside the viewport's x-range.
pub fn visible_start(points: &[Point], viewport: &Viewport) -> Option<usize> {
    let (start, finish) = (viewport.start(), viewport.finish());
    points.iter().position(|p| p.x > start && p.x < finish)
}

/// Vertex data for one line, ready to hand to a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    vertices: Vec<Vertex>,
    thickness: f32,
}

impl LineGeometry {
    /// Static lines keep every point in order. Dynamic lines start at the
    /// first point inside the visible x-range and keep everything after it;
    /// the far end is never clipped so that continuous panning shows no gap.
    pub fn build(line: &Line, viewport: &Viewport) -> Self {
        let points = line.points();
        let from = if line.is_dynamic() {
            visible_start(points, viewport).unwrap_or(points.len())
        } else {
            0
        };
        Self {
            vertices: points[from..].iter().copied().map(Vertex::from).collect(),
            thickness: line.thickness(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Raw vertex bytes for upload into a GPU buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// A cache entry: the backend handle for one line's compiled geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledGeometry {
    line: LineId,
    handle: GeometryHandle,
    vertex_count: usize,
    thickness: f32,
    generation: u64,
    released: bool,
}

impl CompiledGeometry {
    fn compile<B: DrawBackend + ?Sized>(
        id: LineId,
        line: &Line,
        viewport: &Viewport,
        backend: &mut B,
    ) -> Result<Self, ChartError> {
        let geometry = LineGeometry::build(line, viewport);
        let handle = backend.compile_geometry(&geometry)?;
        tracing::trace!(
            "compiled {} into {} ({} vertices, generation {})",
            id,
            handle,
            geometry.vertices().len(),
            line.version()
        );
        Ok(Self {
            line: id,
            handle,
            vertex_count: geometry.vertices().len(),
            thickness: geometry.thickness(),
            generation: line.version(),
            released: false,
        })
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    pub fn handle(&self) -> GeometryHandle {
        self.handle
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Line version this geometry was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub(crate) fn draw<B: DrawBackend + ?Sized>(
        &self,
        backend: &mut B,
        transform: Transform,
    ) -> Result<(), ChartError> {
        if self.released {
            return Err(ChartError::Disposed {
                resource: "compiled geometry",
            });
        }
        backend.set_line_width(self.thickness);
        backend.draw_geometry(self.handle, transform)?;
        backend.set_line_width(1.0);
        Ok(())
    }

    pub(crate) fn release<B: DrawBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        if self.released {
            return Err(ChartError::Disposed {
                resource: "compiled geometry",
            });
        }
        backend.release_geometry(self.handle)?;
        self.released = true;
        Ok(())
    }
}

/// Compiled geometry for every line, keyed by [`LineId`].
///
/// Entries are rebuilt whole, never patched: when a line's version moves on,
/// its old handle is released first and a new one compiled in its place.
#[derive(Debug, Default)]
pub struct GeometryCache {
    entries: IndexMap<LineId, CompiledGeometry>,
    needs_full_rebuild: bool,
    rebuilds: u64,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: LineId) -> Option<&CompiledGeometry> {
        self.entries.get(&id)
    }

    /// Number of entries compiled over the cache's lifetime.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// True when the next frame regenerates every entry.
    pub fn needs_full_rebuild(&self) -> bool {
        self.needs_full_rebuild
    }

    pub(crate) fn mark_full_rebuild(&mut self) {
        self.needs_full_rebuild = true;
    }

    /// (Re)compile one line, releasing its previous geometry first.
    pub(crate) fn load<B: DrawBackend + ?Sized>(
        &mut self,
        id: LineId,
        line: &Line,
        viewport: &Viewport,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        if let Some(old) = self.entries.get_mut(&id) {
            if !old.is_released() {
                old.release(backend)?;
            }
        }
        let compiled = CompiledGeometry::compile(id, line, viewport, backend)?;
        // Replacing in place keeps the entry's position.
        self.entries.insert(id, compiled);
        self.rebuilds += 1;
        Ok(())
    }

    pub(crate) fn remove<B: DrawBackend + ?Sized>(
        &mut self,
        id: LineId,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        match self.entries.shift_remove(&id) {
            Some(mut entry) if !entry.is_released() => entry.release(backend),
            _ => Ok(()),
        }
    }

    /// Release every entry and empty the cache.
    ///
    /// All entries are dropped even if a release fails; the first error is
    /// returned.
    pub(crate) fn release_all<B: DrawBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        let mut result = Ok(());
        for (_, mut entry) in self.entries.drain(..) {
            if entry.is_released() {
                continue;
            }
            if let Err(e) = entry.release(backend) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    /// Regenerate every entry from scratch.
    pub(crate) fn rebuild_all<B: DrawBackend + ?Sized>(
        &mut self,
        lines: &IndexMap<LineId, Line>,
        viewport: &Viewport,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        tracing::debug!("rebuilding geometry for {} lines", lines.len());
        self.needs_full_rebuild = false;
        self.release_all(backend)?;
        for (&id, line) in lines {
            self.load(id, line, viewport, backend)?;
        }
        Ok(())
    }

    /// Bring the cache in line with the registry: pending full rebuilds,
    /// missing entries, and lines whose version moved on. Returns the number
    /// of entries compiled.
    pub(crate) fn sync<B: DrawBackend + ?Sized>(
        &mut self,
        lines: &IndexMap<LineId, Line>,
        viewport: &Viewport,
        backend: &mut B,
    ) -> Result<usize, ChartError> {
        let before = self.rebuilds;
        if self.needs_full_rebuild {
            self.rebuild_all(lines, viewport, backend)?;
        } else {
            for (&id, line) in lines {
                let stale = self
                    .entries
                    .get(&id)
                    .is_none_or(|e| e.is_released() || e.generation != line.version());
                if stale {
                    self.load(id, line, viewport, backend)?;
                }
            }
        }
        Ok((self.rebuilds - before) as usize)
    }

    /// Draw every line in registry order, each preceded by its color.
    pub(crate) fn draw<B: DrawBackend + ?Sized>(
        &self,
        lines: &IndexMap<LineId, Line>,
        transform: Transform,
        backend: &mut B,
    ) -> Result<(), ChartError> {
        for (id, line) in lines {
            if let Some(entry) = self.entries.get(id) {
                backend.set_color(line.color());
                entry.draw(backend, transform)?;
            }
        }
        Ok(())
    }
}
