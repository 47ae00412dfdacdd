//! An interactive 2D line chart surface.
//!
//! - Maps a data-space viewport onto a pixel surface with a fixed axis gutter
//! - Pan and zoom driven by host pointer events
//! - Adaptive tick density, grid cross-lines and cached tick labels
//! - Per-line compiled geometry, rebuilt only when a line's content changes
//!
//! Rendering goes through the [`DrawBackend`] trait; [`RecordingBackend`]
//! records frames without a GPU.
//!
//! Quick start:
//!
//! ```no_run
//! use linegraph::{Color, Line, LineGraph, RecordingBackend, Rect};
//!
//! let mut graph = LineGraph::new(RecordingBackend::new(800, 600));
//! graph
//!     .add_line(Line::new(1.0, Color::BLACK, [[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]))
//!     .unwrap();
//! graph.display(Rect::new(0.0, -2.0, 10.0, 4.0), true).unwrap();
//! ```
pub mod axis;
pub mod backend;
pub mod builder;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod line;
pub mod marker;
pub mod point;
pub mod ticks;
pub mod transform;
pub mod viewport;

pub(crate) mod chart;
pub(crate) mod interaction;
pub(crate) mod render;

// Iced re-exports.
pub use iced::Color;

// Re-exports of public types.
pub use axis::{AxisDecorator, AxisKind};
pub use backend::recording::{DrawCommand, RecordingBackend};
pub use backend::{DrawBackend, GeometryHandle, Primitive, Texture, TextureHandle, TextureImage};
pub use builder::LineGraphBuilder;
pub use chart::LineGraph;
pub use controls::{ChartControls, PanControls, ZoomControls};
pub use error::ChartError;
pub use geometry::{CompiledGeometry, GeometryCache, LineGeometry, Vertex};
pub use line::{Line, LineId};
pub use marker::{DotMarker, Marker, MarkerId, TextureMarker};
pub use point::{Point, Rect};
pub use ticks::{Tick, TickDensity, TickFormatter, TickWeight};
pub use transform::{Transform, data_to_screen, screen_to_data};
pub use viewport::{GUTTER_PX, Viewport};
