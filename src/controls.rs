//! Controls for user interaction with the chart.

/// Default floor for zooming in.
pub const DEFAULT_MIN_EXTENT: f64 = 1e-9;

/// Configures interaction and decoration behavior for [`crate::LineGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartControls {
    /// Controls how panning is performed.
    pub pan: PanControls,

    /// Controls how zooming is performed.
    pub zoom: ZoomControls,

    /// Draws the axis bands with tick marks and tick labels.
    pub show_tick_labels: bool,

    /// Relative change of the data aspect ratio above which a display rect
    /// forces every cached line geometry to be rebuilt.
    pub aspect_tolerance: f64,
}

/// Configures panning interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanControls {
    /// Enables panning by dragging with the left mouse button.
    pub drag_to_pan: bool,
}

/// Configures zoom interactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomControls {
    /// Enables zooming with the mouse wheel.
    pub scroll_to_zoom: bool,

    /// Percentage of the current extent added or removed per wheel step.
    /// Values above 100 are clamped; non-positive values disable zooming.
    pub step_percent: f64,

    /// Smallest data extent zooming in may reach. Non-positive values fall
    /// back to [`DEFAULT_MIN_EXTENT`].
    pub min_extent: f64,
}

impl Default for ChartControls {
    fn default() -> Self {
        Self {
            pan: PanControls::default(),
            zoom: ZoomControls::default(),
            show_tick_labels: true,
            aspect_tolerance: 0.01,
        }
    }
}

impl Default for PanControls {
    fn default() -> Self {
        Self { drag_to_pan: true }
    }
}

impl Default for ZoomControls {
    fn default() -> Self {
        Self {
            scroll_to_zoom: true,
            step_percent: 10.0,
            min_extent: DEFAULT_MIN_EXTENT,
        }
    }
}
