use thiserror::Error;

use crate::{line::LineId, marker::MarkerId};

/// Errors raised by the chart.
///
/// Zero-sized surfaces and invalid extents are usage errors of the host.
/// `Disposed` and `UnknownHandle` signal misuse of a released resource.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error(
        "window size {width}x{height} has a zero dimension; size the surface before the first display"
    )]
    ZeroWindow { width: u32, height: u32 },

    #[error("data extent {width}x{height} must be finite and strictly positive")]
    InvalidExtent { width: f64, height: f64 },

    #[error("{resource} was already released")]
    Disposed { resource: &'static str },

    #[error("{resource} handle {id} is not live in this backend")]
    UnknownHandle { resource: &'static str, id: u64 },

    #[error("no line registered as {0}")]
    UnknownLine(LineId),

    #[error("no marker registered as {0}")]
    UnknownMarker(MarkerId),

    #[error("point index {index} out of range for line of {len} points")]
    PointIndex { index: usize, len: usize },
}
