use core::fmt;

use crate::{Color, error::ChartError, point::Point};

/// Registry key of a line in a [`crate::LineGraph`].
///
/// Issued on insertion, so two lines with identical content are still
/// distinct cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub(crate) u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({})", self.0)
    }
}

/// A polyline drawn in data space.
///
/// Content changes bump [`Line::version`]; the chart compares it against the
/// version its cached geometry was built from and rebuilds before the next
/// frame. Mutations made with `notify = false` leave the version untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    thickness: f32,
    color: Color,
    points: Vec<Point>,
    dynamic: bool,
    version: u64,
}

impl Line {
    pub fn new<P: Into<Point>>(
        thickness: f32,
        color: Color,
        points: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            thickness,
            color,
            points: points.into_iter().map(Into::into).collect(),
            dynamic: false,
            version: 0,
        }
    }

    /// Mark the line as growing over time (streaming data).
    ///
    /// Dynamic lines only compile the points from the first visible one on.
    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Content version; changes whenever cached geometry must be rebuilt.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The color is applied at draw time, so changing it never rebuilds.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness;
        self.notify_changed();
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
        self.notify_changed();
    }

    pub fn add_point(&mut self, point: impl Into<Point>, notify: bool) {
        self.points.push(point.into());
        if notify {
            self.notify_changed();
        }
    }

    /// Append a batch of points with a single change notification.
    pub fn extend_points<P: Into<Point>>(&mut self, points: impl IntoIterator<Item = P>) {
        self.points.extend(points.into_iter().map(Into::into));
        self.notify_changed();
    }

    pub fn remove_point(&mut self, index: usize, notify: bool) -> Result<Point, ChartError> {
        if index >= self.points.len() {
            return Err(ChartError::PointIndex {
                index,
                len: self.points.len(),
            });
        }
        let removed = self.points.remove(index);
        if notify {
            self.notify_changed();
        }
        Ok(removed)
    }

    /// Flag the content as changed, e.g. after silent mutations.
    pub fn notify_changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
