use glam::DVec2;

use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// A 2D coordinate.
///
/// Carries no unit tag: depending on context it lives in data space or in
/// pixel space, and the caller keeps track of which.
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<iced::Point> for Point {
    fn from(p: iced::Point) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A data-space window. `origin` is the bottom-left corner.
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Fails unless both extents are finite and strictly positive.
    pub(crate) fn validate(&self) -> Result<(), ChartError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ChartError::InvalidExtent {
                width: self.width,
                height: self.height,
            })
        }
    }
}
