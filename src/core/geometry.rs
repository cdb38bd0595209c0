use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Point in screen space. The y axis grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Axis-aligned rectangle in screen space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ChartError::InvalidFrame {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn min_x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn max_x(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn min_y(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn max_y(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn mid_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn mid_y(self) -> f64 {
        self.y + self.height / 2.0
    }

    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Shrinks the rectangle by per-edge amounts. Width and height floor at zero.
    #[must_use]
    pub fn inset(self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }
}

/// Size of the axis-aligned bounding box of a rectangle after rotation.
///
/// Used to reserve layout space for rotated axis labels.
#[must_use]
pub fn bounding_size_after_rotation(size: ScreenSize, degrees: f64) -> ScreenSize {
    if degrees == 0.0 {
        return size;
    }
    let radians = degrees.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    ScreenSize::new(
        size.width * cos + size.height * sin,
        size.width * sin + size.height * cos,
    )
}

#[cfg(test)]
mod tests {
    use super::{ScreenPoint, ScreenRect, ScreenSize, bounding_size_after_rotation};

    #[test]
    fn rect_inset_floors_at_zero() {
        let rect = ScreenRect::new(0.0, 0.0, 100.0, 50.0);
        let inset = rect.inset(60.0, 0.0, 60.0, 0.0);
        assert_eq!(inset.width, 0.0);
        assert_eq!(inset.height, 50.0);
    }

    #[test]
    fn rect_validate_rejects_degenerate_frames() {
        assert!(ScreenRect::new(0.0, 0.0, 0.0, 10.0).validate().is_err());
        assert!(ScreenRect::new(0.0, 0.0, 10.0, f64::NAN).validate().is_err());
        assert!(ScreenRect::new(0.0, 0.0, 10.0, 10.0).validate().is_ok());
    }

    #[test]
    fn rotated_bounds_quarter_turn_swaps_dimensions() {
        let rotated = bounding_size_after_rotation(ScreenSize::new(40.0, 10.0), 90.0);
        assert!((rotated.width - 10.0).abs() <= 1e-9);
        assert!((rotated.height - 40.0).abs() <= 1e-9);
    }

    #[test]
    fn point_distance_is_euclidean() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() <= 1e-12);
    }
}
