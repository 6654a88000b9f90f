//! Fundamental geometric types for placed pieces.
//!
//! All lengths are in inches. The vertical axis is Y; a piece's position records
//! the elevation of its bottom face and the centre of its horizontal footprint.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Position of a piece in inches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Centre of the footprint along the X axis.
    pub x: f64,
    /// Elevation of the bottom face.
    pub y: f64,
    /// Centre of the footprint along the Z axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Outer extents of a piece in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along X. Cylinders treat this as the diameter.
    pub width: f64,
    /// Extent along Y.
    pub height: f64,
    /// Extent along Z.
    pub depth: f64,
}

impl Dimensions {
    /// Create [`Dimensions`] with explicit extents.
    #[must_use]
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Convert the extents into an algebraic vector ordered width, height, depth.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.depth)
    }

    /// Horizontal footprint area in square inches.
    #[must_use]
    pub fn footprint_area(self) -> f64 {
        self.width * self.depth
    }

    /// Shrink every extent by `wall` on both sides, never below zero.
    #[must_use]
    pub fn inset(self, wall: f64) -> Self {
        self.to_vector().map(|extent| (extent - 2.0 * wall).max(0.0)).into()
    }
}

impl From<Vector3<f64>> for Dimensions {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Closed interval along one horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Span {
    /// Interval of length `extent` centred on `center`.
    #[must_use]
    pub fn centered(center: f64, extent: f64) -> Self {
        Self {
            min: center - extent / 2.0,
            max: center + extent / 2.0,
        }
    }

    /// Shared interval of two spans, if they intersect at all.
    #[must_use]
    pub fn intersect(self, other: Span) -> Option<Span> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (max > min).then_some(Span { min, max })
    }

    /// Length of the interval.
    #[must_use]
    pub fn length(self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn midpoint(self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Rectangle shared by two footprints when viewed from above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintOverlap {
    /// Overlap along the X axis.
    pub x: Span,
    /// Overlap along the Z axis.
    pub z: Span,
}

impl FootprintOverlap {
    /// Compute the overlap of two footprints given their positions and extents.
    ///
    /// # Examples
    /// ```
    /// use cattree::{Dimensions, FootprintOverlap, Point};
    ///
    /// let overlap = FootprintOverlap::between(
    ///     (Point::new(0.0, 0.0, 0.0), Dimensions::new(12.0, 1.0, 12.0)),
    ///     (Point::new(6.0, 1.0, 0.0), Dimensions::new(12.0, 1.0, 12.0)),
    /// )
    /// .expect("footprints intersect");
    /// assert_eq!(overlap.area(), 72.0);
    /// ```
    #[must_use]
    pub fn between(a: (Point, Dimensions), b: (Point, Dimensions)) -> Option<Self> {
        let (a_pos, a_dim) = a;
        let (b_pos, b_dim) = b;
        let x = Span::centered(a_pos.x, a_dim.width)
            .intersect(Span::centered(b_pos.x, b_dim.width))?;
        let z = Span::centered(a_pos.z, a_dim.depth)
            .intersect(Span::centered(b_pos.z, b_dim.depth))?;
        Some(Self { x, z })
    }

    /// Overlap area in square inches.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.x.length() * self.z.length()
    }

    /// Centre of the shared rectangle as `(x, z)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x.midpoint(), self.z.midpoint())
    }

    /// Whether both horizontal overlaps reach `minimum` inches.
    #[must_use]
    pub fn spans_at_least(&self, minimum: f64) -> bool {
        self.x.length() >= minimum && self.z.length() >= minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_from_vector() {
        let point = Point::from(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(point, Point::new(1.0, 2.0, 3.0));
        assert_eq!(point.to_vector(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn inset_clamps_each_extent_at_zero() {
        let inner = Dimensions::new(10.0, 1.0, 4.0).inset(0.75);
        assert_eq!(inner, Dimensions::new(8.5, 0.0, 2.5));
    }

    #[test]
    fn disjoint_footprints_do_not_overlap() {
        let a = (Point::new(0.0, 0.0, 0.0), Dimensions::new(4.0, 1.0, 4.0));
        let b = (Point::new(10.0, 0.0, 0.0), Dimensions::new(4.0, 1.0, 4.0));
        assert!(FootprintOverlap::between(a, b).is_none());
    }

    #[test]
    fn partial_overlap_reports_center_and_spans() {
        let a = (Point::new(0.0, 0.0, 0.0), Dimensions::new(10.0, 1.0, 10.0));
        let b = (Point::new(8.0, 1.0, 0.0), Dimensions::new(10.0, 1.0, 4.0));
        let overlap = FootprintOverlap::between(a, b).expect("footprints intersect");
        assert_eq!(overlap.x.length(), 2.0);
        assert_eq!(overlap.z.length(), 4.0);
        assert_eq!(overlap.center(), (4.0, 0.0));
        assert!(overlap.spans_at_least(2.0));
        assert!(!overlap.spans_at_least(2.5));
    }
}
