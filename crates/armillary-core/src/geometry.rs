//! Plane geometry shared by layout, scene and export.
//!
//! Coordinates follow SVG: `x` grows to the right and `y` grows downwards.
//! Shape attributes are local to the group that owns them, and a node's
//! top-left corner is its local origin.

/// A position on the canvas, or an offset between two positions.
///
/// ```
/// # use armillary_core::geometry::Point;
/// let origin = Point::new(40.0, 60.0);
/// let moved = origin.add_point(Point::new(5.0, -10.0));
/// assert_eq!(moved, Point::new(45.0, 50.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// True for the canvas origin, or an offset that moves nothing
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }

    /// Component-wise sum.
    pub fn add_point(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Extent of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// True when neither dimension has extent
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned rectangle spanning from `min` (top-left) to `max` (bottom-right).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min: top_left,
            max: top_left.add_point(Point::new(size.width, size.height)),
        }
    }

    pub fn min_x(self) -> f32 {
        self.min.x
    }

    pub fn min_y(self) -> f32 {
        self.min.y
    }

    pub fn max_x(self) -> f32 {
        self.max.x
    }

    pub fn max_y(self) -> f32 {
        self.max.y
    }

    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    /// Top-left corner
    pub fn min_point(self) -> Point {
        self.min
    }

    /// Whether `point` lies inside or on the border.
    ///
    /// ```
    /// # use armillary_core::geometry::{Bounds, Point, Size};
    /// let row = Bounds::new_from_top_left(Point::new(0.0, 30.0), Size::new(250.0, 20.0));
    /// assert!(row.contains(Point::new(10.0, 40.0)));
    /// assert!(row.contains(Point::new(250.0, 50.0)));
    /// assert!(!row.contains(Point::new(10.0, 51.0)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// Smallest bounds covering both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Same rectangle shifted by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min: self.min.add_point(offset),
            max: self.max.add_point(offset),
        }
    }

    /// Grows every side outwards by `padding`.
    pub fn add_padding(&self, padding: f32) -> Self {
        Self {
            min: Point::new(self.min.x - padding, self.min.y - padding),
            max: Point::new(self.max.x + padding, self.max.y + padding),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..300.0, 1.0f32..300.0)
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    /// Every corner of either input lies inside the merge.
    fn check_merge_covers_inputs(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        for bounds in [a, b] {
            prop_assert!(merged.contains(bounds.min_point()));
            prop_assert!(merged.contains(Point::new(bounds.max_x(), bounds.max_y())));
        }
        Ok(())
    }

    /// Translation keeps the extent.
    fn check_translate_keeps_size(bounds: Bounds, dx: f32, dy: f32) -> Result<(), TestCaseError> {
        let moved = bounds.translate(Point::new(dx, dy));
        prop_assert!(approx_eq!(f32, moved.width(), bounds.width(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, moved.height(), bounds.height(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, moved.min_x(), bounds.min_x() + dx, epsilon = 0.001));
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_covers_inputs(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_covers_inputs(a, b)?;
        }

        #[test]
        fn translate_keeps_size(
            bounds in bounds_strategy(),
            dx in -500.0f32..500.0,
            dy in -500.0f32..500.0,
        ) {
            check_translate_keeps_size(bounds, dx, dy)?;
        }
    }
}
