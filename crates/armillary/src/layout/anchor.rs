//! Edge anchor points.
//!
//! Anchors are expressed relative to the node box: `x` is 0 on the left border
//! and 1 on the right, `y` runs from 0 at the top to 1 at the bottom. Each
//! anchor sits at the vertical center of its port row.

use log::trace;

use armillary_core::semantic::PortCategory;

use super::{LayoutError, Metrics, PortCounts};

/// Which border of the node an anchor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Normalized x coordinate of this border
    pub fn x(self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Right => 1.0,
        }
    }
}

/// A normalized attachment point on the node boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    side: Side,
    normalized_y: f32,
}

impl AnchorPoint {
    pub fn new(side: Side, normalized_y: f32) -> Self {
        Self { side, normalized_y }
    }

    pub fn side(self) -> Side {
        self.side
    }

    pub fn normalized_y(self) -> f32 {
        self.normalized_y
    }

    /// The anchor as an `[x, y]` ratio pair, the form host engines consume.
    pub fn to_ratio(self) -> [f32; 2] {
        [self.side.x(), self.normalized_y]
    }
}

impl Metrics {
    /// Anchors for every port, walking in, out, then outIn ports.
    ///
    /// In ports get a left anchor, out ports a right anchor, and each outIn
    /// port gets a left and a right anchor at the same height.
    ///
    /// # Examples
    ///
    /// ```
    /// # use armillary::layout::{Metrics, PortCounts, Side};
    /// let anchors = Metrics::default().anchor_points(PortCounts::new(1, 0, 1)).unwrap();
    /// assert_eq!(anchors.len(), 3);
    /// assert_eq!(anchors[1].side(), Side::Left);
    /// assert_eq!(anchors[2].side(), Side::Right);
    /// assert_eq!(anchors[1].normalized_y(), anchors[2].normalized_y());
    /// ```
    pub fn anchor_points(&self, counts: PortCounts) -> Result<Vec<AnchorPoint>, LayoutError> {
        let rows = counts.validate()?;
        let height = self.container_height(counts)?;
        let half_row = (self.row_height() / 2.0) / height;
        let start = (self.header_height() + self.space_height()) / height + half_row;
        let step = half_row * 2.0;

        let mut anchors = Vec::with_capacity(rows[0] + rows[1] + 2 * rows[2]);
        let mut processed = 0usize;
        for (category, count) in PortCategory::ALL.into_iter().zip(rows) {
            for _ in 0..count {
                let y = start + step * processed as f32;
                match category {
                    PortCategory::In => anchors.push(AnchorPoint::new(Side::Left, y)),
                    PortCategory::Out => anchors.push(AnchorPoint::new(Side::Right, y)),
                    PortCategory::OutIn => {
                        anchors.push(AnchorPoint::new(Side::Left, y));
                        anchors.push(AnchorPoint::new(Side::Right, y));
                    }
                }
                processed += 1;
            }
        }

        trace!(count = anchors.len(), height = height; "Computed anchor points");
        Ok(anchors)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::layout::compute_anchor_points;

    #[test]
    fn test_one_in_one_out() {
        let anchors = compute_anchor_points(PortCounts::new(1, 1, 0)).unwrap();
        assert_eq!(anchors.len(), 2);

        // H = 80: rows are centered at 40 and 60
        assert_eq!(anchors[0].side(), Side::Left);
        assert!(approx_eq!(f32, anchors[0].normalized_y(), 0.5));
        assert_eq!(anchors[1].side(), Side::Right);
        assert!(approx_eq!(f32, anchors[1].normalized_y(), 0.75));
    }

    #[test]
    fn test_zero_ports_have_no_anchors() {
        assert!(compute_anchor_points(PortCounts::default()).unwrap().is_empty());
    }

    #[test]
    fn test_out_in_pairs_share_height() {
        let anchors = compute_anchor_points(PortCounts::new(0, 0, 2)).unwrap();
        assert_eq!(anchors.len(), 4);
        assert_eq!(anchors[0].side(), Side::Left);
        assert_eq!(anchors[1].side(), Side::Right);
        assert_eq!(anchors[0].normalized_y(), anchors[1].normalized_y());
        assert_eq!(anchors[2].normalized_y(), anchors[3].normalized_y());
        assert!(anchors[2].normalized_y() > anchors[0].normalized_y());
    }

    #[test]
    fn test_last_anchor_reaches_upper_bound() {
        let metrics = Metrics::default();
        let counts = PortCounts::new(2, 1, 1);
        let anchors = metrics.anchor_points(counts).unwrap();
        let bound = metrics.anchor_upper_bound(counts).unwrap();

        let last = anchors.last().unwrap().normalized_y();
        assert!(approx_eq!(f32, last, bound, epsilon = 1e-6));
    }

    #[test]
    fn test_to_ratio() {
        assert_eq!(AnchorPoint::new(Side::Left, 0.25).to_ratio(), [0.0, 0.25]);
        assert_eq!(AnchorPoint::new(Side::Right, 0.5).to_ratio(), [1.0, 0.5]);
    }

    #[test]
    fn test_negative_counts_rejected() {
        assert!(compute_anchor_points(PortCounts::new(0, -1, 0)).is_err());
    }
}
