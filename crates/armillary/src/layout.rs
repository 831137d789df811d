//! Layout engine for component nodes.
//!
//! Pure geometry: given how many ports of each category a node has, derive the
//! container height, where each category and each row starts, and where edges
//! may attach. Nothing here touches a surface or holds state.
//!
//! ```text
//!   0 ┌──────────────────────┐
//!     │ header               │ header_height
//!     ├──────────────────────┤
//!     │ spacer               │ space_height
//!     ├──────────────────────┤ ◄── in rows start
//!     │ in row × n_in        │ row_height each
//!     ├──────────────────────┤ ◄── out rows start
//!     │ out row × n_out      │
//!     ├──────────────────────┤ ◄── outIn rows start
//!     │ outIn row × n_out_in │
//!     ├──────────────────────┤
//!     │ spacer               │ space_height
//!   H └──────────────────────┘
//! ```
//!
//! Every operation is a method on [`Metrics`]. The `compute_*` free functions
//! use [`Metrics::default`].

mod anchor;

pub use anchor::{AnchorPoint, Side};

use log::trace;
use thiserror::Error;

use armillary_core::semantic::PortCategory;

/// Most port rows a single node may carry, summed over all categories.
pub const MAX_ROWS: usize = 1 << 16;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid input: {category} port count must be non-negative, got {count}")]
    InvalidInput { category: PortCategory, count: i64 },

    #[error("invalid input: {rows} port rows exceed the limit of {max}")]
    TooManyRows { rows: u128, max: usize },

    #[error("invalid metrics: {field} {requirement}")]
    InvalidMetric {
        field: &'static str,
        requirement: &'static str,
    },
}

/// Port counts per category, in drawing order.
///
/// Counts are signed so that callers passing a negative value get an
/// [`LayoutError::InvalidInput`] instead of a silently wrong box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortCounts {
    in_ports: i64,
    out_ports: i64,
    out_in_ports: i64,
}

impl PortCounts {
    pub fn new(in_ports: i64, out_ports: i64, out_in_ports: i64) -> Self {
        Self {
            in_ports,
            out_ports,
            out_in_ports,
        }
    }

    /// Builds counts from list lengths.
    pub fn from_lengths(in_ports: usize, out_ports: usize, out_in_ports: usize) -> Self {
        let to_count = |len: usize| i64::try_from(len).unwrap_or(i64::MAX);
        Self::new(to_count(in_ports), to_count(out_ports), to_count(out_in_ports))
    }

    pub fn get(self, category: PortCategory) -> i64 {
        match category {
            PortCategory::In => self.in_ports,
            PortCategory::Out => self.out_ports,
            PortCategory::OutIn => self.out_in_ports,
        }
    }

    /// Checks every count and returns them as unsigned row counts.
    ///
    /// The total is capped at [`MAX_ROWS`], so sums over the returned counts
    /// cannot overflow.
    pub fn validate(self) -> Result<[usize; 3], LayoutError> {
        let mut rows = [0usize; 3];
        for (slot, category) in rows.iter_mut().zip(PortCategory::ALL) {
            let count = self.get(category);
            *slot = usize::try_from(count)
                .map_err(|_| LayoutError::InvalidInput { category, count })?;
        }

        let total: u128 = rows.iter().map(|&count| count as u128).sum();
        if total > MAX_ROWS as u128 {
            return Err(LayoutError::TooManyRows {
                rows: total,
                max: MAX_ROWS,
            });
        }
        Ok(rows)
    }
}

/// Fixed sizes of the component template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    width: f32,
    header_height: f32,
    space_height: f32,
    row_height: f32,
    text_margin_left: f32,
    text_margin_top: f32,
    corner_radius: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            width: 250.0,
            header_height: 20.0,
            space_height: 10.0,
            row_height: 20.0,
            text_margin_left: 10.0,
            text_margin_top: 15.0,
            corner_radius: 6.0,
        }
    }
}

impl Metrics {
    /// Creates metrics with the given box sizes and default text placement.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidMetric`] for a negative or non-finite
    /// size, a zero `width` or `row_height`, or a zero `header_height` and
    /// `space_height` together. Any of those would stop the box from growing
    /// with its rows or collapse the anchors onto one height.
    pub fn new(
        width: f32,
        header_height: f32,
        space_height: f32,
        row_height: f32,
    ) -> Result<Self, LayoutError> {
        let sizes = [
            ("width", width),
            ("header_height", header_height),
            ("space_height", space_height),
            ("row_height", row_height),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidMetric {
                    field,
                    requirement: "must be a non-negative number",
                });
            }
        }
        for (field, value) in [("width", width), ("row_height", row_height)] {
            if value == 0.0 {
                return Err(LayoutError::InvalidMetric {
                    field,
                    requirement: "must be greater than zero",
                });
            }
        }
        if header_height + space_height == 0.0 {
            return Err(LayoutError::InvalidMetric {
                field: "header_height",
                requirement: "and space_height cannot both be zero",
            });
        }

        Ok(Self {
            width,
            header_height,
            space_height,
            row_height,
            ..Self::default()
        })
    }

    pub fn with_text_margins(mut self, left: f32, top: f32) -> Self {
        self.text_margin_left = left;
        self.text_margin_top = top;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn space_height(&self) -> f32 {
        self.space_height
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Horizontal inset of port labels and the header label
    pub fn text_margin_left(&self) -> f32 {
        self.text_margin_left
    }

    /// Baseline offset of text from the top of its row
    pub fn text_margin_top(&self) -> f32 {
        self.text_margin_top
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// Y coordinate where the first port row starts.
    fn rows_top(&self) -> f32 {
        self.header_height + self.space_height
    }

    fn height_for_rows(&self, rows: usize) -> f32 {
        self.header_height + 2.0 * self.space_height + rows as f32 * self.row_height
    }

    /// `header + 2 * space + rows * row`.
    pub fn container_height(&self, counts: PortCounts) -> Result<f32, LayoutError> {
        let rows: usize = counts.validate()?.iter().sum();
        Ok(self.height_for_rows(rows))
    }

    /// Y coordinate at which each category's rows begin.
    pub fn row_offsets(&self, counts: PortCounts) -> Result<CategoryOffsets, LayoutError> {
        let [n_in, n_out, _] = counts.validate()?;
        let in_start = self.rows_top();
        let out_start = in_start + n_in as f32 * self.row_height;
        let out_in_start = out_start + n_out as f32 * self.row_height;
        Ok(CategoryOffsets {
            starts: [in_start, out_start, out_in_start],
        })
    }

    /// Container height plus the top of every row in traversal order.
    pub fn layout(&self, counts: PortCounts) -> Result<LayoutResult, LayoutError> {
        let rows = counts.validate()?;
        let total: usize = rows.iter().sum();
        let category_offsets = self.row_offsets(counts)?;

        let row_offsets = PortCategory::ALL
            .into_iter()
            .zip(rows)
            .flat_map(|(category, count)| {
                let start = category_offsets.start(category);
                (0..count).map(move |index| start + index as f32 * self.row_height)
            })
            .collect();

        let result = LayoutResult {
            container_height: self.height_for_rows(total),
            category_offsets,
            row_offsets,
            row_height: self.row_height,
        };
        trace!(height = result.container_height, rows = total; "Computed component layout");
        Ok(result)
    }

    /// Upper limit every anchor's `normalized_y` stays at or below.
    ///
    /// This is the vertical center of the last row slot:
    /// `1 - space / H - (row / 2) / H`.
    pub fn anchor_upper_bound(&self, counts: PortCounts) -> Result<f32, LayoutError> {
        let height = self.container_height(counts)?;
        Ok(1.0 - self.space_height / height - (self.row_height / 2.0) / height)
    }
}

/// Start of each category's rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryOffsets {
    starts: [f32; 3],
}

impl CategoryOffsets {
    pub fn start(&self, category: PortCategory) -> f32 {
        match category {
            PortCategory::In => self.starts[0],
            PortCategory::Out => self.starts[1],
            PortCategory::OutIn => self.starts[2],
        }
    }

    /// Starts in drawing order.
    pub fn as_array(&self) -> [f32; 3] {
        self.starts
    }
}

/// Derived geometry of one node. Recomputed on every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    container_height: f32,
    category_offsets: CategoryOffsets,
    row_offsets: Vec<f32>,
    row_height: f32,
}

impl LayoutResult {
    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    pub fn category_offsets(&self) -> &CategoryOffsets {
        &self.category_offsets
    }

    /// Top of every row: all in rows, then out rows, then outIn rows.
    pub fn row_offsets(&self) -> &[f32] {
        &self.row_offsets
    }

    /// Top of row `index` within `category`.
    pub fn row_offset(&self, category: PortCategory, index: usize) -> f32 {
        self.category_offsets.start(category) + index as f32 * self.row_height
    }
}

/// [`Metrics::container_height`] with the default template sizes.
pub fn compute_container_height(counts: PortCounts) -> Result<f32, LayoutError> {
    Metrics::default().container_height(counts)
}

/// [`Metrics::row_offsets`] with the default template sizes.
pub fn compute_row_offsets(counts: PortCounts) -> Result<CategoryOffsets, LayoutError> {
    Metrics::default().row_offsets(counts)
}

/// [`Metrics::layout`] with the default template sizes.
pub fn compute_layout(counts: PortCounts) -> Result<LayoutResult, LayoutError> {
    Metrics::default().layout(counts)
}

/// [`Metrics::anchor_points`] with the default template sizes.
pub fn compute_anchor_points(counts: PortCounts) -> Result<Vec<AnchorPoint>, LayoutError> {
    Metrics::default().anchor_points(counts)
}
