//! Visual style of the component node.
//!
//! [`ComponentStyle`] is an immutable value combining the layout [`Metrics`]
//! with a [`Palette`]. The defaults are the fixed design constants of the
//! component template; configuration can override individual entries.

use armillary_core::{color::Color, semantic::PortCategory};

use crate::layout::Metrics;

/// Colors used by the component template.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stroke: Color,
    header_fill: Color,
    header_text: Color,
    space_fill: Color,
    port_text: Color,
    in_fill: Color,
    out_fill: Color,
    out_in_fill: Color,
}

fn palette_color(css: &str) -> Color {
    Color::new(css).expect("palette defaults are valid CSS colors")
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            stroke: palette_color("#000"),
            header_fill: palette_color("#2196f3"),
            header_text: palette_color("#fff"),
            space_fill: palette_color("#fff"),
            port_text: palette_color("#000"),
            in_fill: palette_color("#fcac64"),
            out_fill: palette_color("#c59def"),
            out_in_fill: palette_color("#00eb81"),
        }
    }
}

impl Palette {
    /// Container border color
    pub fn stroke(&self) -> Color {
        self.stroke
    }

    pub fn header_fill(&self) -> Color {
        self.header_fill
    }

    pub fn header_text(&self) -> Color {
        self.header_text
    }

    /// Fill of the spacers above and below the port rows
    pub fn space_fill(&self) -> Color {
        self.space_fill
    }

    pub fn port_text(&self) -> Color {
        self.port_text
    }

    /// Row background for the given port category.
    pub fn port_fill(&self, category: PortCategory) -> Color {
        match category {
            PortCategory::In => self.in_fill,
            PortCategory::Out => self.out_fill,
            PortCategory::OutIn => self.out_in_fill,
        }
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = color;
        self
    }

    pub fn with_header_fill(mut self, color: Color) -> Self {
        self.header_fill = color;
        self
    }

    pub fn with_header_text(mut self, color: Color) -> Self {
        self.header_text = color;
        self
    }

    pub fn with_space_fill(mut self, color: Color) -> Self {
        self.space_fill = color;
        self
    }

    pub fn with_port_text(mut self, color: Color) -> Self {
        self.port_text = color;
        self
    }

    pub fn with_port_fill(mut self, category: PortCategory, color: Color) -> Self {
        match category {
            PortCategory::In => self.in_fill = color,
            PortCategory::Out => self.out_fill = color,
            PortCategory::OutIn => self.out_in_fill = color,
        }
        self
    }
}

/// Everything the shape builder and layout engine read.
///
/// # Examples
///
/// ```
/// # use armillary::style::ComponentStyle;
/// let style = ComponentStyle::default();
/// assert_eq!(style.metrics().width(), 250.0);
/// assert!(!style.allow_missing_ports());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentStyle {
    metrics: Metrics,
    palette: Palette,
    allow_missing_ports: bool,
}

impl ComponentStyle {
    pub fn new(metrics: Metrics, palette: Palette) -> Self {
        Self {
            metrics,
            palette,
            allow_missing_ports: false,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether an absent port list is drawn as an empty one instead of failing.
    pub fn allow_missing_ports(&self) -> bool {
        self.allow_missing_ports
    }

    pub fn with_allow_missing_ports(mut self, allow: bool) -> Self {
        self.allow_missing_ports = allow;
        self
    }
}
