//! Configuration types for Armillary graphs.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field is optional; unset fields fall back to the built-in
//! component template.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and graph settings.
//! - [`StyleConfig`] - Overrides of the component metrics and palette.
//! - [`GraphConfig`] - Graph construction options and export framing.
//!
//! # Example
//!
//! ```
//! # use armillary::config::AppConfig;
//! let config: AppConfig = toml::from_str(r##"
//!     [style]
//!     header_fill = "#333"
//!     row_height = 24
//!
//!     [graph]
//!     fit_view = false
//! "##).unwrap();
//!
//! let style = config.style().component_style().unwrap();
//! assert_eq!(style.metrics().row_height(), 24.0);
//! assert!(!config.graph().graph_options().unwrap().fit_view());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use armillary_core::{color::Color, semantic::PortCategory};

use crate::{
    export::svg::DEFAULT_PADDING,
    graph::{Behavior, GraphOptions},
    layout::Metrics,
    style::{ComponentStyle, Palette},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Graph configuration section.
    #[serde(default)]
    graph: GraphConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(style: StyleConfig, graph: GraphConfig) -> Self {
        Self { style, graph }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the graph configuration.
    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }
}

/// Overrides of the component template.
///
/// Colors are CSS color strings. They are validated when the style is built,
/// not when the file is read.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    header_height: Option<f32>,
    #[serde(default)]
    space_height: Option<f32>,
    #[serde(default)]
    row_height: Option<f32>,
    #[serde(default)]
    text_margin_left: Option<f32>,
    #[serde(default)]
    text_margin_top: Option<f32>,
    #[serde(default)]
    corner_radius: Option<f32>,

    #[serde(default)]
    stroke: Option<String>,
    #[serde(default)]
    header_fill: Option<String>,
    #[serde(default)]
    header_text: Option<String>,
    #[serde(default)]
    space_fill: Option<String>,
    #[serde(default)]
    port_text: Option<String>,
    #[serde(default)]
    in_fill: Option<String>,
    #[serde(default)]
    out_fill: Option<String>,
    #[serde(default)]
    out_in_fill: Option<String>,

    /// Draw a missing port list as empty instead of failing the node.
    #[serde(default)]
    allow_missing_ports: bool,

    /// Background [`Color`] of exported documents, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

fn parse_color(field: &str, value: Option<&String>) -> Result<Option<Color>, String> {
    value
        .map(|color| Color::new(color))
        .transpose()
        .map_err(|err| format!("Invalid {field} in config: {err}"))
}

fn check_dimension(field: &str, value: f32) -> Result<f32, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("Invalid {field} in config: expected a non-negative number, got {value}"))
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background color", self.background_color.as_ref())
    }

    pub fn allow_missing_ports(&self) -> bool {
        self.allow_missing_ports
    }

    /// Layout metrics with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite dimensions, a zero width or
    /// row height, or a zero header and spacer together.
    pub fn metrics(&self) -> Result<Metrics, String> {
        let defaults = Metrics::default();
        let pick = |field: &str, value: Option<f32>, default: f32| match value {
            Some(value) => check_dimension(field, value),
            None => Ok(default),
        };

        let metrics = Metrics::new(
            pick("width", self.width, defaults.width())?,
            pick("header_height", self.header_height, defaults.header_height())?,
            pick("space_height", self.space_height, defaults.space_height())?,
            pick("row_height", self.row_height, defaults.row_height())?,
        )
        .map_err(|err| format!("Invalid config: {err}"))?;

        Ok(metrics
            .with_text_margins(
                pick("text_margin_left", self.text_margin_left, defaults.text_margin_left())?,
                pick("text_margin_top", self.text_margin_top, defaults.text_margin_top())?,
            )
            .with_corner_radius(pick("corner_radius", self.corner_radius, defaults.corner_radius())?))
    }

    /// Palette with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first color field that does not parse.
    pub fn palette(&self) -> Result<Palette, String> {
        let mut palette = Palette::default();
        if let Some(color) = parse_color("stroke", self.stroke.as_ref())? {
            palette = palette.with_stroke(color);
        }
        if let Some(color) = parse_color("header_fill", self.header_fill.as_ref())? {
            palette = palette.with_header_fill(color);
        }
        if let Some(color) = parse_color("header_text", self.header_text.as_ref())? {
            palette = palette.with_header_text(color);
        }
        if let Some(color) = parse_color("space_fill", self.space_fill.as_ref())? {
            palette = palette.with_space_fill(color);
        }
        if let Some(color) = parse_color("port_text", self.port_text.as_ref())? {
            palette = palette.with_port_text(color);
        }

        let port_fills = [
            (PortCategory::In, "in_fill", &self.in_fill),
            (PortCategory::Out, "out_fill", &self.out_fill),
            (PortCategory::OutIn, "out_in_fill", &self.out_in_fill),
        ];
        for (category, field, value) in port_fills {
            if let Some(color) = parse_color(field, value.as_ref())? {
                palette = palette.with_port_fill(category, color);
            }
        }
        Ok(palette)
    }

    /// The full [`ComponentStyle`] described by this section.
    pub fn component_style(&self) -> Result<ComponentStyle, String> {
        Ok(ComponentStyle::new(self.metrics()?, self.palette()?)
            .with_allow_missing_ports(self.allow_missing_ports))
    }
}

/// Graph construction and framing options.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    container: Option<String>,

    #[serde(default)]
    fit_view: Option<bool>,

    /// Space around the content in exported documents.
    #[serde(default)]
    padding: Option<f32>,

    /// Interaction modes by name, each a list of behavior names.
    #[serde(default)]
    modes: IndexMap<String, Vec<String>>,
}

impl GraphConfig {
    /// Export padding, defaulting to [`DEFAULT_PADDING`].
    pub fn padding(&self) -> f32 {
        self.padding.unwrap_or(DEFAULT_PADDING)
    }

    /// [`GraphOptions`] with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown behavior name.
    pub fn graph_options(&self) -> Result<GraphOptions, String> {
        let mut options = match &self.container {
            Some(container) => GraphOptions::new(container.as_str()),
            None => GraphOptions::default(),
        };
        if let Some(fit_view) = self.fit_view {
            options = options.with_fit_view(fit_view);
        }
        for (name, behaviors) in &self.modes {
            let behaviors = behaviors
                .iter()
                .map(|behavior| behavior.parse::<Behavior>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| format!("Invalid mode `{name}` in config: {err}"))?;
            options = options.with_mode(name.as_str(), behaviors);
        }
        Ok(options)
    }
}
