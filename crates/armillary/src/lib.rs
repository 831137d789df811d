//! Armillary - component diagram nodes with labeled ports.
//!
//! A component node is a box with a header and three kinds of port rows
//! (in, out and outIn). This crate computes its layout and edge anchors,
//! builds its visual tree on a [`Surface`](draw::Surface), hosts nodes in a
//! [`Graph`](graph::Graph) that dispatches clicks and drags, and exports the
//! drawn graph to SVG.

pub mod config;
pub mod export;
pub mod graph;
pub mod input;
pub mod layout;
pub mod registry;
pub mod shape;
pub mod style;

mod error;

pub use armillary_core::{color, draw, geometry, semantic};

pub use error::ArmillaryError;

use log::{debug, info, trace, warn};

use config::AppConfig;
use export::{
    Exporter,
    svg::{Svg, SvgBuilder},
};
use graph::Graph;
use input::GraphDocument;
use registry::NodeRegistry;

/// Builder for parsing, drawing and rendering Armillary graphs.
///
/// # Examples
///
/// ```rust,no_run
/// use armillary::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     [[nodes]]
///     id = "adder"
///     label = "Adder"
///     in_nodes = [{ label = "a", value = "1" }]
///     out_nodes = [{ label = "sum", value = "1" }]
///     out_in_nodes = []
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
/// let mut graph = builder.build_graph(document).expect("Failed to build");
/// let svg = builder.render_svg(&mut graph).expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    strict: bool,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Fail rendering when any node fails to draw, instead of skipping it.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML graph document.
    ///
    /// # Errors
    ///
    /// Returns [`ArmillaryError::Input`] carrying the source text for
    /// malformed documents.
    pub fn parse(&self, source: &str) -> Result<GraphDocument, ArmillaryError> {
        info!("Parsing graph document");

        let document = GraphDocument::parse(source)
            .map_err(|err| ArmillaryError::new_input_error(err, source))?;

        debug!(nodes = document.nodes().len(); "Document parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Build a graph holding the document's nodes, styled by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArmillaryError::Config`] for invalid style or graph settings,
    /// and [`ArmillaryError::Graph`] for duplicate ids or unregistered types.
    pub fn build_graph(&self, document: GraphDocument) -> Result<Graph, ArmillaryError> {
        let style = self
            .config
            .style()
            .component_style()
            .map_err(ArmillaryError::Config)?;
        let options = self
            .config
            .graph()
            .graph_options()
            .map_err(ArmillaryError::Config)?;

        let mut graph = Graph::with_registry(options, NodeRegistry::with_builtins(style));
        for node in document.into_nodes() {
            graph.add_node(node)?;
        }

        info!(nodes = graph.nodes().count(); "Graph built");
        Ok(graph)
    }

    /// Draw `graph` and render it to an SVG string.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`ArmillaryError::Draw`] if any node failed.
    /// Otherwise failed nodes are logged and left out of the output.
    pub fn render_svg(&self, graph: &mut Graph) -> Result<String, ArmillaryError> {
        let svg = self.draw_for_svg(graph, SvgBuilder::new())?;
        let document = svg.render_scene(graph.scene())?;

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Draw `graph` and write it as an SVG document to `file_name`.
    ///
    /// # Errors
    ///
    /// Same as [`DiagramBuilder::render_svg`], plus [`ArmillaryError::Export`]
    /// when the file cannot be written.
    pub fn export_svg(&self, graph: &mut Graph, file_name: &str) -> Result<(), ArmillaryError> {
        let mut svg = self.draw_for_svg(graph, SvgBuilder::new().with_file_name(file_name))?;
        svg.export_scene(graph.scene())?;

        info!(file_name; "SVG exported successfully");
        Ok(())
    }

    /// Draws every node, applies the strict policy and configures the exporter.
    fn draw_for_svg(&self, graph: &mut Graph, builder: SvgBuilder) -> Result<Svg, ArmillaryError> {
        let report = graph.draw()?;
        if !report.is_complete() {
            if self.strict {
                return Err(ArmillaryError::Draw(report.into_failures()));
            }
            for (node, err) in report.failed() {
                warn!(node = node.as_str(), err:% = err; "Node left out of the output");
            }
        }

        let background = self
            .config
            .style()
            .background_color()
            .map_err(ArmillaryError::Config)?;

        Ok(builder
            .with_background(background)
            .with_fit_view(graph.options().fit_view())
            .with_padding(self.config.graph().padding())
            .build()?)
    }
}
