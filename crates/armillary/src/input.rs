//! TOML graph documents.
//!
//! A document is a list of `[[nodes]]` tables. Each table names the node,
//! optionally its registered type and canvas position, and carries the
//! component fields inline:
//!
//! ```toml
//! [[nodes]]
//! id = "adder"
//! x = 40
//! y = 60
//! label = "Adder"
//! in_nodes = [{ label = "a", value = 1 }, { label = "b", value = 2 }]
//! out_nodes = [{ label = "sum", value = 3 }]
//! out_in_nodes = []
//! ```

use serde::Deserialize;

use armillary_core::{geometry::Point, semantic::ComponentConfig};

use crate::{graph::NodeData, registry::COMPONENT_TYPE};

fn default_node_type() -> String {
    COMPONENT_TYPE.to_string()
}

/// One `[[nodes]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeDocument {
    id: String,

    #[serde(rename = "type", default = "default_node_type")]
    node_type: String,

    #[serde(default)]
    x: f32,

    #[serde(default)]
    y: f32,

    #[serde(flatten)]
    config: ComponentConfig,
}

impl NodeDocument {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }
}

impl From<NodeDocument> for NodeData {
    fn from(doc: NodeDocument) -> Self {
        let position = doc.position();
        NodeData::new(doc.id, doc.config, position).with_type(doc.node_type)
    }
}

/// A parsed graph document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    nodes: Vec<NodeDocument>,
}

impl GraphDocument {
    /// Parses a document from TOML source.
    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn nodes(&self) -> &[NodeDocument] {
        &self.nodes
    }

    pub fn into_nodes(self) -> impl Iterator<Item = NodeData> {
        self.nodes.into_iter().map(NodeData::from)
    }
}
