//! Node type registry.
//!
//! A host looks node types up by name and calls two hooks on them: `draw`
//! to build the node's visual tree on a surface, and `anchor_points` to find
//! where edges attach. [`ComponentNode`] is the built-in `component` type.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use armillary_core::{
    draw::{GroupId, Surface},
    semantic::ComponentConfig,
};

use crate::{
    layout::AnchorPoint,
    shape::{self, DrawError},
    style::ComponentStyle,
};

/// Name under which [`ComponentNode`] is registered.
pub const COMPONENT_TYPE: &str = "component";

/// Hooks a host calls for one registered node type.
pub trait NodeType: fmt::Debug {
    /// Builds the node under `parent` and returns its root group.
    fn draw(
        &self,
        config: &ComponentConfig,
        surface: &mut dyn Surface,
        parent: GroupId,
    ) -> Result<GroupId, DrawError>;

    /// Edge attachment points, in port traversal order.
    fn anchor_points(&self, config: &ComponentConfig) -> Result<Vec<AnchorPoint>, DrawError>;
}

/// The box-with-ports node type.
#[derive(Debug, Clone, Default)]
pub struct ComponentNode {
    style: ComponentStyle,
}

impl ComponentNode {
    pub fn new(style: ComponentStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ComponentStyle {
        &self.style
    }
}

impl NodeType for ComponentNode {
    fn draw(
        &self,
        config: &ComponentConfig,
        surface: &mut dyn Surface,
        parent: GroupId,
    ) -> Result<GroupId, DrawError> {
        shape::build_component(&self.style, config, surface, parent)
    }

    fn anchor_points(&self, config: &ComponentConfig) -> Result<Vec<AnchorPoint>, DrawError> {
        shape::anchor_points_for(&self.style, config)
    }
}

/// Maps node type names to their hooks, in registration order.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    types: IndexMap<String, Box<dyn NodeType>>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in `component` type drawn with `style`.
    pub fn with_builtins(style: ComponentStyle) -> Self {
        let mut registry = Self::new();
        registry.register(COMPONENT_TYPE, Box::new(ComponentNode::new(style)));
        registry
    }

    /// Registers `node_type` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, node_type: Box<dyn NodeType>) {
        let name = name.into();
        debug!(name = name.as_str(); "Registering node type");
        if self.types.insert(name.clone(), node_type).is_some() {
            warn!(name = name.as_str(); "Node type registered twice, previous entry replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn NodeType> {
        self.types.get(name).map(Box::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
