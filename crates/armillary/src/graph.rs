//! Graph instance hosting component nodes.
//!
//! [`Graph`] plays the part of the rendering engine: it owns the node data,
//! asks the [`NodeRegistry`] to draw every node into its [`Scene`], answers
//! anchor queries, and turns pointer input into events.
//!
//! # Events
//!
//! Handlers subscribe with [`Graph::on`]. A `node:click` event carries the
//! [`ShapeTag`] of the primitive that was hit, so a handler can tell an
//! `in-group` row from an `out-group` or `outIn-group` row without walking
//! the scene. Clicks on untagged primitives (header, spacers) still fire
//! `node:click` but have no port tag.
//!
//! # Isolation
//!
//! [`Graph::draw`] draws node by node. A node that fails is detached from the
//! scene and reported in the [`DrawReport`]; its siblings are unaffected.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

use armillary_core::{
    draw::{GroupId, Scene, SceneError, ShapeId, ShapeTag, Surface},
    geometry::{Bounds, Point},
    semantic::{ComponentConfig, PortCategory},
};

use crate::{
    layout::AnchorPoint,
    registry::{COMPONENT_TYPE, NodeRegistry},
    shape::DrawError,
    style::ComponentStyle,
};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node `{node}` has unregistered type `{node_type}`")]
    UnknownNodeType { node: String, node_type: String },

    #[error("node `{0}` already exists")]
    DuplicateNode(String),

    #[error("no node with id `{0}`")]
    UnknownNode(String),

    #[error("node `{0}` has not been drawn")]
    NotDrawn(String),

    #[error("no interaction mode named `{0}`")]
    UnknownMode(String),

    #[error("failed to draw node `{node}`: {source}")]
    Draw { node: String, source: DrawError },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Pointer behaviors an interaction mode can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Dragging empty canvas pans the view
    DragCanvas,
    /// Dragging a draggable primitive moves its node
    DragNode,
}

impl Behavior {
    pub fn name(self) -> &'static str {
        match self {
            Self::DragCanvas => "drag-canvas",
            Self::DragNode => "drag-node",
        }
    }
}

impl FromStr for Behavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drag-canvas" => Ok(Self::DragCanvas),
            "drag-node" => Ok(Self::DragNode),
            _ => Err(format!("unknown behavior `{s}`")),
        }
    }
}

/// Name of the mode a graph starts in.
pub const DEFAULT_MODE: &str = "default";

/// Construction options of a [`Graph`].
///
/// # Examples
///
/// ```
/// # use armillary::graph::{Behavior, GraphOptions};
/// let options = GraphOptions::new("g6")
///     .with_fit_view(true)
///     .with_mode("default", vec![Behavior::DragCanvas, Behavior::DragNode]);
/// assert_eq!(options.container(), "g6");
/// assert_eq!(options.mode("default").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    container: String,
    fit_view: bool,
    modes: IndexMap<String, Vec<Behavior>>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        let mut modes = IndexMap::new();
        modes.insert(
            DEFAULT_MODE.to_string(),
            vec![Behavior::DragCanvas, Behavior::DragNode],
        );
        Self {
            container: "canvas".to_string(),
            fit_view: true,
            modes,
        }
    }
}

impl GraphOptions {
    /// Options for a graph mounted in `container`, with default modes.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            ..Self::default()
        }
    }

    pub fn with_fit_view(mut self, fit_view: bool) -> Self {
        self.fit_view = fit_view;
        self
    }

    /// Defines or replaces the mode `name`.
    pub fn with_mode(mut self, name: impl Into<String>, behaviors: Vec<Behavior>) -> Self {
        self.modes.insert(name.into(), behaviors);
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Whether exporters should frame the view around the drawn content
    pub fn fit_view(&self) -> bool {
        self.fit_view
    }

    pub fn mode(&self, name: &str) -> Option<&[Behavior]> {
        self.modes.get(name).map(Vec::as_slice)
    }
}

/// Events a graph emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphEvent {
    NodeClick,
    CanvasClick,
    NodeDragEnd,
    CanvasDragEnd,
}

impl GraphEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::NodeClick => "node:click",
            Self::CanvasClick => "canvas:click",
            Self::NodeDragEnd => "node:dragend",
            Self::CanvasDragEnd => "canvas:dragend",
        }
    }
}

impl FromStr for GraphEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::NodeClick,
            Self::CanvasClick,
            Self::NodeDragEnd,
            Self::CanvasDragEnd,
        ]
        .into_iter()
        .find(|event| event.name() == s)
        .ok_or_else(|| format!("unknown event `{s}`"))
    }
}

/// Payload delivered to event handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: GraphEvent,
    point: Point,
    node: Option<String>,
    shape: Option<String>,
    tag: Option<ShapeTag>,
}

impl Event {
    pub fn kind(&self) -> GraphEvent {
        self.kind
    }

    /// Canvas position of the pointer
    pub fn point(&self) -> Point {
        self.point
    }

    /// Id of the node involved, if any
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Name of the primitive that was hit, if any
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    /// Port row the hit primitive belongs to
    pub fn tag(&self) -> Option<ShapeTag> {
        self.tag
    }

    pub fn port_category(&self) -> Option<PortCategory> {
        self.tag.map(ShapeTag::category)
    }

    /// `in-group`, `out-group` or `outIn-group` for port-row hits.
    pub fn port_group(&self) -> Option<&'static str> {
        self.port_category().map(PortCategory::group_id)
    }
}

/// What a drag gesture ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Node(String),
    Canvas,
    Ignored,
}

/// One node as supplied by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    id: String,
    node_type: String,
    config: ComponentConfig,
    position: Point,
}

impl NodeData {
    /// A `component` node at `position`.
    pub fn new(id: impl Into<String>, config: ComponentConfig, position: Point) -> Self {
        Self {
            id: id.into(),
            node_type: COMPONENT_TYPE.to_string(),
            config,
            position,
        }
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    /// Top-left corner of the node on the canvas
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Outcome of [`Graph::draw`].
#[derive(Debug, Default)]
pub struct DrawReport {
    drawn: Vec<String>,
    failed: Vec<(String, GraphError)>,
}

impl DrawReport {
    pub fn drawn(&self) -> &[String] {
        &self.drawn
    }

    pub fn failed(&self) -> &[(String, GraphError)] {
        &self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn into_failures(self) -> Vec<(String, GraphError)> {
        self.failed
    }
}

type Handler = Box<dyn FnMut(&Event)>;

/// A canvas of component nodes.
pub struct Graph {
    options: GraphOptions,
    registry: NodeRegistry,
    nodes: IndexMap<String, NodeData>,
    scene: Scene,
    node_groups: IndexMap<String, GroupId>,
    pan: Point,
    mode: String,
    handlers: Vec<(GraphEvent, Handler)>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("nodes", &self.nodes.keys().collect::<Vec<_>>())
            .field("mode", &self.mode)
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl Graph {
    /// Creates a graph with the built-in node types in their default style.
    pub fn new(options: GraphOptions) -> Self {
        Self::with_registry(options, NodeRegistry::with_builtins(ComponentStyle::default()))
    }

    pub fn with_registry(options: GraphOptions, registry: NodeRegistry) -> Self {
        Self {
            options,
            registry,
            nodes: IndexMap::new(),
            scene: Scene::new(),
            node_groups: IndexMap::new(),
            pan: Point::default(),
            mode: DEFAULT_MODE.to_string(),
            handlers: Vec::new(),
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NodeRegistry {
        &mut self.registry
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Adds a node. Its type must already be registered.
    pub fn add_node(&mut self, node: NodeData) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if !self.registry.contains(&node.node_type) {
            return Err(GraphError::UnknownNodeType {
                node: node.id,
                node_type: node.node_type,
            });
        }
        debug!(node = node.id.as_str(), node_type = node.node_type.as_str(); "Node added");
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.nodes.values()
    }

    /// Switches the active interaction mode.
    pub fn set_mode(&mut self, name: &str) -> Result<(), GraphError> {
        if self.options.mode(name).is_none() {
            return Err(GraphError::UnknownMode(name.to_string()));
        }
        self.mode = name.to_string();
        Ok(())
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    fn behavior_enabled(&self, behavior: Behavior) -> bool {
        self.options
            .mode(&self.mode)
            .is_some_and(|behaviors| behaviors.contains(&behavior))
    }

    /// Rebuilds the scene from the current node data.
    ///
    /// # Errors
    ///
    /// Only scene handle errors abort the whole draw. Per-node failures are
    /// collected in the returned [`DrawReport`].
    pub fn draw(&mut self) -> Result<DrawReport, GraphError> {
        info!(nodes = self.nodes.len(); "Drawing graph");
        self.scene.clear();
        self.node_groups.clear();
        let root = self.scene.root();
        self.scene.set_offset(root, self.pan)?;

        let mut report = DrawReport::default();
        for (id, node) in &self.nodes {
            let group = self.scene.add_group(root, id)?;
            self.scene.set_offset(group, node.position)?;

            let result = match self.registry.get(&node.node_type) {
                Some(node_type) => node_type
                    .draw(&node.config, &mut self.scene, group)
                    .map_err(|source| GraphError::Draw {
                        node: id.clone(),
                        source,
                    }),
                None => Err(GraphError::UnknownNodeType {
                    node: id.clone(),
                    node_type: node.node_type.clone(),
                }),
            };

            match result {
                Ok(_) => {
                    self.node_groups.insert(id.clone(), group);
                    report.drawn.push(id.clone());
                }
                Err(err) => {
                    warn!(node = id.as_str(), err:err; "Node skipped");
                    self.scene.detach(group)?;
                    report.failed.push((id.clone(), err));
                }
            }
        }

        info!(drawn = report.drawn.len(), failed = report.failed.len(); "Graph drawn");
        Ok(report)
    }

    /// Node-relative anchors of `id`, as its node type computes them.
    pub fn anchor_points(&self, id: &str) -> Result<Vec<AnchorPoint>, GraphError> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        let node_type = self
            .registry
            .get(&node.node_type)
            .ok_or_else(|| GraphError::UnknownNodeType {
                node: id.to_string(),
                node_type: node.node_type.clone(),
            })?;
        node_type
            .anchor_points(&node.config)
            .map_err(|source| GraphError::Draw {
                node: id.to_string(),
                source,
            })
    }

    /// Canvas position of anchor `index` of a drawn node.
    pub fn anchor_position(&self, id: &str, index: usize) -> Result<Option<Point>, GraphError> {
        let anchors = self.anchor_points(id)?;
        let bounds = self
            .node_bounds(id)?
            .ok_or_else(|| GraphError::NotDrawn(id.to_string()))?;

        Ok(anchors.get(index).map(|anchor| {
            Point::new(
                bounds.min_x() + anchor.side().x() * bounds.width(),
                bounds.min_y() + anchor.normalized_y() * bounds.height(),
            )
        }))
    }

    /// Canvas bounds of a drawn node.
    pub fn node_bounds(&self, id: &str) -> Result<Option<Bounds>, GraphError> {
        let group = self
            .node_groups
            .get(id)
            .ok_or_else(|| GraphError::NotDrawn(id.to_string()))?;
        Ok(self.scene.bounds(*group)?)
    }

    /// Canvas bounds of everything drawn.
    pub fn content_bounds(&self) -> Result<Option<Bounds>, GraphError> {
        Ok(self.scene.bounds(self.scene.root())?)
    }

    /// Subscribes `handler` to `event`.
    pub fn on(&mut self, event: GraphEvent, handler: impl FnMut(&Event) + 'static) {
        self.handlers.push((event, Box::new(handler)));
    }

    fn emit(&mut self, event: &Event) {
        for (kind, handler) in &mut self.handlers {
            if *kind == event.kind {
                handler(event);
            }
        }
    }

    fn node_of_shape(&self, shape: ShapeId) -> Result<Option<String>, GraphError> {
        let parent = self.scene.shape(shape)?.parent();
        let chain = self.scene.ancestors(parent)?;
        Ok(self
            .node_groups
            .iter()
            .find(|(_, group)| chain.contains(*group))
            .map(|(id, _)| id.clone()))
    }

    /// Delivers a click at `point` and returns the emitted event.
    pub fn click(&mut self, point: Point) -> Result<Event, GraphError> {
        let hit = self.scene.hit_test(point);
        let node = match hit {
            Some(shape) => self.node_of_shape(shape)?,
            None => None,
        };

        let event = match (hit, node) {
            (Some(shape), Some(node)) => {
                let spec = self.scene.shape(shape)?.spec();
                let event = Event {
                    kind: GraphEvent::NodeClick,
                    point,
                    node: Some(node),
                    shape: Some(spec.name().to_string()),
                    tag: spec.tag(),
                };
                match event.port_category() {
                    Some(category) => debug!(
                        node = event.node(),
                        group = category.group_id(),
                        shape = event.shape();
                        "Port row clicked"
                    ),
                    None => debug!(
                        node = event.node(),
                        shape = event.shape();
                        "Unrecognized click target"
                    ),
                }
                event
            }
            _ => Event {
                kind: GraphEvent::CanvasClick,
                point,
                node: None,
                shape: None,
                tag: None,
            },
        };

        self.emit(&event);
        Ok(event)
    }

    /// Delivers a drag gesture starting at `from` and moving by `delta`.
    ///
    /// A drag that starts on a draggable primitive moves its node when the
    /// active mode has [`Behavior::DragNode`]. A drag on empty canvas pans the
    /// view when the mode has [`Behavior::DragCanvas`].
    pub fn drag(&mut self, from: Point, delta: Point) -> Result<DragOutcome, GraphError> {
        let hit = self.scene.hit_test(from);
        let to = from.add_point(delta);

        if let Some(shape) = hit {
            let draggable = self.scene.shape(shape)?.spec().is_draggable();
            if !(draggable && self.behavior_enabled(Behavior::DragNode)) {
                return Ok(DragOutcome::Ignored);
            }
            let Some(id) = self.node_of_shape(shape)? else {
                return Ok(DragOutcome::Ignored);
            };
            let node = self
                .nodes
                .get_mut(&id)
                .ok_or_else(|| GraphError::UnknownNode(id.clone()))?;
            node.position = node.position.add_point(delta);
            if let Some(group) = self.node_groups.get(&id) {
                self.scene.translate(*group, delta)?;
            }
            debug!(node = id.as_str(), x = to.x(), y = to.y(); "Node dragged");

            self.emit(&Event {
                kind: GraphEvent::NodeDragEnd,
                point: to,
                node: Some(id.clone()),
                shape: Some(self.scene.shape(shape)?.spec().name().to_string()),
                tag: None,
            });
            return Ok(DragOutcome::Node(id));
        }

        if !self.behavior_enabled(Behavior::DragCanvas) {
            return Ok(DragOutcome::Ignored);
        }
        self.pan = self.pan.add_point(delta);
        let root = self.scene.root();
        self.scene.translate(root, delta)?;
        self.emit(&Event {
            kind: GraphEvent::CanvasDragEnd,
            point: to,
            node: None,
            shape: None,
            tag: None,
        });
        Ok(DragOutcome::Canvas)
    }
}
