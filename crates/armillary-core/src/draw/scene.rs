//! Retained-mode scene tree.
//!
//! [`Scene`] records everything a node type adds through [`Surface`] as an
//! arena of groups and shapes. Groups carry a translation offset so a whole
//! node can be moved by changing one value. Detached groups stay in the arena
//! but are no longer reachable from the root, so they are neither painted nor
//! hit-tested.

use log::trace;

use crate::{
    draw::{GroupId, SceneError, ShapeId, ShapeKind, ShapeSpec, Surface},
    geometry::{Bounds, Point},
};

/// A child entry of a group, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChild {
    Group(GroupId),
    Shape(ShapeId),
}

#[derive(Debug, Clone)]
pub struct SceneGroup {
    id: String,
    parent: Option<GroupId>,
    offset: Point,
    children: Vec<SceneChild>,
}

impl SceneGroup {
    /// The id the group was created with, e.g. `in-group`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Translation relative to the parent group.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn children(&self) -> &[SceneChild] {
        &self.children
    }
}

#[derive(Debug, Clone)]
pub struct SceneShape {
    spec: ShapeSpec,
    parent: GroupId,
}

impl SceneShape {
    pub fn spec(&self) -> &ShapeSpec {
        &self.spec
    }

    pub fn parent(&self) -> GroupId {
        self.parent
    }
}

/// An in-memory [`Surface`].
///
/// # Examples
///
/// ```
/// # use armillary_core::draw::{Attrs, Scene, ShapeSpec, Surface};
/// # use armillary_core::geometry::Point;
/// let mut scene = Scene::new();
/// let node = scene.add_group(scene.root(), "node").unwrap();
/// scene.add_shape(node, ShapeSpec::rect("body", Attrs::rect(0.0, 0.0, 10.0, 10.0))).unwrap();
/// scene.set_offset(node, Point::new(100.0, 0.0)).unwrap();
///
/// assert!(scene.hit_test(Point::new(105.0, 5.0)).is_some());
/// assert!(scene.hit_test(Point::new(5.0, 5.0)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    groups: Vec<SceneGroup>,
    shapes: Vec<SceneShape>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding only the root group.
    pub fn new() -> Self {
        Self {
            groups: vec![SceneGroup {
                id: "root".to_string(),
                parent: None,
                offset: Point::default(),
                children: Vec::new(),
            }],
            shapes: Vec::new(),
        }
    }

    pub fn root(&self) -> GroupId {
        GroupId::new(0)
    }

    /// Drops every group and shape except the root.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn group(&self, id: GroupId) -> Result<&SceneGroup, SceneError> {
        self.groups
            .get(id.index())
            .ok_or(SceneError::UnknownGroup(id))
    }

    pub fn shape(&self, id: ShapeId) -> Result<&SceneShape, SceneError> {
        self.shapes
            .get(id.index())
            .ok_or(SceneError::UnknownShape(id))
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut SceneGroup, SceneError> {
        self.groups
            .get_mut(id.index())
            .ok_or(SceneError::UnknownGroup(id))
    }

    /// Sets the translation of `group` relative to its parent.
    pub fn set_offset(&mut self, group: GroupId, offset: Point) -> Result<(), SceneError> {
        self.group_mut(group)?.offset = offset;
        Ok(())
    }

    /// Moves `group` by `delta`.
    pub fn translate(&mut self, group: GroupId, delta: Point) -> Result<(), SceneError> {
        let group = self.group_mut(group)?;
        group.offset = group.offset.add_point(delta);
        Ok(())
    }

    /// Unlinks `group` from its parent so it is no longer painted or hit.
    pub fn detach(&mut self, group: GroupId) -> Result<(), SceneError> {
        let parent = self.group(group)?.parent.ok_or(SceneError::DetachRoot)?;
        self.group_mut(parent)?
            .children
            .retain(|child| *child != SceneChild::Group(group));
        Ok(())
    }

    /// Returns `group` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, group: GroupId) -> Result<Vec<GroupId>, SceneError> {
        let mut chain = vec![group];
        let mut current = self.group(group)?.parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.group(parent)?.parent;
        }
        Ok(chain)
    }

    /// Absolute position of the local origin of `group`.
    pub fn origin(&self, group: GroupId) -> Result<Point, SceneError> {
        let mut origin = Point::default();
        for id in self.ancestors(group)? {
            origin = origin.add_point(self.group(id)?.offset);
        }
        Ok(origin)
    }

    /// All shapes reachable from `group`, depth-first in paint order.
    pub fn shapes_under(&self, group: GroupId) -> Result<Vec<ShapeId>, SceneError> {
        let mut out = Vec::new();
        self.collect_shapes(group, &mut out)?;
        Ok(out)
    }

    fn collect_shapes(&self, group: GroupId, out: &mut Vec<ShapeId>) -> Result<(), SceneError> {
        for child in &self.group(group)?.children {
            match *child {
                SceneChild::Shape(shape) => out.push(shape),
                SceneChild::Group(inner) => self.collect_shapes(inner, out)?,
            }
        }
        Ok(())
    }

    /// Absolute bounds of a rectangle shape. Text shapes yield `None`.
    pub fn shape_bounds(&self, id: ShapeId) -> Result<Option<Bounds>, SceneError> {
        let shape = self.shape(id)?;
        if shape.spec.kind() != ShapeKind::Rect {
            return Ok(None);
        }
        let origin = self.origin(shape.parent)?;
        Ok(shape
            .spec
            .attrs()
            .bounds()
            .map(|bounds| bounds.translate(origin)))
    }

    /// Absolute bounds of all rectangles under `group`, or `None` if there are none.
    pub fn bounds(&self, group: GroupId) -> Result<Option<Bounds>, SceneError> {
        let mut merged: Option<Bounds> = None;
        for shape in self.shapes_under(group)? {
            if let Some(bounds) = self.shape_bounds(shape)? {
                merged = Some(match merged {
                    Some(acc) => acc.merge(&bounds),
                    None => bounds,
                });
            }
        }
        Ok(merged)
    }

    /// Finds the top-most rectangle containing `point`.
    ///
    /// Text is not hit-testable on its own. A click on a label lands on the
    /// row rectangle underneath, which carries the same tag.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        let shapes = self.shapes_under(self.root()).ok()?;
        shapes.into_iter().rev().find(|shape| {
            matches!(self.shape_bounds(*shape), Ok(Some(bounds)) if bounds.contains(point))
        })
    }
}

impl Surface for Scene {
    fn add_group(&mut self, parent: GroupId, id: &str) -> Result<GroupId, SceneError> {
        let handle = GroupId::new(self.groups.len());
        self.group_mut(parent)?
            .children
            .push(SceneChild::Group(handle));
        self.groups.push(SceneGroup {
            id: id.to_string(),
            parent: Some(parent),
            offset: Point::default(),
            children: Vec::new(),
        });
        trace!(group_id = id, parent = parent.index(); "Group added");
        Ok(handle)
    }

    fn add_shape(&mut self, parent: GroupId, shape: ShapeSpec) -> Result<ShapeId, SceneError> {
        let handle = ShapeId::new(self.shapes.len());
        self.group_mut(parent)?
            .children
            .push(SceneChild::Shape(handle));
        trace!(name = shape.name(), kind = shape.kind().name(); "Shape added");
        self.shapes.push(SceneShape {
            spec: shape,
            parent,
        });
        Ok(handle)
    }
}
