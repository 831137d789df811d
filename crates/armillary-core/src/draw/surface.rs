use thiserror::Error;

use crate::draw::ShapeSpec;

/// Handle to a group created on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a primitive created on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown group handle {}", .0.index())]
    UnknownGroup(GroupId),

    #[error("unknown shape handle {}", .0.index())]
    UnknownShape(ShapeId),

    #[error("the root group cannot be detached")]
    DetachRoot,
}

/// The shape-creation interface a node type draws onto.
///
/// Groups nest: every group and every shape has exactly one parent group.
/// Children are kept in insertion order, which is also the paint order.
pub trait Surface {
    /// Creates an empty group named `id` under `parent`.
    fn add_group(&mut self, parent: GroupId, id: &str) -> Result<GroupId, SceneError>;

    /// Adds a primitive to `parent`.
    fn add_shape(&mut self, parent: GroupId, shape: ShapeSpec) -> Result<ShapeId, SceneError>;
}
