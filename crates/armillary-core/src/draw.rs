//! Drawing primitives, the shape-creation surface and an in-memory scene.
//!
//! Node types never paint pixels themselves. They describe what they look
//! like by adding groups and shapes to a [`Surface`]. The host decides what
//! a surface is; [`Scene`] is the retained-mode implementation used by the
//! graph and the SVG exporter.
//!
//! # Overview
//!
//! - [`ShapeSpec`]: one primitive (`rect` or `text`) with its [`Attrs`]
//! - [`ShapeTag`]: the port row a primitive belongs to, if any
//! - [`Surface`]: the `add_group` / `add_shape` interface
//! - [`Scene`]: a tree of groups and shapes with hit-testing

mod primitive;
mod scene;
mod surface;
mod tag;

pub use primitive::{Attrs, Cursor, Radius, ShapeKind, ShapeSpec, TextAlign};
pub use scene::{Scene, SceneChild, SceneGroup, SceneShape};
pub use surface::{GroupId, SceneError, ShapeId, Surface};
pub use tag::{ShapePart, ShapeTag};
