//! Semantic model for component nodes.
//!
//! These types describe *what* a node shows, independent of how it is drawn:
//! a header label plus three ordered port lists. They are supplied by the
//! application for every node and treated as read-only by the renderer.

mod component;
mod port;

pub use component::ComponentConfig;
pub use port::{PortCategory, PortSpec};
