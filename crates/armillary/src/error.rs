//! Error types for Armillary operations.
//!
//! [`ArmillaryError`] is the top-level error returned by
//! [`DiagramBuilder`](crate::DiagramBuilder). Each layer keeps its own error
//! type ([`LayoutError`](crate::layout::LayoutError),
//! [`DrawError`](crate::shape::DrawError), [`GraphError`]) and converts into
//! this one at the crate boundary.

use std::io;

use thiserror::Error;

use crate::graph::GraphError;

/// The main error type for Armillary operations.
#[derive(Debug, Error)]
pub enum ArmillaryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The graph document is not valid TOML or has malformed nodes.
    #[error("{err}")]
    Input { err: toml::de::Error, src: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Nodes that failed to draw, with the reason for each.
    #[error("{} node(s) failed to draw: {}", .0.len(), describe_failures(.0))]
    Draw(Vec<(String, GraphError)>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

fn describe_failures(failures: &[(String, GraphError)]) -> String {
    failures
        .iter()
        .map(|(_, err)| err.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<crate::export::Error> for ArmillaryError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ArmillaryError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
