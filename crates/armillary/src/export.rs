//! Export of drawn graphs.
//!
//! An [`Exporter`] takes a [`Scene`] that a [`Graph`](crate::graph::Graph) has
//! drawn and writes it out in some format. The [`svg`] backend is the only
//! built-in one.
//!
//! Export operations return [`Error`], which converts into
//! [`ArmillaryError::Export`](crate::ArmillaryError::Export) at the crate boundary.

/// SVG export backend.
pub mod svg;

use armillary_core::draw::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Exports a drawn scene to the backend's output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted, or
    /// [`Error::Io`] if writing the output fails.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
