//! Error adapter for converting ArmillaryError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! An [`ArmillaryError::Draw`] lists every node that failed to draw. Each
//! failure is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use armillary::{ArmillaryError, graph::GraphError};

/// Adapter for a malformed graph document.
///
/// Points at the offending span of the TOML source when the parser reports one.
pub struct InputAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("armillary::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "each [[nodes]] entry needs an `id`; port lists hold { label, value } tables",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for one node that failed to draw.
pub struct NodeFailureAdapter<'a> {
    node: &'a str,
    err: &'a GraphError,
}

impl fmt::Debug for NodeFailureAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeFailureAdapter")
            .field("node", &self.node)
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for NodeFailureAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for NodeFailureAdapter<'_> {}

impl MietteDiagnostic for NodeFailureAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("armillary::draw"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "rerun without --strict to render the graph without node `{}`",
            self.node
        )))
    }
}

/// Adapter for [`ArmillaryError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a ArmillaryError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArmillaryError::Io(_) => "armillary::io",
            ArmillaryError::Input { .. } => "armillary::input",
            ArmillaryError::Graph(_) => "armillary::graph",
            ArmillaryError::Draw(_) => "armillary::draw",
            ArmillaryError::Config(_) => "armillary::config",
            ArmillaryError::Export(_) => "armillary::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A malformed input document with its source.
    Input(InputAdapter<'a>),
    /// One node that failed to draw.
    NodeFailure(NodeFailureAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(i) => fmt::Display::fmt(i, f),
            Reportable::NodeFailure(n) => fmt::Display::fmt(n, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) | Reportable::NodeFailure(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.code(),
            Reportable::NodeFailure(n) => n.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.help(),
            Reportable::NodeFailure(n) => n.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(i) => i.source_code(),
            Reportable::NodeFailure(n) => n.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(i) => i.labels(),
            Reportable::NodeFailure(n) => n.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`ArmillaryError`] into a list of reportable errors.
///
/// [`ArmillaryError::Draw`] yields one [`Reportable`] per failed node. Other
/// variants yield a single [`Reportable`].
pub fn to_reportables(err: &ArmillaryError) -> Vec<Reportable<'_>> {
    match err {
        ArmillaryError::Input { err, src } => vec![Reportable::Input(InputAdapter::new(err, src))],
        ArmillaryError::Draw(failures) => failures
            .iter()
            .map(|(node, err)| Reportable::NodeFailure(NodeFailureAdapter { node, err }))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use armillary::DiagramBuilder;

    use super::*;

    fn code_of(reportable: &Reportable<'_>) -> String {
        reportable.code().map(|code| code.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_input_error_has_span() {
        let err = DiagramBuilder::default()
            .parse("[[nodes]]\nid = \n")
            .unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(code_of(&reportables[0]), "armillary::input");
        assert!(reportables[0].source_code().is_some());
        assert_eq!(reportables[0].labels().map(Iterator::count), Some(1));
    }

    #[test]
    fn test_draw_failures_are_separate() {
        let failures = vec![
            ("a".to_string(), GraphError::NotDrawn("a".to_string())),
            ("b".to_string(), GraphError::NotDrawn("b".to_string())),
        ];
        let err = ArmillaryError::Draw(failures);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(code_of(&reportables[1]), "armillary::draw");
        assert_eq!(reportables[1].to_string(), "node `b` has not been drawn");
        assert!(reportables[1].help().unwrap().to_string().contains("`b`"));
    }

    #[test]
    fn test_non_input_error() {
        let err = ArmillaryError::Config("bad width".to_string());

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad width");
                assert_eq!(code_of(&reportables[0]), "armillary::config");
            }
            other => panic!("Expected Error, got {other:?}"),
        }
    }
}
