use serde::Deserialize;

use super::{PortCategory, PortSpec};

/// Full description of one component node.
///
/// Each port list is optional at the data boundary so that a list that was
/// never supplied can be told apart from one that was supplied empty. The
/// renderer decides what an absent list means.
///
/// # Examples
///
/// ```
/// # use armillary_core::semantic::{ComponentConfig, PortCategory, PortSpec};
/// let config = ComponentConfig::new("Adder")
///     .with_ports(PortCategory::In, vec![PortSpec::new("a", "1"), PortSpec::new("b", "2")])
///     .with_ports(PortCategory::Out, vec![PortSpec::new("sum", "3")]);
///
/// assert_eq!(config.ports(PortCategory::In).map(<[_]>::len), Some(2));
/// assert!(config.ports(PortCategory::OutIn).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComponentConfig {
    #[serde(default)]
    label: String,

    #[serde(default, alias = "inNodes")]
    in_nodes: Option<Vec<PortSpec>>,

    #[serde(default, alias = "outNodes")]
    out_nodes: Option<Vec<PortSpec>>,

    #[serde(default, alias = "outInNodes")]
    out_in_nodes: Option<Vec<PortSpec>>,
}

impl ComponentConfig {
    /// Creates a config with the given header label and no port lists.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Returns the config with the port list for `category` replaced.
    pub fn with_ports(mut self, category: PortCategory, ports: Vec<PortSpec>) -> Self {
        *self.slot_mut(category) = Some(ports);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the port list for `category`, or `None` if it was never supplied.
    pub fn ports(&self, category: PortCategory) -> Option<&[PortSpec]> {
        match category {
            PortCategory::In => self.in_nodes.as_deref(),
            PortCategory::Out => self.out_nodes.as_deref(),
            PortCategory::OutIn => self.out_in_nodes.as_deref(),
        }
    }

    fn slot_mut(&mut self, category: PortCategory) -> &mut Option<Vec<PortSpec>> {
        match category {
            PortCategory::In => &mut self.in_nodes,
            PortCategory::Out => &mut self.out_nodes,
            PortCategory::OutIn => &mut self.out_in_nodes,
        }
    }
}
