use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

/// One port row: a label on the left and a value on the right.
///
/// Values are displayed verbatim, so numbers and booleans in the input are
/// accepted and kept as their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PortSpec {
    #[serde(default)]
    label: String,
    #[serde(default, deserialize_with = "scalar_to_string")]
    value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

fn scalar_to_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Integer(value) => value.to_string(),
        Scalar::Float(value) => value.to_string(),
        Scalar::Bool(value) => value.to_string(),
    })
}

impl PortSpec {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The three kinds of port rows a component node carries.
///
/// The declaration order is the drawing order: inputs first, then outputs,
/// then bidirectional ports. `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortCategory {
    /// Input port, anchored on the left border
    In,
    /// Output port, anchored on the right border
    Out,
    /// Input/output port, anchored on both borders
    OutIn,
}

impl PortCategory {
    /// All categories in drawing order.
    pub const ALL: [PortCategory; 3] = [Self::In, Self::Out, Self::OutIn];

    /// Short name used in primitive names and event payloads.
    pub fn name(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::OutIn => "outIn",
        }
    }

    /// Id of the group that holds this category's rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use armillary_core::semantic::PortCategory;
    /// assert_eq!(PortCategory::OutIn.group_id(), "outIn-group");
    /// ```
    pub fn group_id(self) -> &'static str {
        match self {
            Self::In => "in-group",
            Self::Out => "out-group",
            Self::OutIn => "outIn-group",
        }
    }

    /// Resolves a group id produced by [`PortCategory::group_id`].
    pub fn from_group_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.group_id() == id)
    }
}

impl fmt::Display for PortCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PortCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "outIn" | "out_in" => Ok(Self::OutIn),
            _ => Err(format!("unknown port category `{s}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        assert!(PortCategory::In < PortCategory::Out);
        assert!(PortCategory::Out < PortCategory::OutIn);
        assert_eq!(
            PortCategory::ALL,
            [PortCategory::In, PortCategory::Out, PortCategory::OutIn]
        );
    }

    #[test]
    fn test_group_id_roundtrip() {
        for category in PortCategory::ALL {
            assert_eq!(
                PortCategory::from_group_id(category.group_id()),
                Some(category)
            );
        }
        assert_eq!(PortCategory::from_group_id("header-group"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("outIn".parse::<PortCategory>(), Ok(PortCategory::OutIn));
        assert_eq!("out_in".parse::<PortCategory>(), Ok(PortCategory::OutIn));
        assert!("sideways".parse::<PortCategory>().is_err());
    }
}
