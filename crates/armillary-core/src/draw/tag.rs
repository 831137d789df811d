//! Port-row tags attached to primitives.
//!
//! Every primitive drawn for a port row carries a [`ShapeTag`] naming its
//! category, its part within the row and the row index. Click handling reads
//! the tag directly. The same information is encoded in the primitive name
//! as `<category>Node-<part>-<index>`, and [`ShapeTag::parse`] recovers it.

use std::{fmt, str::FromStr};

use crate::semantic::PortCategory;

/// Which primitive of a port row a shape is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapePart {
    /// Row background
    Rect,
    /// Left-aligned port label
    Name,
    /// Right-aligned port value
    Value,
}

impl ShapePart {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Name => "name",
            Self::Value => "value",
        }
    }
}

impl FromStr for ShapePart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" => Ok(Self::Rect),
            "name" => Ok(Self::Name),
            "value" => Ok(Self::Value),
            _ => Err(format!("unknown shape part `{s}`")),
        }
    }
}

/// Identifies the port row a primitive was drawn for.
///
/// # Examples
///
/// ```
/// # use armillary_core::{draw::{ShapePart, ShapeTag}, semantic::PortCategory};
/// let tag = ShapeTag::new(PortCategory::OutIn, ShapePart::Value, 2);
/// assert_eq!(tag.to_string(), "outInNode-value-2");
/// assert_eq!(ShapeTag::parse("outInNode-value-2"), Some(tag));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeTag {
    category: PortCategory,
    part: ShapePart,
    index: usize,
}

impl ShapeTag {
    pub fn new(category: PortCategory, part: ShapePart, index: usize) -> Self {
        Self {
            category,
            part,
            index,
        }
    }

    pub fn category(self) -> PortCategory {
        self.category
    }

    pub fn part(self) -> ShapePart {
        self.part
    }

    pub fn index(self) -> usize {
        self.index
    }

    /// Parses a primitive name of the form `<category>Node-<part>-<index>`.
    ///
    /// Names of non-row primitives such as `header-rect` yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let mut pieces = name.split('-');
        let category = pieces.next()?.strip_suffix("Node")?.parse().ok()?;
        let part = pieces.next()?.parse().ok()?;
        let index = pieces.next()?.parse().ok()?;
        if pieces.next().is_some() {
            return None;
        }
        Some(Self::new(category, part, index))
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Node-{}-{}",
            self.category.name(),
            self.part.name(),
            self.index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display_matches_naming_contract() {
        let tag = ShapeTag::new(PortCategory::In, ShapePart::Rect, 0);
        assert_eq!(tag.to_string(), "inNode-rect-0");

        let tag = ShapeTag::new(PortCategory::Out, ShapePart::Name, 11);
        assert_eq!(tag.to_string(), "outNode-name-11");
    }

    #[test]
    fn test_parse_rejects_other_names() {
        assert_eq!(ShapeTag::parse("header-rect"), None);
        assert_eq!(ShapeTag::parse("container-group"), None);
        assert_eq!(ShapeTag::parse("space2"), None);
        assert_eq!(ShapeTag::parse("inNode-rect"), None);
        assert_eq!(ShapeTag::parse("inNode-rect-x"), None);
        assert_eq!(ShapeTag::parse("inNode-rect-1-2"), None);
        assert_eq!(ShapeTag::parse("sideNode-rect-1"), None);
    }

    #[test]
    fn test_parse_every_part() {
        for category in PortCategory::ALL {
            for part in [ShapePart::Rect, ShapePart::Name, ShapePart::Value] {
                let tag = ShapeTag::new(category, part, 3);
                assert_eq!(ShapeTag::parse(&tag.to_string()), Some(tag));
            }
        }
    }
}
