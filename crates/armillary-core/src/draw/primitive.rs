//! Primitive shape descriptions.
//!
//! A [`ShapeSpec`] is what a node type hands to a surface. Its [`Attrs`]
//! carry position, size, fill, stroke, corner radius, text content and cursor,
//! following the immutable `with_*` builder style used across the crate.

use std::fmt;

use crate::{
    color::Color,
    draw::ShapeTag,
    geometry::{Bounds, Point, Size},
};

/// The kind of primitive a surface is asked to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Text,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Corner radii of a rectangle, clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Radius {
    top_left: f32,
    top_right: f32,
    bottom_right: f32,
    bottom_left: f32,
}

impl Radius {
    pub fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Same radius on every corner
    pub fn uniform(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// Rounds only the two top corners
    pub fn top(radius: f32) -> Self {
        Self::new(radius, radius, 0.0, 0.0)
    }

    /// Rounds only the two bottom corners
    pub fn bottom(radius: f32) -> Self {
        Self::new(0.0, 0.0, radius, radius)
    }

    /// Returns the radii as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn corners(self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn is_zero(self) -> bool {
        self.corners().iter().all(|r| *r == 0.0)
    }

    pub fn is_uniform(self) -> bool {
        let [tl, tr, br, bl] = self.corners();
        tl == tr && tr == br && br == bl
    }
}

/// Horizontal anchoring of a text primitive around its `x` coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at `x`
    #[default]
    Start,
    /// Text ends at `x`
    End,
}

/// Pointer cursor shown while hovering a primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Move,
}

/// Visual attributes of a primitive.
///
/// Coordinates are relative to the owning group. For text, `origin` is the
/// baseline anchor and `size` is zero.
///
/// # Examples
///
/// ```
/// # use armillary_core::{color::Color, draw::{Attrs, Radius}};
/// let header = Attrs::rect(0.0, 0.0, 250.0, 20.0)
///     .with_fill(Color::new("#2196f3").unwrap())
///     .with_radius(Radius::top(6.0));
///
/// assert_eq!(header.size().height(), 20.0);
/// assert!(header.stroke().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    origin: Point,
    size: Size,
    fill: Option<Color>,
    stroke: Option<Color>,
    radius: Radius,
    text: Option<String>,
    text_align: TextAlign,
    cursor: Cursor,
}

impl Attrs {
    /// Attributes of a rectangle with its top-left corner at `(x, y)`.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Attributes of a text primitive anchored at `(x, y)`.
    pub fn text(x: f32, y: f32, content: impl Into<String>) -> Self {
        Self {
            origin: Point::new(x, y),
            text: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_radius(mut self, radius: Radius) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    /// Text content, `None` for rectangles.
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Local bounds of the primitive. Text has no measured extent and yields `None`.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.size.is_zero() {
            None
        } else {
            Some(Bounds::new_from_top_left(self.origin, self.size))
        }
    }
}

/// A primitive to be added to a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    kind: ShapeKind,
    attrs: Attrs,
    name: String,
    draggable: bool,
    tag: Option<ShapeTag>,
}

impl ShapeSpec {
    pub fn new(kind: ShapeKind, name: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            kind,
            attrs,
            name: name.into(),
            draggable: false,
            tag: None,
        }
    }

    pub fn rect(name: impl Into<String>, attrs: Attrs) -> Self {
        Self::new(ShapeKind::Rect, name, attrs)
    }

    pub fn text(name: impl Into<String>, attrs: Attrs) -> Self {
        Self::new(ShapeKind::Text, name, attrs)
    }

    /// Marks the primitive as a drag handle for its node.
    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    /// Names the port row this primitive belongs to.
    pub fn with_tag(mut self, tag: ShapeTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn tag(&self) -> Option<ShapeTag> {
        self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::ShapePart, semantic::PortCategory};

    #[test]
    fn test_radius_helpers() {
        assert_eq!(Radius::top(6.0).corners(), [6.0, 6.0, 0.0, 0.0]);
        assert_eq!(Radius::bottom(6.0).corners(), [0.0, 0.0, 6.0, 6.0]);
        assert!(Radius::uniform(6.0).is_uniform());
        assert!(!Radius::top(6.0).is_uniform());
        assert!(Radius::default().is_zero());
    }

    #[test]
    fn test_text_attrs_have_no_bounds() {
        let attrs = Attrs::text(10.0, 15.0, "label").with_text_align(TextAlign::End);
        assert_eq!(attrs.content(), Some("label"));
        assert_eq!(attrs.text_align(), TextAlign::End);
        assert!(attrs.bounds().is_none());
    }

    #[test]
    fn test_rect_attrs_bounds() {
        let bounds = Attrs::rect(0.0, 30.0, 250.0, 20.0).bounds().unwrap();
        assert_eq!(bounds.min_y(), 30.0);
        assert_eq!(bounds.max_y(), 50.0);
    }

    #[test]
    fn test_shape_spec_builder() {
        let tag = ShapeTag::new(PortCategory::In, ShapePart::Rect, 0);
        let spec = ShapeSpec::rect("inNode-rect-0", Attrs::rect(0.0, 0.0, 1.0, 1.0))
            .with_tag(tag)
            .draggable();

        assert_eq!(spec.kind(), ShapeKind::Rect);
        assert_eq!(spec.name(), "inNode-rect-0");
        assert!(spec.is_draggable());
        assert_eq!(spec.tag(), Some(tag));
    }
}
