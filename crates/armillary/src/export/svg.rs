//! SVG rendering of drawn scenes.
//!
//! Every scene group becomes a `<g>` carrying its id in `data-group` and its
//! offset as a `translate` transform, so the output keeps the same tree the
//! node builders produced. Shapes keep their names in `data-name`.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use armillary_core::{
    color::Color,
    draw::{Attrs, Cursor, GroupId, Radius, Scene, SceneChild, ShapeKind, ShapeSpec, TextAlign},
    geometry::{Bounds, Point, Size},
};

use crate::export;

/// Default space kept around the content, in canvas units
pub const DEFAULT_PADDING: f32 = 20.0;

const FONT_SIZE: f32 = 12.0;

/// Rounds a coordinate to two decimals so accumulated `f32` error stays out
/// of the document.
fn coord(value: f32) -> f32 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Configures an [`Svg`] exporter.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    file_name: Option<String>,
    background: Option<Color>,
    fit_view: bool,
    padding: f32,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self {
            file_name: None,
            background: None,
            fit_view: true,
            padding: DEFAULT_PADDING,
        }
    }
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output file used by [`Exporter::export_scene`](export::Exporter::export_scene).
    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Frame the view box around the drawn content instead of the canvas origin.
    pub fn with_fit_view(mut self, fit_view: bool) -> Self {
        self.fit_view = fit_view;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for a negative or non-finite padding.
    pub fn build(self) -> Result<Svg, export::Error> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(export::Error::Render(format!(
                "padding must be a non-negative number, got {}",
                self.padding
            )));
        }
        Ok(Svg {
            file_name: self.file_name,
            background: self.background,
            fit_view: self.fit_view,
            padding: self.padding,
        })
    }
}

/// SVG exporter, optionally bound to an output file.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: Option<String>,
    background: Option<Color>,
    fit_view: bool,
    padding: f32,
}

impl Svg {
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The visible region of the document.
    fn view_bounds(&self, content: Option<Bounds>) -> Bounds {
        let content = content.unwrap_or_default();
        if self.fit_view {
            return content.add_padding(self.padding);
        }
        let size = Size::new(
            content.max_x().max(0.0) + self.padding,
            content.max_y().max(0.0) + self.padding,
        );
        Bounds::new_from_top_left(Point::default(), size)
    }

    /// Renders `scene` to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the scene has dangling handles.
    pub fn render_scene(&self, scene: &Scene) -> Result<Document, export::Error> {
        let content = scene
            .bounds(scene.root())
            .map_err(|err| export::Error::Render(err.to_string()))?;
        let view = self.view_bounds(content);
        debug!(
            min_x = view.min_x(), min_y = view.min_y(),
            width = view.width(), height = view.height();
            "SVG view box"
        );

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    coord(view.min_x()),
                    coord(view.min_y()),
                    coord(view.width()),
                    coord(view.height())
                ),
            )
            .set("width", coord(view.width()))
            .set("height", coord(view.height()));

        if let Some(color) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("data-name", "background")
                    .set("x", coord(view.min_x()))
                    .set("y", coord(view.min_y()))
                    .set("width", coord(view.width()))
                    .set("height", coord(view.height()))
                    .set("fill", color),
            );
        }

        let root = self.render_group(scene, scene.root())?;
        Ok(doc.add(root))
    }

    fn render_group(&self, scene: &Scene, id: GroupId) -> Result<svg_element::Group, export::Error> {
        let group = scene
            .group(id)
            .map_err(|err| export::Error::Render(err.to_string()))?;

        let mut out = svg_element::Group::new().set("data-group", group.id());
        let offset = group.offset();
        if !offset.is_zero() {
            out = out.set(
                "transform",
                format!("translate({}, {})", coord(offset.x()), coord(offset.y())),
            );
        }

        for child in group.children() {
            out = match *child {
                SceneChild::Group(inner) => out.add(self.render_group(scene, inner)?),
                SceneChild::Shape(shape) => {
                    let shape = scene
                        .shape(shape)
                        .map_err(|err| export::Error::Render(err.to_string()))?;
                    match shape.spec().kind() {
                        ShapeKind::Rect => out.add(render_rect(shape.spec())),
                        ShapeKind::Text => out.add(render_text(shape.spec())),
                    }
                }
            };
        }
        Ok(out)
    }

    /// Writes an SVG document to the configured file
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        let Some(file_name) = self.file_name.as_deref() else {
            return Err(export::Error::Render(
                "no output file configured".to_string(),
            ));
        };
        info!(file_name; "Creating SVG file");
        let f = match File::create(file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let doc = self.render_scene(scene)?;
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

fn paint<T: svg::Node>(mut element: T, attrs: &Attrs) -> T {
    match attrs.fill() {
        Some(fill) => element.assign("fill", &fill),
        None => element.assign("fill", "none"),
    }
    if let Some(stroke) = attrs.stroke() {
        element.assign("stroke", &stroke);
    }
    if attrs.cursor() == Cursor::Move {
        element.assign("cursor", "move");
    }
    element
}

fn render_rect(spec: &ShapeSpec) -> Box<dyn svg::Node> {
    let attrs = spec.attrs();
    let origin = attrs.origin();
    let size = attrs.size();
    let radius = attrs.radius();

    if radius.is_uniform() {
        let mut rect = svg_element::Rectangle::new()
            .set("data-name", spec.name())
            .set("x", coord(origin.x()))
            .set("y", coord(origin.y()))
            .set("width", coord(size.width()))
            .set("height", coord(size.height()));
        if !radius.is_zero() {
            rect = rect.set("rx", coord(radius.corners()[0]));
        }
        return Box::new(paint(rect, attrs));
    }

    let path = svg_element::Path::new()
        .set("data-name", spec.name())
        .set("d", rounded_rect_path(origin, size, radius));
    Box::new(paint(path, attrs))
}

fn render_text(spec: &ShapeSpec) -> svg_element::Text {
    let attrs = spec.attrs();
    let origin = attrs.origin();
    let text = svg_element::Text::new(attrs.content().unwrap_or_default())
        .set("data-name", spec.name())
        .set("x", coord(origin.x()))
        .set("y", coord(origin.y()))
        .set("font-size", FONT_SIZE);
    let text = match attrs.text_align() {
        TextAlign::Start => text,
        TextAlign::End => text.set("text-anchor", "end"),
    };
    paint(text, attrs)
}

/// Path data of a rectangle whose corners may differ in radius.
fn rounded_rect_path(origin: Point, size: Size, radius: Radius) -> String {
    let [tl, tr, br, bl] = radius.corners().map(coord);
    let (x, y) = (origin.x(), origin.y());
    let (right, bottom) = (x + size.width(), y + size.height());
    format!(
        "M {} {} H {} A {tr} {tr} 0 0 1 {} {} V {} A {br} {br} 0 0 1 {} {} H {} A {bl} {bl} 0 0 1 {} {} V {} A {tl} {tl} 0 0 1 {} {} Z",
        coord(x + tl),
        coord(y),
        coord(right - tr),
        coord(right),
        coord(y + tr),
        coord(bottom - br),
        coord(right - br),
        coord(bottom),
        coord(x + bl),
        coord(x),
        coord(bottom - bl),
        coord(y + tl),
        coord(x + tl),
        coord(y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use armillary_core::draw::{Attrs, Surface};

    fn scene_with_box() -> Scene {
        let mut scene = Scene::new();
        let root = scene.root();
        let node = scene.add_group(root, "n").unwrap();
        scene.set_offset(node, Point::new(10.0, 20.0)).unwrap();
        scene
            .add_shape(
                node,
                ShapeSpec::rect(
                    "header-rect",
                    Attrs::rect(0.0, 0.0, 100.0, 20.0)
                        .with_fill(Color::new("#2196f3").unwrap())
                        .with_radius(Radius::top(6.0))
                        .with_cursor(Cursor::Move),
                ),
            )
            .unwrap();
        scene
            .add_shape(
                node,
                ShapeSpec::rect("body", Attrs::rect(0.0, 20.0, 100.0, 30.0)),
            )
            .unwrap();
        scene
            .add_shape(
                node,
                ShapeSpec::text(
                    "value",
                    Attrs::text(90.0, 35.0, "42").with_text_align(TextAlign::End),
                ),
            )
            .unwrap();
        scene
    }

    fn render(builder: SvgBuilder, scene: &Scene) -> String {
        builder.build().unwrap().render_scene(scene).unwrap().to_string()
    }

    #[test]
    fn test_fit_view_frames_content() {
        let svg = render(SvgBuilder::new().with_padding(5.0), &scene_with_box());
        assert!(svg.contains(r#"viewBox="5 15 110 60""#), "{svg}");
    }

    #[test]
    fn test_without_fit_view_starts_at_origin() {
        let builder = SvgBuilder::new()
            .with_fit_view(false)
            .with_padding(5.0);
        let svg = render(builder, &scene_with_box());
        assert!(svg.contains(r#"viewBox="0 0 115 75""#), "{svg}");
    }

    #[test]
    fn test_groups_and_shapes_are_named() {
        let svg = render(SvgBuilder::new(), &scene_with_box());
        assert!(svg.contains(r#"data-group="n""#));
        assert!(svg.contains("translate(10, 20)"));
        assert!(svg.contains(r#"data-name="header-rect""#));
        assert!(svg.contains(r#"cursor="move""#));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(">\n42\n</text>"), "{svg}");
    }

    #[test]
    fn test_mixed_radius_renders_as_path() {
        let svg = render(SvgBuilder::new(), &scene_with_box());
        assert!(svg.contains("<path"));
        assert!(svg.contains("A 6 6 0 0 1 100 6"), "{svg}");
    }

    #[test]
    fn test_path_coordinates_are_rounded() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene
            .add_shape(
                root,
                ShapeSpec::rect(
                    "header-rect",
                    Attrs::rect(0.1, 0.0, 242.90002, 20.0).with_radius(Radius::top(6.0)),
                ),
            )
            .unwrap();

        let svg = render(SvgBuilder::new(), &scene);
        assert!(svg.contains("M 6.1 0 H 237 A 6 6 0 0 1 243 6"), "{svg}");
        assert!(!svg.contains("243.0000"), "{svg}");
    }

    #[test]
    fn test_background_color() {
        let builder = SvgBuilder::new().with_background(Some(Color::new("white").unwrap()));
        let svg = render(builder, &scene_with_box());
        assert!(svg.contains(r#"data-name="background""#));

        let plain = render(SvgBuilder::new(), &scene_with_box());
        assert!(!plain.contains(r#"data-name="background""#));
    }

    #[test]
    fn test_negative_padding_rejected() {
        assert!(matches!(
            SvgBuilder::new().with_padding(-1.0).build(),
            Err(export::Error::Render(_))
        ));
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.svg");
        let mut svg = SvgBuilder::new()
            .with_file_name(path.to_str().unwrap())
            .build()
            .unwrap();

        export::Exporter::export_scene(&mut svg, &scene_with_box()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }

    #[test]
    fn test_write_without_file_name() {
        let mut svg = SvgBuilder::new().build().unwrap();
        assert!(matches!(
            export::Exporter::export_scene(&mut svg, &scene_with_box()),
            Err(export::Error::Render(_))
        ));
    }
}
