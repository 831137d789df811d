//! Shape builder for the component node.
//!
//! Turns one [`ComponentConfig`] into groups and primitives on a [`Surface`].
//! The structure is fixed:
//!
//! ```text
//! node group
//! ├── container      container-group          (stroked, rounded, no fill)
//! ├── header-group   header-rect, header-text (draggable)
//! └── body-group     space
//!     ├── in-group       inNode-{rect,name,value}-i
//!     ├── out-group      outNode-{rect,name,value}-i
//!     ├── outIn-group    outInNode-{rect,name,value}-i
//!     └──                space2
//! ```
//!
//! A node with `n` ports therefore produces `3n + 5` primitives.

use log::{debug, trace};
use thiserror::Error;

use armillary_core::{
    draw::{Attrs, Cursor, GroupId, Radius, SceneError, ShapePart, ShapeSpec, ShapeTag, Surface, TextAlign},
    semantic::{ComponentConfig, PortCategory, PortSpec},
};

use crate::{
    layout::{AnchorPoint, LayoutError, LayoutResult, PortCounts},
    style::ComponentStyle,
};

/// Primitives drawn regardless of port count: container, header rect,
/// header text and the two spacers.
pub const FIXED_PRIMITIVES: usize = 5;

/// Primitives drawn per port row: background, label and value.
pub const PRIMITIVES_PER_ROW: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum DrawError {
    #[error("component config has no `{}` port list", field_name(.0))]
    MissingPortList(PortCategory),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("surface rejected a draw call: {0}")]
    Surface(#[from] SceneError),
}

fn field_name(category: &PortCategory) -> &'static str {
    match category {
        PortCategory::In => "in_nodes",
        PortCategory::Out => "out_nodes",
        PortCategory::OutIn => "out_in_nodes",
    }
}

/// The three port lists of a config, in drawing order.
///
/// An absent list is an error unless the style allows treating it as empty.
pub fn resolve_ports<'a>(
    style: &ComponentStyle,
    config: &'a ComponentConfig,
) -> Result<[&'a [PortSpec]; 3], DrawError> {
    let mut lists: [&[PortSpec]; 3] = [&[]; 3];
    for (slot, category) in lists.iter_mut().zip(PortCategory::ALL) {
        *slot = match config.ports(category) {
            Some(ports) => ports,
            None if style.allow_missing_ports() => {
                debug!(category = category.name(); "Port list absent, drawing it empty");
                &[]
            }
            None => return Err(DrawError::MissingPortList(category)),
        };
    }
    Ok(lists)
}

/// Port counts of a config after resolving its lists.
pub fn port_counts(style: &ComponentStyle, config: &ComponentConfig) -> Result<PortCounts, DrawError> {
    let [ins, outs, out_ins] = resolve_ports(style, config)?;
    Ok(PortCounts::from_lengths(ins.len(), outs.len(), out_ins.len()))
}

/// Layout of a config under `style`.
pub fn layout_for(style: &ComponentStyle, config: &ComponentConfig) -> Result<LayoutResult, DrawError> {
    Ok(style.metrics().layout(port_counts(style, config)?)?)
}

/// Anchor points of a config under `style`.
pub fn anchor_points_for(
    style: &ComponentStyle,
    config: &ComponentConfig,
) -> Result<Vec<AnchorPoint>, DrawError> {
    Ok(style.metrics().anchor_points(port_counts(style, config)?)?)
}

/// Draws one component node under `parent` and returns the container group.
///
/// All validation happens before the first draw call, so a failing config
/// leaves the surface untouched.
///
/// # Errors
///
/// Returns [`DrawError::MissingPortList`] when a port list is absent and the
/// style does not allow it, or [`DrawError::Surface`] if the surface rejects a call.
pub fn build_component(
    style: &ComponentStyle,
    config: &ComponentConfig,
    surface: &mut dyn Surface,
    parent: GroupId,
) -> Result<GroupId, DrawError> {
    let lists = resolve_ports(style, config)?;
    let layout = layout_for(style, config)?;
    let metrics = style.metrics();
    let palette = style.palette();
    let width = metrics.width();
    let radius = metrics.corner_radius();

    debug!(
        label = config.label(),
        height = layout.container_height(),
        rows = layout.row_offsets().len();
        "Drawing component"
    );

    let container = surface.add_group(parent, "container")?;
    surface.add_shape(
        container,
        ShapeSpec::rect(
            "container-group",
            Attrs::rect(0.0, 0.0, width, layout.container_height())
                .with_stroke(palette.stroke())
                .with_radius(Radius::uniform(radius)),
        ),
    )?;

    let header = surface.add_group(parent, "header-group")?;
    surface.add_shape(
        header,
        ShapeSpec::rect(
            "header-rect",
            Attrs::rect(0.0, 0.0, width, metrics.header_height())
                .with_fill(palette.header_fill())
                .with_radius(Radius::top(radius))
                .with_cursor(Cursor::Move),
        )
        .draggable(),
    )?;
    surface.add_shape(
        header,
        ShapeSpec::text(
            "header-text",
            Attrs::text(metrics.text_margin_left(), metrics.text_margin_top(), config.label())
                .with_fill(palette.header_text())
                .with_cursor(Cursor::Move),
        )
        .draggable(),
    )?;

    let body = surface.add_group(parent, "body-group")?;
    surface.add_shape(
        body,
        ShapeSpec::rect(
            "space",
            Attrs::rect(0.0, metrics.header_height(), width, metrics.space_height())
                .with_fill(palette.space_fill()),
        ),
    )?;

    for (category, ports) in PortCategory::ALL.into_iter().zip(lists) {
        let group = surface.add_group(body, category.group_id())?;
        draw_rows(style, &layout, category, ports, surface, group)?;
    }

    let bottom = layout.container_height() - metrics.space_height();
    surface.add_shape(
        body,
        ShapeSpec::rect(
            "space2",
            Attrs::rect(0.0, bottom, width, metrics.space_height())
                .with_fill(palette.space_fill())
                .with_radius(Radius::bottom(radius)),
        ),
    )?;

    Ok(container)
}

fn draw_rows(
    style: &ComponentStyle,
    layout: &LayoutResult,
    category: PortCategory,
    ports: &[PortSpec],
    surface: &mut dyn Surface,
    group: GroupId,
) -> Result<(), DrawError> {
    let metrics = style.metrics();
    let palette = style.palette();

    for (index, port) in ports.iter().enumerate() {
        let top = layout.row_offset(category, index);
        let baseline = top + metrics.text_margin_top();
        let tag = |part| ShapeTag::new(category, part, index);

        let rect = tag(ShapePart::Rect);
        surface.add_shape(
            group,
            ShapeSpec::rect(
                rect.to_string(),
                Attrs::rect(0.0, top, metrics.width(), metrics.row_height())
                    .with_fill(palette.port_fill(category)),
            )
            .with_tag(rect),
        )?;

        let name = tag(ShapePart::Name);
        surface.add_shape(
            group,
            ShapeSpec::text(
                name.to_string(),
                Attrs::text(metrics.text_margin_left(), baseline, port.label())
                    .with_fill(palette.port_text()),
            )
            .with_tag(name),
        )?;

        let value = tag(ShapePart::Value);
        surface.add_shape(
            group,
            ShapeSpec::text(
                value.to_string(),
                Attrs::text(metrics.width() - metrics.text_margin_left(), baseline, port.value())
                    .with_fill(palette.port_text())
                    .with_text_align(TextAlign::End),
            )
            .with_tag(value),
        )?;

        trace!(category = category.name(), index = index; "Port row drawn");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use armillary_core::{
        draw::{Scene, SceneChild, ShapeKind},
        geometry::Point,
    };

    fn ports(n: usize, prefix: &str) -> Vec<PortSpec> {
        (0..n)
            .map(|i| PortSpec::new(format!("{prefix}{i}"), format!("{i}")))
            .collect()
    }

    fn config(i: usize, o: usize, io: usize) -> ComponentConfig {
        ComponentConfig::new("Node")
            .with_ports(PortCategory::In, ports(i, "in"))
            .with_ports(PortCategory::Out, ports(o, "out"))
            .with_ports(PortCategory::OutIn, ports(io, "io"))
    }

    fn draw(config: &ComponentConfig) -> (Scene, GroupId) {
        let mut scene = Scene::new();
        let root = scene.root();
        let node = scene.add_group(root, "node").unwrap();
        build_component(&ComponentStyle::default(), config, &mut scene, node).unwrap();
        (scene, node)
    }

    fn names(scene: &Scene, group: GroupId) -> Vec<String> {
        scene
            .shapes_under(group)
            .unwrap()
            .into_iter()
            .map(|id| scene.shape(id).unwrap().spec().name().to_string())
            .collect()
    }

    #[test]
    fn test_primitive_count_is_locked() {
        for (i, o, io) in [(0, 0, 0), (1, 1, 0), (2, 1, 1), (0, 0, 5), (3, 4, 2)] {
            let (scene, node) = draw(&config(i, o, io));
            let count = scene.shapes_under(node).unwrap().len();
            assert_eq!(count, 3 * (i + o + io) + 5, "counts ({i}, {o}, {io})");
            assert_eq!(count, PRIMITIVES_PER_ROW * (i + o + io) + FIXED_PRIMITIVES);
        }
    }

    #[test]
    fn test_paint_order_and_names() {
        let (scene, node) = draw(&config(1, 1, 1));
        assert_eq!(
            names(&scene, node),
            vec![
                "container-group",
                "header-rect",
                "header-text",
                "space",
                "inNode-rect-0",
                "inNode-name-0",
                "inNode-value-0",
                "outNode-rect-0",
                "outNode-name-0",
                "outNode-value-0",
                "outInNode-rect-0",
                "outInNode-name-0",
                "outInNode-value-0",
                "space2",
            ]
        );
    }

    #[test]
    fn test_group_structure() {
        let (scene, node) = draw(&config(2, 0, 1));
        let group_ids: Vec<&str> = scene
            .group(node)
            .unwrap()
            .children()
            .iter()
            .filter_map(|child| match child {
                SceneChild::Group(id) => Some(scene.group(*id).unwrap().id()),
                SceneChild::Shape(_) => None,
            })
            .collect();
        assert_eq!(group_ids, vec!["container", "header-group", "body-group"]);

        for id in scene.shapes_under(node).unwrap() {
            let shape = scene.shape(id).unwrap();
            if let Some(tag) = shape.spec().tag() {
                let parent = scene.group(shape.parent()).unwrap();
                assert_eq!(parent.id(), tag.category().group_id());
                assert_eq!(ShapeTag::parse(shape.spec().name()), Some(tag));
            }
        }
    }

    #[test]
    fn test_row_geometry() {
        let (scene, node) = draw(&config(2, 1, 1));
        let rows: Vec<(String, f32)> = scene
            .shapes_under(node)
            .unwrap()
            .into_iter()
            .map(|id| scene.shape(id).unwrap().spec())
            .filter(|spec| spec.tag().is_some_and(|t| t.part() == ShapePart::Rect))
            .map(|spec| (spec.name().to_string(), spec.attrs().origin().y()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("inNode-rect-0".to_string(), 30.0),
                ("inNode-rect-1".to_string(), 50.0),
                ("outNode-rect-0".to_string(), 70.0),
                ("outInNode-rect-0".to_string(), 90.0),
            ]
        );
    }

    #[test]
    fn test_container_and_spacers() {
        let (scene, node) = draw(&config(1, 1, 0));
        let shapes: Vec<_> = scene
            .shapes_under(node)
            .unwrap()
            .into_iter()
            .map(|id| scene.shape(id).unwrap().spec().clone())
            .collect();

        let container = &shapes[0];
        assert_eq!(container.attrs().size().height(), 80.0);
        assert!(container.attrs().fill().is_none());
        assert!(container.attrs().stroke().is_some());
        assert!(container.attrs().radius().is_uniform());

        let header = &shapes[1];
        assert!(header.is_draggable());
        assert_eq!(header.attrs().cursor(), Cursor::Move);
        assert_eq!(header.attrs().radius(), Radius::top(6.0));

        let label = &shapes[2];
        assert_eq!(label.kind(), ShapeKind::Text);
        assert_eq!(label.attrs().content(), Some("Node"));
        assert!(label.is_draggable());

        let bottom = shapes.last().unwrap();
        assert_eq!(bottom.name(), "space2");
        assert_eq!(bottom.attrs().origin().y(), 70.0);
        assert_eq!(bottom.attrs().radius(), Radius::bottom(6.0));
    }

    #[test]
    fn test_value_text_is_right_aligned() {
        let (scene, node) = draw(&config(1, 0, 0));
        let value = scene
            .shapes_under(node)
            .unwrap()
            .into_iter()
            .map(|id| scene.shape(id).unwrap().spec().clone())
            .find(|spec| spec.name() == "inNode-value-0")
            .unwrap();

        assert_eq!(value.attrs().content(), Some("0"));
        assert_eq!(value.attrs().text_align(), TextAlign::End);
        assert_eq!(value.attrs().origin(), Point::new(240.0, 45.0));
    }

    #[test]
    fn test_missing_port_list_fails_before_drawing() {
        let config = ComponentConfig::new("Broken").with_ports(PortCategory::In, vec![]);
        let mut scene = Scene::new();
        let root = scene.root();

        let err = build_component(&ComponentStyle::default(), &config, &mut scene, root).unwrap_err();
        assert_eq!(err, DrawError::MissingPortList(PortCategory::Out));
        assert!(err.to_string().contains("out_nodes"));
        assert!(scene.group(root).unwrap().children().is_empty());
    }

    #[test]
    fn test_missing_port_list_allowed_by_style() {
        let style = ComponentStyle::default().with_allow_missing_ports(true);
        let config = ComponentConfig::new("Sparse").with_ports(PortCategory::Out, ports(2, "o"));
        let mut scene = Scene::new();
        let root = scene.root();

        build_component(&style, &config, &mut scene, root).unwrap();
        assert_eq!(scene.shapes_under(root).unwrap().len(), 3 * 2 + 5);
        assert_eq!(anchor_points_for(&style, &config).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_box_draws_fixed_primitives_only() {
        let (scene, node) = draw(&config(0, 0, 0));
        assert_eq!(
            names(&scene, node),
            vec!["container-group", "header-rect", "header-text", "space", "space2"]
        );
        let bounds = scene.bounds(node).unwrap().unwrap();
        assert_eq!(bounds.height(), 40.0);
    }
}
