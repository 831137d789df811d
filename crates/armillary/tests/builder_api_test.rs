//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public pipeline: parse, build, draw, render.

use armillary::{
    ArmillaryError, DiagramBuilder,
    config::AppConfig,
    geometry::Point,
    graph::{GraphError, GraphEvent},
};

const TWO_NODES: &str = r#"
    [[nodes]]
    id = "adder"
    label = "Adder"
    in_nodes = [{ label = "a", value = 1 }, { label = "b", value = 2 }]
    out_nodes = [{ label = "sum", value = 3 }]
    out_in_nodes = []

    [[nodes]]
    id = "bus"
    x = 400
    label = "Bus"
    in_nodes = []
    out_nodes = []
    out_in_nodes = [{ label = "data", value = "0x00" }]
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_render_simple_graph() {
    let builder = DiagramBuilder::default();
    let document = builder.parse(TWO_NODES).expect("Failed to parse document");
    let mut graph = builder.build_graph(document).expect("Failed to build graph");
    let svg = builder.render_svg(&mut graph).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains(r#"data-group="adder""#));
    assert!(svg.contains(r#"data-name="inNode-rect-1""#));
    assert!(svg.contains(r#"data-name="outInNode-value-0""#));
    assert!(svg.contains(">\nAdder\n</text>"), "{svg}");
}

#[test]
fn test_parse_invalid_toml_returns_input_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse("[[nodes]\nid = ");
    assert!(matches!(result, Err(ArmillaryError::Input { .. })));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let source = "[[nodes]]\nid = \"a\"\n[[nodes]]\nid = \"a\"\n";
    let builder = DiagramBuilder::default();
    let document = builder.parse(source).unwrap();
    assert!(matches!(
        builder.build_graph(document),
        Err(ArmillaryError::Graph(GraphError::DuplicateNode(_)))
    ));
}

#[test]
fn test_missing_lists_skip_node_unless_strict() {
    let source = r#"
        [[nodes]]
        id = "ok"
        in_nodes = []
        out_nodes = []
        out_in_nodes = []

        [[nodes]]
        id = "partial"
        x = 300
        in_nodes = []
    "#;

    let lenient = DiagramBuilder::default();
    let mut graph = lenient.build_graph(lenient.parse(source).unwrap()).unwrap();
    let svg = lenient.render_svg(&mut graph).unwrap();
    assert!(svg.contains(r#"data-group="ok""#));
    assert!(!svg.contains(r#"data-group="partial""#));
    assert!(graph.node_bounds("partial").is_err());

    let strict = DiagramBuilder::default().with_strict(true);
    let mut graph = strict.build_graph(strict.parse(source).unwrap()).unwrap();
    match strict.render_svg(&mut graph) {
        Err(ArmillaryError::Draw(failures)) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0, "partial");
        }
        other => panic!("expected a draw error, got {other:?}"),
    }
}

#[test]
fn test_allow_missing_ports_from_config() {
    let config: AppConfig = toml::from_str("[style]\nallow_missing_ports = true").unwrap();
    let builder = DiagramBuilder::new(config).with_strict(true);
    let document = builder.parse("[[nodes]]\nid = \"bare\"\nlabel = \"Bare\"").unwrap();
    let mut graph = builder.build_graph(document).unwrap();

    assert!(builder.render_svg(&mut graph).is_ok());
    let bounds = graph.node_bounds("bare").unwrap().unwrap();
    assert_eq!(bounds.height(), 40.0);
}

#[test]
fn test_export_svg_writes_rendered_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.svg");
    let builder = DiagramBuilder::default();

    let mut graph = builder.build_graph(builder.parse(TWO_NODES).unwrap()).unwrap();
    builder
        .export_svg(&mut graph, path.to_str().unwrap())
        .expect("Failed to export");
    let written = std::fs::read_to_string(&path).unwrap();

    let mut again = builder.build_graph(builder.parse(TWO_NODES).unwrap()).unwrap();
    assert_eq!(written, builder.render_svg(&mut again).unwrap());

    let missing_dir = dir.path().join("absent").join("graph.svg");
    assert!(matches!(
        builder.export_svg(&mut graph, missing_dir.to_str().unwrap()),
        Err(ArmillaryError::Export(_))
    ));
}

#[test]
fn test_invalid_config_is_reported() {
    let config: AppConfig = toml::from_str("[style]\nheader_fill = \"nope\"").unwrap();
    let builder = DiagramBuilder::new(config);
    let document = builder.parse(TWO_NODES).unwrap();
    assert!(matches!(
        builder.build_graph(document),
        Err(ArmillaryError::Config(_))
    ));
}

#[test]
fn test_graph_from_builder_dispatches_clicks() {
    let builder = DiagramBuilder::default();
    let mut graph = builder.build_graph(builder.parse(TWO_NODES).unwrap()).unwrap();
    builder.render_svg(&mut graph).unwrap();

    let groups = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&groups);
    graph.on(GraphEvent::NodeClick, move |event| {
        sink.borrow_mut().push(event.port_group());
    });

    // The bus node has a single outIn row at y = 30..50
    graph.click(Point::new(450.0, 40.0)).unwrap();
    // Adder's out row is its third row, at y = 70..90
    graph.click(Point::new(50.0, 80.0)).unwrap();
    // Header
    graph.click(Point::new(50.0, 5.0)).unwrap();

    assert_eq!(
        *groups.borrow(),
        vec![Some("outIn-group"), Some("out-group"), None]
    );
    assert_eq!(graph.anchor_points("bus").unwrap().len(), 2);
}
