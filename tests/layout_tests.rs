use chart_scene::api::{SceneConfig, SceneGraph};
use chart_scene::core::{Align, LayoutMode, NodeId, Point, PropertyKey, PropertyValue, Size, percent};

fn scene() -> SceneGraph {
    SceneGraph::new(SceneConfig::new(500.0, 400.0)).expect("scene init")
}

fn sized(graph: &mut SceneGraph, width: f64, height: f64) -> NodeId {
    let node = graph.create_rectangle();
    graph.set(node, PropertyKey::Width, width);
    graph.set(node, PropertyKey::Height, height);
    node
}

fn container(graph: &mut SceneGraph, mode: LayoutMode) -> NodeId {
    let node = graph.create_container();
    graph.set(node, PropertyKey::Layout, PropertyValue::Layout(mode));
    graph.add_child(graph.root(), node).expect("attach container");
    node
}

fn set_padding(graph: &mut SceneGraph, node: NodeId, padding: f64) {
    for key in [
        PropertyKey::PaddingTop,
        PropertyKey::PaddingRight,
        PropertyKey::PaddingBottom,
        PropertyKey::PaddingLeft,
    ] {
        graph.set(node, key, padding);
    }
}

#[test]
fn vertical_stack_sizes_to_children_plus_padding() {
    let mut graph = scene();
    let stack = container(&mut graph, LayoutMode::Vertical);
    set_padding(&mut graph, stack, 5.0);
    let top = sized(&mut graph, 20.0, 10.0);
    let bottom = sized(&mut graph, 30.0, 15.0);
    graph.add_child(stack, top).expect("attach");
    graph.add_child(stack, bottom).expect("attach");

    graph.drain();

    assert_eq!(graph.measured_size(stack), Some(Size::new(40.0, 35.0)));
    assert_eq!(graph.arranged_offset(top), Some(Point::new(5.0, 5.0)));
    assert_eq!(graph.arranged_offset(bottom), Some(Point::new(5.0, 15.0)));
}

#[test]
fn horizontal_row_honors_margins_and_cross_axis_alignment() {
    let mut graph = scene();
    let row = container(&mut graph, LayoutMode::Horizontal);
    graph.set(row, PropertyKey::Height, 50.0);
    let first = sized(&mut graph, 10.0, 10.0);
    let second = sized(&mut graph, 10.0, 20.0);
    graph.set(first, PropertyKey::MarginRight, 4.0);
    for node in [first, second] {
        graph.set(
            node,
            PropertyKey::VerticalAlign,
            PropertyValue::Align(Align::Center),
        );
        graph.add_child(row, node).expect("attach");
    }

    graph.drain();

    assert_eq!(graph.measured_size(row), Some(Size::new(24.0, 50.0)));
    assert_eq!(graph.arranged_offset(first), Some(Point::new(0.0, 20.0)));
    assert_eq!(graph.arranged_offset(second), Some(Point::new(14.0, 15.0)));
}

#[test]
fn grid_places_children_in_rows_of_columns() {
    let mut graph = scene();
    let grid = container(&mut graph, LayoutMode::Grid(2));
    let cells: Vec<_> = (0..4).map(|_| sized(&mut graph, 10.0, 10.0)).collect();
    for cell in &cells {
        graph.add_child(grid, *cell).expect("attach");
    }

    graph.drain();

    assert_eq!(graph.measured_size(grid), Some(Size::new(20.0, 20.0)));
    let offsets: Vec<_> = cells
        .iter()
        .map(|cell| graph.arranged_offset(*cell).expect("offset"))
        .collect();
    assert_eq!(
        offsets,
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ]
    );
}

#[test]
fn sizes_clamp_to_bounds_and_never_go_negative() {
    let mut graph = scene();
    let wide = sized(&mut graph, 500.0, 10.0);
    graph.set(wide, PropertyKey::MaxWidth, 100.0);
    let narrow = sized(&mut graph, 5.0, 10.0);
    graph.set(narrow, PropertyKey::MinWidth, 25.0);
    let negative = sized(&mut graph, -10.0, -3.0);
    for node in [wide, narrow, negative] {
        graph.add_child(graph.root(), node).expect("attach");
    }

    graph.drain();

    assert_eq!(graph.measured_size(wide), Some(Size::new(100.0, 10.0)));
    assert_eq!(graph.measured_size(narrow), Some(Size::new(25.0, 10.0)));
    assert_eq!(graph.measured_size(negative), Some(Size::new(0.0, 0.0)));
}

#[test]
fn percent_children_of_auto_containers_use_the_final_box() {
    let mut graph = scene();
    let group = container(&mut graph, LayoutMode::Absolute);
    let fixed = sized(&mut graph, 40.0, 20.0);
    let half = graph.create_container();
    graph.set(half, PropertyKey::Width, percent(50.0));
    graph.set(half, PropertyKey::Height, 10.0);
    graph.add_child(group, fixed).expect("attach");
    graph.add_child(group, half).expect("attach");

    graph.drain();

    assert_eq!(graph.measured_size(group), Some(Size::new(40.0, 20.0)));
    assert_eq!(graph.measured_size(half), Some(Size::new(20.0, 10.0)));
}

#[test]
fn resizing_the_surface_reflows_percent_children() {
    let mut graph = scene();
    let panel = graph.create_container();
    graph.set(panel, PropertyKey::Width, percent(50.0));
    graph.set(panel, PropertyKey::Height, percent(25.0));
    graph.add_child(graph.root(), panel).expect("attach");
    graph.drain();
    assert_eq!(graph.measured_size(panel), Some(Size::new(250.0, 100.0)));

    graph.resize_surface(1_000.0, 800.0).expect("resize");
    graph.drain();
    assert_eq!(graph.measured_size(panel), Some(Size::new(500.0, 200.0)));
    assert!(graph.resize_surface(-1.0, 10.0).is_err());
}

#[test]
fn circles_and_labels_measure_their_content() {
    let mut graph = scene();
    let circle = graph.create_circle();
    graph.set(circle, PropertyKey::Radius, 6.0);
    let label = graph.create_label("abcd");
    graph.set(label, PropertyKey::FontSize, 10.0);
    graph.add_child(graph.root(), circle).expect("attach");
    graph.add_child(graph.root(), label).expect("attach");

    graph.drain();

    assert_eq!(graph.measured_size(circle), Some(Size::new(12.0, 12.0)));
    let label_size = graph.measured_size(label).expect("label size");
    assert!((label_size.width - 24.0).abs() < 1e-9);
    assert!((label_size.height - 12.0).abs() < 1e-9);
}

#[test]
fn coordinate_conversion_round_trips_through_world_transforms() {
    let mut graph = scene();
    let node = sized(&mut graph, 20.0, 20.0);
    graph.set(node, PropertyKey::X, 30.0);
    graph.set(node, PropertyKey::Y, 40.0);
    graph.set(node, PropertyKey::Scale, 2.0);
    graph.add_child(graph.root(), node).expect("attach");
    graph.drain();

    let global = graph
        .local_to_global(node, Point::new(5.0, 5.0))
        .expect("global");
    assert_eq!(global, Point::new(40.0, 50.0));
    let local = graph.global_to_local(node, global).expect("local");
    assert!((local.x - 5.0).abs() < 1e-9);
    assert!((local.y - 5.0).abs() < 1e-9);
}
