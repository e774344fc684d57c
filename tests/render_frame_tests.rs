use chart_scene::api::{SceneConfig, SceneGraph};
use chart_scene::core::{Color, NodeId, PropertyKey, PropertyValue, Rect};
use chart_scene::render::{DrawCommand, DrawPrimitive, NullRenderer};

fn scene() -> SceneGraph {
    SceneGraph::new(SceneConfig::new(320.0, 240.0)).expect("scene init")
}

fn filled_rect(graph: &mut SceneGraph, parent: NodeId) -> NodeId {
    let node = graph.create_rectangle();
    graph.set(node, PropertyKey::Width, 10.0);
    graph.set(node, PropertyKey::Height, 10.0);
    graph.set(node, PropertyKey::Fill, Color::rgb(0.9, 0.1, 0.1));
    graph.add_child(parent, node).expect("attach");
    node
}

#[test]
fn siblings_paint_by_z_index_then_insertion_order() {
    let mut graph = scene();
    let root = graph.root();
    let raised = filled_rect(&mut graph, root);
    let first = filled_rect(&mut graph, root);
    let second = filled_rect(&mut graph, root);
    graph.set(raised, PropertyKey::ZIndex, 5.0);
    graph.drain();

    let frame = graph.build_render_frame();

    assert_eq!(frame.paint_order(), vec![first, second, raised]);
    assert!(frame.validate().is_ok());
}

#[test]
fn clip_rects_wrap_their_subtree() {
    let mut graph = scene();
    let root = graph.root();
    let group = graph.create_container();
    graph.set(
        group,
        PropertyKey::Clip,
        PropertyValue::Rect(Rect::new(0.0, 0.0, 50.0, 50.0)),
    );
    graph.add_child(root, group).expect("attach group");
    let inside = filled_rect(&mut graph, group);
    let outside = filled_rect(&mut graph, root);
    graph.drain();

    let frame = graph.build_render_frame();

    assert!(matches!(frame.commands.first(), Some(DrawCommand::PushClip { .. })));
    assert!(matches!(
        frame.commands.get(1),
        Some(DrawCommand::Draw { node, .. }) if *node == inside
    ));
    assert!(matches!(frame.commands.get(2), Some(DrawCommand::PopClip)));
    assert!(matches!(
        frame.commands.get(3),
        Some(DrawCommand::Draw { node, .. }) if *node == outside
    ));
}

#[test]
fn hidden_and_transparent_subtrees_are_skipped() {
    let mut graph = scene();
    let root = graph.root();
    let hidden_group = graph.create_container();
    graph.add_child(root, hidden_group).expect("attach");
    let hidden_child = filled_rect(&mut graph, hidden_group);
    graph.set(hidden_group, PropertyKey::Visible, false);

    let faded = filled_rect(&mut graph, root);
    graph.set(faded, PropertyKey::Opacity, 0.0);
    let shown = filled_rect(&mut graph, root);
    graph.set(shown, PropertyKey::Opacity, 0.5);
    graph.drain();

    let frame = graph.build_render_frame();

    assert_eq!(frame.paint_order(), vec![shown]);
    assert_eq!(frame.primitives_for(hidden_child).count(), 0);
    let opacity = frame.commands.iter().find_map(|command| match command {
        DrawCommand::Draw { opacity, .. } => Some(*opacity),
        _ => None,
    });
    assert_eq!(opacity, Some(0.5));
}

#[test]
fn render_drains_then_hands_a_validated_frame_to_the_backend() {
    let mut graph = scene();
    let root = graph.root();
    let node = filled_rect(&mut graph, root);
    graph.set(node, PropertyKey::X, 15.0);
    let mut renderer = NullRenderer::default();

    let report = graph.render(&mut renderer).expect("render");

    assert!(report.layout > 0);
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_draw_count, 1);
    assert_eq!(renderer.last_clip_count, 0);

    let frame = graph.build_render_frame();
    let Some(DrawCommand::Draw {
        transform,
        primitive,
        ..
    }) = frame.commands.first()
    else {
        panic!("expected a draw command");
    };
    assert_eq!(transform.translation().x, 15.0);
    assert!(matches!(primitive, DrawPrimitive::Rect(rect) if rect.rect.width() == 10.0));
}

#[test]
fn display_lists_follow_paint_property_changes() {
    let mut graph = scene();
    let root = graph.root();
    let node = filled_rect(&mut graph, root);
    graph.drain();
    assert_eq!(graph.display_list(node).len(), 1);

    graph.set(node, PropertyKey::FillOpacity, 0.25);
    graph.drain();
    let Some(DrawPrimitive::Rect(rect)) = graph.display_list(node).first() else {
        panic!("expected a rect primitive");
    };
    let fill = rect.paint.fill.expect("fill");
    assert!((fill.alpha - 0.25).abs() < 1e-12);
}
