use std::cell::RefCell;
use std::rc::Rc;

use chart_scene::api::{EventKind, SceneConfig, SceneEvent, SceneGraph};
use chart_scene::core::{
    Color, InvalidationKind, NodeContent, NodeId, PropertyKey, PropertyStore, Rect, Size,
};
use chart_scene::error::SceneResult;
use chart_scene::render::{DrawPrimitive, NullRenderer, Paint, RectPrimitive};

type ValidationLog = Rc<RefCell<Vec<(NodeId, InvalidationKind)>>>;

fn scene() -> SceneGraph {
    SceneGraph::new(SceneConfig::new(400.0, 300.0)).expect("scene init")
}

fn watch_validations(graph: &mut SceneGraph, nodes: &[NodeId]) -> ValidationLog {
    let log: ValidationLog = Rc::new(RefCell::new(Vec::new()));
    for node in nodes {
        let sink = Rc::clone(&log);
        graph
            .subscribe(*node, EventKind::Validated, move |event| {
                if let SceneEvent::Validated { node, kind } = event {
                    sink.borrow_mut().push((*node, *kind));
                }
            })
            .expect("subscribe");
    }
    log
}

fn filled_rect(graph: &mut SceneGraph, width: f64, height: f64) -> NodeId {
    let node = graph.create_rectangle();
    graph.set(node, PropertyKey::Width, width);
    graph.set(node, PropertyKey::Height, height);
    graph.set(node, PropertyKey::Fill, Color::rgb(0.2, 0.4, 0.8));
    node
}

#[test]
fn repeated_changes_validate_each_pass_once_per_frame() {
    let mut graph = scene();
    let node = filled_rect(&mut graph, 10.0, 10.0);
    graph.add_child(graph.root(), node).expect("attach");
    graph.drain();

    let log = watch_validations(&mut graph, &[node]);
    for step in 0..5 {
        let step = f64::from(step);
        graph.set(node, PropertyKey::Width, 20.0 + step);
        graph.set(node, PropertyKey::X, step);
    }
    let report = graph.drain();

    assert_eq!(
        log.borrow().as_slice(),
        &[
            (node, InvalidationKind::Layout),
            (node, InvalidationKind::Position),
            (node, InvalidationKind::Redraw),
        ]
    );
    assert_eq!(report.failures, 0);
    assert_eq!(graph.measured_size(node), Some(Size::new(24.0, 10.0)));
    let bounds = graph.bounds(node).expect("bounds");
    assert_eq!(bounds.x0, 4.0);
}

#[test]
fn passes_run_layout_then_position_then_redraw() {
    let mut graph = scene();
    let container = graph.create_container();
    let first = filled_rect(&mut graph, 10.0, 10.0);
    let second = filled_rect(&mut graph, 20.0, 5.0);
    graph.add_child(container, first).expect("attach first");
    graph.add_child(container, second).expect("attach second");

    let log = watch_validations(&mut graph, &[container, first, second]);
    graph
        .add_child(graph.root(), container)
        .expect("attach container");
    graph.drain();

    let log = log.borrow();
    let last_of = |kind: InvalidationKind| log.iter().rposition(|(_, logged)| *logged == kind);
    let first_of = |kind: InvalidationKind| log.iter().position(|(_, logged)| *logged == kind);
    let last_layout = last_of(InvalidationKind::Layout).expect("layout ran");
    let first_position = first_of(InvalidationKind::Position).expect("position ran");
    let last_position = last_of(InvalidationKind::Position).expect("position ran");
    let first_redraw = first_of(InvalidationKind::Redraw).expect("redraw ran");
    assert!(last_layout < first_position);
    assert!(last_position < first_redraw);

    for node in [container, first, second] {
        let layouts = log
            .iter()
            .filter(|entry| **entry == (node, InvalidationKind::Layout))
            .count();
        assert_eq!(layouts, 1, "one layout per node per frame");
    }
}

#[test]
fn layout_requests_rise_to_auto_sized_ancestors() {
    let mut graph = scene();
    let container = graph.create_container();
    let child = filled_rect(&mut graph, 30.0, 10.0);
    graph.add_child(container, child).expect("attach child");
    graph.add_child(graph.root(), container).expect("attach");
    graph.drain();
    assert_eq!(graph.measured_size(container), Some(Size::new(30.0, 10.0)));

    graph.set(child, PropertyKey::Width, 70.0);
    assert!(
        graph
            .pending_kinds(container)
            .contains_kind(InvalidationKind::Layout)
    );
    assert!(graph.pending_kinds(child).is_none());

    graph.drain();
    assert_eq!(graph.measured_size(container), Some(Size::new(70.0, 10.0)));
    assert!(!graph.has_pending());
}

#[test]
fn world_transforms_cascade_to_descendants_in_one_drain() {
    let mut graph = scene();
    let outer = graph.create_container();
    let inner = graph.create_container();
    let leaf = filled_rect(&mut graph, 5.0, 5.0);
    graph.add_child(graph.root(), outer).expect("attach outer");
    graph.add_child(outer, inner).expect("attach inner");
    graph.add_child(inner, leaf).expect("attach leaf");
    graph.set(inner, PropertyKey::X, 10.0);
    graph.set(leaf, PropertyKey::Y, 3.0);
    graph.drain();

    graph.set(outer, PropertyKey::X, 100.0);
    graph.set(outer, PropertyKey::Scale, 2.0);
    let report = graph.drain();

    let bounds = graph.bounds(leaf).expect("leaf bounds");
    assert_eq!((bounds.x0, bounds.y0), (120.0, 6.0));
    assert_eq!((bounds.width(), bounds.height()), (10.0, 10.0));
    assert_eq!(report.layout, 0);
    assert_eq!(report.position, 3);
}

#[test]
fn idle_drain_reports_nothing() {
    let mut graph = scene();
    graph.drain();
    let report = graph.drain();
    assert!(report.is_idle());
    assert!(!graph.has_pending());
}

#[test]
fn content_failures_are_contained_per_node() {
    let mut graph = scene();
    let broken = graph.create_label("oops");
    graph.set(broken, PropertyKey::FontSize, -4.0);
    let healthy = filled_rect(&mut graph, 8.0, 8.0);
    graph.add_child(graph.root(), broken).expect("attach broken");
    graph.add_child(graph.root(), healthy).expect("attach healthy");

    let failures = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&failures);
    graph
        .subscribe(broken, EventKind::ValidationFailed, move |_| {
            *sink.borrow_mut() += 1;
        })
        .expect("subscribe");

    let report = graph.drain();

    assert!(report.failures >= 1);
    assert!(*failures.borrow() >= 1);
    assert_eq!(graph.measured_size(healthy), Some(Size::new(8.0, 8.0)));
    assert_eq!(graph.display_list(healthy).len(), 1);
    assert!(graph.display_list(broken).is_empty());
}

struct NanBar;

impl NodeContent for NanBar {
    fn measure(&self, _props: &PropertyStore) -> SceneResult<Size> {
        Ok(Size::new(4.0, 4.0))
    }

    fn paint(&self, _props: &PropertyStore, _size: Size) -> SceneResult<Vec<DrawPrimitive>> {
        Ok(vec![DrawPrimitive::Rect(RectPrimitive::new(
            Rect::new(0.0, 0.0, f64::NAN, 1.0),
            0.0,
            Paint::filled(Color::BLACK),
        ))])
    }
}

#[test]
fn malformed_paint_output_is_dropped_without_blanking_the_frame() {
    let mut graph = scene();
    let broken = graph.create_node("NanBar", Some(Box::new(NanBar)));
    let healthy = filled_rect(&mut graph, 8.0, 8.0);
    graph.add_child(graph.root(), broken).expect("attach broken");
    graph.add_child(graph.root(), healthy).expect("attach healthy");

    let failures = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&failures);
    graph
        .subscribe(broken, EventKind::ValidationFailed, move |event| {
            if let SceneEvent::ValidationFailed { kind, .. } = event {
                sink.borrow_mut().push(*kind);
            }
        })
        .expect("subscribe");

    let mut renderer = NullRenderer::default();
    let report = graph.render(&mut renderer).expect("render survives a bad node");

    assert_eq!(report.failures, 1);
    assert_eq!(failures.borrow().as_slice(), &[InvalidationKind::Redraw]);
    assert!(graph.display_list(broken).is_empty());
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_draw_count, 1);
    assert_eq!(graph.build_render_frame().paint_order(), vec![healthy]);
}

#[test]
fn moving_a_child_remeasures_its_auto_sized_container() {
    let mut graph = scene();
    let container = graph.create_container();
    let child = filled_rect(&mut graph, 10.0, 10.0);
    graph.add_child(container, child).expect("attach child");
    graph.add_child(graph.root(), container).expect("attach container");
    graph.drain();
    assert_eq!(graph.measured_size(container), Some(Size::new(10.0, 10.0)));

    graph.set(child, PropertyKey::X, 50.0);
    assert!(
        graph
            .pending_kinds(container)
            .contains_kind(InvalidationKind::Layout)
    );
    graph.drain();
    assert_eq!(graph.measured_size(container), Some(Size::new(60.0, 10.0)));
    let bounds = graph.bounds(child).expect("child bounds");
    assert_eq!(bounds.x0, 50.0);

    graph.unset(child, PropertyKey::X);
    graph.drain();
    assert_eq!(graph.measured_size(container), Some(Size::new(10.0, 10.0)));
}

#[test]
fn moving_a_child_of_a_fixed_container_only_repositions() {
    let mut graph = scene();
    let container = graph.create_container();
    graph.set(container, PropertyKey::Width, 100.0);
    graph.set(container, PropertyKey::Height, 100.0);
    let child = filled_rect(&mut graph, 10.0, 10.0);
    graph.add_child(container, child).expect("attach child");
    graph.add_child(graph.root(), container).expect("attach container");
    graph.drain();

    graph.set(child, PropertyKey::Y, 30.0);
    let report = graph.drain();

    assert_eq!(report.layout, 0);
    assert_eq!(graph.measured_size(container), Some(Size::new(100.0, 100.0)));
    assert_eq!(graph.bounds(child).map(|bounds| bounds.y0), Some(30.0));
}
