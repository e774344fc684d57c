//! Measure pass: resolves every node's box size top-down from a layout root.

use slotmap::SlotMap;
use tracing::warn;

use crate::core::geometry::{Point, Size, sanitize_size};
use crate::core::layout::{clamp_length, content_extent, resolve_dimension};
use crate::core::{
    ChildBox, Dimension, Insets, InvalidationKind, Node, NodeId, PropertyKey, PropertyStore,
};

use super::{DrainReport, SceneEvent, SceneGraph};

/// Space offered by a parent per axis; `None` when it is not known yet.
#[derive(Debug, Clone, Copy, Default)]
struct Available {
    width: Option<f64>,
    height: Option<f64>,
}

impl Available {
    fn inner_of(size: Size, padding: Insets) -> Self {
        Self {
            width: Some((size.width - padding.horizontal()).max(0.0)),
            height: Some((size.height - padding.vertical()).max(0.0)),
        }
    }
}

/// Size request read from a node's properties.
struct SizeRequest {
    width: Dimension,
    height: Dimension,
    min_width: Option<f64>,
    max_width: Option<f64>,
    min_height: Option<f64>,
    max_height: Option<f64>,
}

impl SizeRequest {
    fn read(props: &PropertyStore) -> Self {
        Self {
            width: props.dimension(PropertyKey::Width),
            height: props.dimension(PropertyKey::Height),
            min_width: props.optional_number(PropertyKey::MinWidth),
            max_width: props.optional_number(PropertyKey::MaxWidth),
            min_height: props.optional_number(PropertyKey::MinHeight),
            max_height: props.optional_number(PropertyKey::MaxHeight),
        }
    }
}

/// Layout box of `node` as seen by its container.
pub(super) fn child_box(node: &Node, size: Size) -> ChildBox {
    let props = &node.props;
    ChildBox {
        size,
        margin: Insets::margin(props),
        position: Point::new(
            props.number(PropertyKey::X, 0.0),
            props.number(PropertyKey::Y, 0.0),
        ),
        horizontal_align: props.align(PropertyKey::HorizontalAlign),
        vertical_align: props.align(PropertyKey::VerticalAlign),
    }
}

struct MeasureRun {
    frame: u64,
    failures: Vec<(NodeId, String)>,
}

impl MeasureRun {
    fn fail(&mut self, id: NodeId, message: String) {
        if !self.failures.iter().any(|(failed, _)| *failed == id) {
            self.failures.push((id, message));
        }
    }
}

fn measure_node(
    nodes: &mut SlotMap<NodeId, Node>,
    id: NodeId,
    available: Available,
    run: &mut MeasureRun,
) -> Size {
    let Some(node) = nodes.get(id) else {
        return Size::ZERO;
    };
    let request = SizeRequest::read(&node.props);
    let padding = Insets::padding(&node.props);
    let mode = node.props.layout_mode();
    let children = node.children.clone();
    let natural = match node.content.as_ref().map(|content| content.measure(&node.props)) {
        Some(Ok(size)) => sanitize_size(size),
        Some(Err(error)) => {
            run.fail(id, error.to_string());
            Size::ZERO
        }
        None => Size::ZERO,
    };

    let explicit_width = resolve_dimension(request.width, available.width)
        .map(|width| clamp_length(width, request.min_width, request.max_width));
    let explicit_height = resolve_dimension(request.height, available.height)
        .map(|height| clamp_length(height, request.min_height, request.max_height));
    let offered = Available {
        width: explicit_width.map(|width| (width - padding.horizontal()).max(0.0)),
        height: explicit_height.map(|height| (height - padding.vertical()).max(0.0)),
    };

    let mut boxes = Vec::with_capacity(children.len());
    for child in &children {
        let size = measure_node(nodes, *child, offered, run);
        if let Some(child_node) = nodes.get(*child) {
            boxes.push(child_box(child_node, size));
        }
    }
    let extent = content_extent(mode, &boxes);

    let size = Size::new(
        explicit_width.unwrap_or_else(|| {
            clamp_length(
                natural.width.max(extent.width) + padding.horizontal(),
                request.min_width,
                request.max_width,
            )
        }),
        explicit_height.unwrap_or_else(|| {
            clamp_length(
                natural.height.max(extent.height) + padding.vertical(),
                request.min_height,
                request.max_height,
            )
        }),
    );

    // Percent children of an auto-sized axis resolve against the final box.
    if offered.width.is_none() || offered.height.is_none() {
        let inner = Available::inner_of(size, padding);
        for child in &children {
            let needs_second_pass = nodes.get(*child).is_some_and(|child_node| {
                let child_request = SizeRequest::read(&child_node.props);
                (offered.width.is_none() && matches!(child_request.width, Dimension::Percent(_)))
                    || (offered.height.is_none()
                        && matches!(child_request.height, Dimension::Percent(_)))
            });
            if needs_second_pass {
                measure_node(nodes, *child, inner, run);
            }
        }
    }

    if let Some(node) = nodes.get_mut(id) {
        node.geometry.measured = Some(size);
        node.geometry.layout_frame = run.frame;
    }
    size
}

fn collect_subtree(nodes: &SlotMap<NodeId, Node>, id: NodeId, out: &mut Vec<(NodeId, Option<Size>)>) {
    let Some(node) = nodes.get(id) else {
        return;
    };
    out.push((id, node.geometry.measured));
    for child in &node.children {
        collect_subtree(nodes, *child, out);
    }
}

impl SceneGraph {
    /// Inner box of `id`'s parent, or nothing for the root and unmeasured parents.
    fn offered_space(&self, id: NodeId) -> Available {
        let parent = self
            .nodes
            .get(id)
            .and_then(|node| node.parent)
            .and_then(|parent| self.nodes.get(parent));
        match parent {
            Some(parent) => match parent.geometry.measured {
                Some(measured) => Available::inner_of(measured, Insets::padding(&parent.props)),
                None => Available::default(),
            },
            None => Available::default(),
        }
    }

    pub(super) fn validate_layout(&mut self, target: NodeId, frame: u64, report: &mut DrainReport) {
        let Some(node) = self.nodes.get(target) else {
            return;
        };
        if node.geometry.layout_frame == frame {
            return;
        }
        let parent = node.parent;

        let mut previous = Vec::new();
        collect_subtree(&self.nodes, target, &mut previous);

        let available = self.offered_space(target);
        let mut run = MeasureRun {
            frame,
            failures: Vec::new(),
        };
        measure_node(&mut self.nodes, target, available, &mut run);

        for (id, message) in &run.failures {
            warn!(?id, error = %message, "layout measure failed");
            report.failures += 1;
            self.emit(SceneEvent::ValidationFailed {
                node: *id,
                kind: InvalidationKind::Layout,
                message: message.clone(),
            });
        }

        for (id, before) in previous {
            let after = self.nodes.get(id).and_then(|node| node.geometry.measured);
            if after != before {
                self.queue.invalidate(id, InvalidationKind::Redraw);
            }
            if !run.failures.iter().any(|(failed, _)| *failed == id) {
                report.count(InvalidationKind::Layout, 1);
                self.emit(SceneEvent::Validated {
                    node: id,
                    kind: InvalidationKind::Layout,
                });
            }
        }

        self.queue
            .invalidate(parent.unwrap_or(target), InvalidationKind::Position);
    }
}
