//! Position pass: arranges children and composes world transforms.

use slotmap::SlotMap;

use crate::core::geometry::{Affine, Point, Size, Vec2, node_transform};
use crate::core::layout::arrange;
use crate::core::{Insets, InvalidationKind, Node, NodeId, PropertyKey};

use super::layout_pass::child_box;
use super::{DrainReport, SceneEvent, SceneGraph};

struct PositionRun {
    frame: u64,
    visited: Vec<NodeId>,
    changed: Vec<NodeId>,
}

fn local_transform(node: &Node) -> (Affine, f64) {
    let props = &node.props;
    let offset = Vec2::new(
        props.number(PropertyKey::X, 0.0) + props.number(PropertyKey::Dx, 0.0),
        props.number(PropertyKey::Y, 0.0) + props.number(PropertyKey::Dy, 0.0),
    );
    let transform = node_transform(
        node.geometry.arranged_offset + offset,
        props.number(PropertyKey::Rotation, 0.0),
        props.number(PropertyKey::Scale, 1.0),
    );
    let opacity = props.number(PropertyKey::Opacity, 1.0).clamp(0.0, 1.0);
    (transform, opacity)
}

fn position_node(
    nodes: &mut SlotMap<NodeId, Node>,
    id: NodeId,
    parent_world: Affine,
    parent_opacity: f64,
    run: &mut PositionRun,
) {
    let Some(node) = nodes.get_mut(id) else {
        return;
    };
    let (local, opacity) = local_transform(node);
    let world = parent_world * local;
    let world_opacity = parent_opacity * opacity;
    if node.geometry.world != Some(world) || node.geometry.world_opacity != world_opacity {
        run.changed.push(id);
    }
    node.geometry.world = Some(world);
    node.geometry.world_opacity = world_opacity;
    node.geometry.position_frame = run.frame;
    run.visited.push(id);

    let children = node.children.clone();
    if children.is_empty() {
        return;
    }
    let padding = Insets::padding(&node.props);
    let mode = node.props.layout_mode();
    let measured = node.geometry.measured.unwrap_or(Size::ZERO);
    let inner = Size::new(
        (measured.width - padding.horizontal()).max(0.0),
        (measured.height - padding.vertical()).max(0.0),
    );

    let boxes: Vec<_> = children
        .iter()
        .filter_map(|child| {
            nodes.get(*child).map(|child_node| {
                child_box(child_node, child_node.geometry.measured.unwrap_or(Size::ZERO))
            })
        })
        .collect();
    let offsets = arrange(mode, inner, &boxes);
    let origin = Vec2::new(padding.left, padding.top);

    for (child, offset) in children.iter().zip(offsets) {
        if let Some(child_node) = nodes.get_mut(*child) {
            child_node.geometry.arranged_offset = offset + origin;
        }
        position_node(nodes, *child, world, world_opacity, run);
    }
}

impl SceneGraph {
    pub(super) fn validate_position(&mut self, target: NodeId, frame: u64, report: &mut DrainReport) {
        let Some(node) = self.nodes.get(target) else {
            return;
        };
        if node.geometry.position_frame == frame {
            return;
        }
        let (parent_world, parent_opacity) = node
            .parent
            .and_then(|parent| self.nodes.get(parent))
            .map_or((Affine::IDENTITY, 1.0), |parent| {
                (
                    parent.geometry.world.unwrap_or(Affine::IDENTITY),
                    parent.geometry.world_opacity,
                )
            });

        let mut run = PositionRun {
            frame,
            visited: Vec::new(),
            changed: Vec::new(),
        };
        position_node(&mut self.nodes, target, parent_world, parent_opacity, &mut run);

        for id in run.changed {
            self.queue.invalidate(id, InvalidationKind::Redraw);
        }
        report.count(InvalidationKind::Position, run.visited.len());
        for id in run.visited {
            self.emit(SceneEvent::Validated {
                node: id,
                kind: InvalidationKind::Position,
            });
        }
    }

    /// Offset assigned by the parent's arrangement, before `x`/`y`.
    #[must_use]
    pub fn arranged_offset(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id).map(|node| node.geometry.arranged_offset)
    }
}
