use tracing::{debug, trace};

use crate::core::{Dimension, InvalidationKind, InvalidationKinds, NodeId, PropertyKey};

use super::SceneGraph;
use super::scene_graph::node_depth;

/// Outcome of one [`SceneGraph::drain`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainReport {
    /// Nodes measured by the layout pass.
    pub layout: usize,
    /// Nodes whose world transform was recomputed.
    pub position: usize,
    /// Nodes repainted.
    pub redraw: usize,
    /// Per-node handler failures (logged and skipped).
    pub failures: usize,
    /// Queued handles that were stale or detached.
    pub skipped: usize,
}

impl DrainReport {
    #[must_use]
    pub fn validated(&self) -> usize {
        self.layout + self.position + self.redraw
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.validated() == 0 && self.failures == 0 && self.skipped == 0
    }

    pub(super) fn count(&mut self, kind: InvalidationKind, nodes: usize) {
        match kind {
            InvalidationKind::Layout => self.layout += nodes,
            InvalidationKind::Position => self.position += nodes,
            InvalidationKind::Redraw => self.redraw += nodes,
        }
    }
}

impl SceneGraph {
    /// Schedules `kind` for `id`; repeated calls within a frame coalesce.
    ///
    /// Layout requests are raised to the highest auto-sized ancestor chain
    /// member, whose measurement covers the node. Returns `false` for a stale
    /// handle or an already-queued entry.
    pub fn invalidate(&mut self, id: NodeId, kind: InvalidationKind) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        let target = match kind {
            InvalidationKind::Layout => self.layout_root_for(id),
            InvalidationKind::Position | InvalidationKind::Redraw => id,
        };
        let queued = self.queue.invalidate(target, kind);
        if queued {
            trace!(?id, ?target, ?kind, "invalidated");
        }
        queued
    }

    pub(super) fn invalidate_kinds(&mut self, id: NodeId, kinds: InvalidationKinds) {
        for kind in kinds.iter() {
            self.invalidate(id, kind);
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    #[must_use]
    pub fn pending_kinds(&self, id: NodeId) -> InvalidationKinds {
        self.queue.pending_kinds(id)
    }

    /// Runs the layout, position and redraw passes over everything queued.
    ///
    /// Each pass visits its set by index, so entries appended while the pass
    /// runs are handled in the same call. Layout and position sets are
    /// ordered by depth first: a handler recomputes its whole subtree and
    /// descendants already handled this frame are skipped.
    pub fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        if self.queue.is_empty() {
            return report;
        }
        self.frame_index = self.frame_index.saturating_add(1);
        let frame = self.frame_index;

        for kind in InvalidationKind::DRAIN_ORDER {
            if kind != InvalidationKind::Redraw {
                let nodes = &self.nodes;
                self.queue
                    .sort_kind_by_key(kind, |id| node_depth(nodes, *id));
            }

            let mut index = 0;
            while let Some(id) = self.queue.get(kind, index) {
                index += 1;
                if !self.nodes.contains_key(id) || !self.is_live(id) {
                    report.skipped += 1;
                    continue;
                }
                match kind {
                    InvalidationKind::Layout => self.validate_layout(id, frame, &mut report),
                    InvalidationKind::Position => self.validate_position(id, frame, &mut report),
                    InvalidationKind::Redraw => self.validate_redraw(id, &mut report),
                }
            }
            self.queue.clear(kind);
        }

        debug!(
            frame,
            layout = report.layout,
            position = report.position,
            redraw = report.redraw,
            failures = report.failures,
            skipped = report.skipped,
            "drain complete"
        );
        report
    }

    /// Walks up while the parent's size depends on its children.
    fn layout_root_for(&self, id: NodeId) -> NodeId {
        let mut target = id;
        while let Some(parent) = self.nodes.get(target).and_then(|node| node.parent) {
            let Some(parent_node) = self.nodes.get(parent) else {
                break;
            };
            let auto_sized = [PropertyKey::Width, PropertyKey::Height]
                .into_iter()
                .any(|key| parent_node.props.dimension(key) == Dimension::Auto);
            if !auto_sized {
                break;
            }
            target = parent;
        }
        target
    }
}
