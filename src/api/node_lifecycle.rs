use tracing::{debug, warn};

use crate::core::{
    CircleContent, InvalidationKind, LabelContent, Node, NodeContent, NodeId, PropertyKey,
    PropertyValue, RectangleContent,
};
use crate::error::{SceneError, SceneResult};

use super::theme::ThemeTarget;
use super::{SceneEvent, SceneGraph};

pub const CONTAINER_KIND: &str = "Container";
pub const RECTANGLE_KIND: &str = "Rectangle";
pub const CIRCLE_KIND: &str = "Circle";
pub const LABEL_KIND: &str = "Label";

impl SceneGraph {
    /// Creates a detached node and runs the registered themes on it.
    pub fn create_node(&mut self, kind: &str, content: Option<Box<dyn NodeContent>>) -> NodeId {
        let mut node = Node::new(kind, content);
        {
            let Node {
                kind, props, states, ..
            } = &mut node;
            let mut target = ThemeTarget::new(kind, props, states);
            for theme in &self.themes {
                theme.apply(&mut target);
            }
        }
        let id = self.nodes.insert(node);
        debug!(?id, kind, "node created");
        id
    }

    pub fn create_container(&mut self) -> NodeId {
        self.create_node(CONTAINER_KIND, None)
    }

    pub fn create_rectangle(&mut self) -> NodeId {
        self.create_node(RECTANGLE_KIND, Some(Box::new(RectangleContent)))
    }

    pub fn create_circle(&mut self) -> NodeId {
        self.create_node(CIRCLE_KIND, Some(Box::new(CircleContent)))
    }

    pub fn create_label(&mut self, text: &str) -> NodeId {
        let id = self.create_node(LABEL_KIND, Some(Box::new(LabelContent)));
        self.set(id, PropertyKey::Text, PropertyValue::Text(text.to_owned()));
        id
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    ///
    /// Stale handles are ignored. Attaching the root or creating a cycle is
    /// rejected.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.insert_child_at(parent, child, usize::MAX)
    }

    /// Like [`Self::add_child`] at `index` (clamped to the child count).
    pub fn insert_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> SceneResult<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Ok(());
        }
        if child == self.root {
            return Err(SceneError::RootAttachment);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::HierarchyCycle);
        }

        let previous = self.nodes.get(child).and_then(|node| node.parent);
        if let Some(previous) = previous {
            self.unlink(previous, child);
        }
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return Ok(());
        };
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }

        match previous {
            Some(previous) if previous == parent => {
                self.invalidate(parent, InvalidationKind::Layout);
            }
            Some(previous) => {
                self.invalidate(previous, InvalidationKind::Layout);
                self.emit(SceneEvent::Detached {
                    node: child,
                    parent: previous,
                });
                self.attached(parent, child);
            }
            None => self.attached(parent, child),
        }
        Ok(())
    }

    /// Reparents `child` under `new_parent` at the end of its children.
    pub fn move_child(&mut self, child: NodeId, new_parent: NodeId) -> SceneResult<()> {
        self.add_child(new_parent, child)
    }

    /// Detaches `child` when it is a direct child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child)
    }

    /// Removes `id` from its parent; the subtree stays alive but stops
    /// validating and rendering until attached again.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        self.unlink(parent, id);
        self.invalidate(parent, InvalidationKind::Layout);
        debug!(?id, ?parent, "node detached");
        self.emit(SceneEvent::Detached { node: id, parent });
        true
    }

    /// Destroys `id` and its descendants.
    ///
    /// Cancels their transitions, drops pending invalidations and releases
    /// subscriptions after a final [`SceneEvent::Disposed`]. Disposing twice
    /// is a no-op; the root cannot be disposed.
    pub fn dispose(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if id == self.root {
            warn!(?id, "root node cannot be disposed");
            return;
        }
        self.detach(id);

        let mut subtree = Vec::new();
        self.collect_post_order(id, &mut subtree);
        for node in &subtree {
            self.emit(SceneEvent::Disposed { node: *node });
            self.queue.remove(*node);
            self.events.release_node(*node);
            if self.hovered == Some(*node) {
                self.hovered = None;
            }
            self.nodes.remove(*node);
        }
        debug!(?id, disposed = subtree.len(), "subtree disposed");
    }

    /// Returns `true` when `ancestor` is a strict ancestor of `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Moves `id` to `index` among its siblings; later siblings paint on top
    /// when z-indices tie.
    pub fn reorder_child(&mut self, id: NodeId, index: usize) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if self.insert_child_at(parent, id, index).is_err() {
            return false;
        }
        true
    }

    fn attached(&mut self, parent: NodeId, child: NodeId) {
        debug!(?child, ?parent, "node attached");
        self.invalidate(child, InvalidationKind::Layout);
        self.invalidate(child, InvalidationKind::Position);
        // Redraws queued while detached were dropped by the drain.
        let mut subtree = Vec::new();
        self.collect_post_order(child, &mut subtree);
        for id in subtree {
            self.invalidate(id, InvalidationKind::Redraw);
        }
        self.emit(SceneEvent::Attached {
            node: child,
            parent,
        });
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|existing| *existing != child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
    }

    fn collect_post_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(id) {
            self.collect_post_order(*child, out);
        }
        out.push(id);
    }
}
