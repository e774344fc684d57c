use indexmap::IndexMap;

use crate::core::geometry::Point;
use crate::core::{InvalidationKind, NodeId, PropertyKey, PropertyValue};

use super::SceneGraph;

/// Notification emitted on a node's event channels.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    PropertyChanged {
        node: NodeId,
        key: PropertyKey,
        old: Option<PropertyValue>,
        new: PropertyValue,
    },
    Attached {
        node: NodeId,
        parent: NodeId,
    },
    Detached {
        node: NodeId,
        parent: NodeId,
    },
    Disposed {
        node: NodeId,
    },
    StateApplied {
        node: NodeId,
        state: String,
    },
    TransitionEnded {
        node: NodeId,
        key: PropertyKey,
    },
    Validated {
        node: NodeId,
        kind: InvalidationKind,
    },
    ValidationFailed {
        node: NodeId,
        kind: InvalidationKind,
        message: String,
    },
    PointerOver {
        node: NodeId,
        point: Point,
    },
    PointerOut {
        node: NodeId,
        point: Point,
    },
    PointerDown {
        node: NodeId,
        point: Point,
    },
}

/// Channel selector for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PropertyChanged,
    Attached,
    Detached,
    Disposed,
    StateApplied,
    TransitionEnded,
    Validated,
    ValidationFailed,
    PointerOver,
    PointerOut,
    PointerDown,
}

impl SceneEvent {
    #[must_use]
    pub fn node(&self) -> NodeId {
        match self {
            Self::PropertyChanged { node, .. }
            | Self::Attached { node, .. }
            | Self::Detached { node, .. }
            | Self::Disposed { node }
            | Self::StateApplied { node, .. }
            | Self::TransitionEnded { node, .. }
            | Self::Validated { node, .. }
            | Self::ValidationFailed { node, .. }
            | Self::PointerOver { node, .. }
            | Self::PointerOut { node, .. }
            | Self::PointerDown { node, .. } => *node,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PropertyChanged { .. } => EventKind::PropertyChanged,
            Self::Attached { .. } => EventKind::Attached,
            Self::Detached { .. } => EventKind::Detached,
            Self::Disposed { .. } => EventKind::Disposed,
            Self::StateApplied { .. } => EventKind::StateApplied,
            Self::TransitionEnded { .. } => EventKind::TransitionEnded,
            Self::Validated { .. } => EventKind::Validated,
            Self::ValidationFailed { .. } => EventKind::ValidationFailed,
            Self::PointerOver { .. } => EventKind::PointerOver,
            Self::PointerOut { .. } => EventKind::PointerOut,
            Self::PointerDown { .. } => EventKind::PointerDown,
        }
    }
}

/// Handle returned by [`SceneGraph::subscribe`]; pass it to
/// [`SceneGraph::unsubscribe`] to release the listener early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SceneEvent)>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    listener: Listener,
}

/// Per-node multi-subscriber channels.
#[derive(Default)]
pub(super) struct EventRegistry {
    channels: IndexMap<NodeId, Vec<Subscription>>,
    next_id: u64,
}

impl EventRegistry {
    fn subscribe(&mut self, node: NodeId, kind: EventKind, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.channels.entry(node).or_default().push(Subscription {
            id,
            kind,
            listener,
        });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut emptied = None;
        let mut removed = false;
        for (node, subscriptions) in &mut self.channels {
            if let Some(position) = subscriptions.iter().position(|entry| entry.id == id) {
                subscriptions.remove(position);
                removed = true;
                if subscriptions.is_empty() {
                    emptied = Some(*node);
                }
                break;
            }
        }
        if let Some(node) = emptied {
            self.channels.shift_remove(&node);
        }
        removed
    }

    pub(super) fn emit(&mut self, event: &SceneEvent) {
        let Some(subscriptions) = self.channels.get_mut(&event.node()) else {
            return;
        };
        let kind = event.kind();
        for subscription in subscriptions
            .iter_mut()
            .filter(|subscription| subscription.kind == kind)
        {
            (subscription.listener)(event);
        }
    }

    pub(super) fn release_node(&mut self, node: NodeId) {
        self.channels.shift_remove(&node);
    }

    fn listener_count(&self, node: NodeId) -> usize {
        self.channels.get(&node).map_or(0, Vec::len)
    }
}

impl SceneGraph {
    /// Registers `listener` on `node`'s `kind` channel. Returns `None` for a
    /// disposed node.
    pub fn subscribe<F>(&mut self, node: NodeId, kind: EventKind, listener: F) -> Option<SubscriptionId>
    where
        F: FnMut(&SceneEvent) + 'static,
    {
        if !self.nodes.contains_key(node) {
            return None;
        }
        Some(self.events.subscribe(node, kind, Box::new(listener)))
    }

    /// Returns `true` when the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    #[must_use]
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.events.listener_count(node)
    }

    pub(super) fn emit(&mut self, event: SceneEvent) {
        self.events.emit(&event);
    }
}
