use tracing::trace;

use crate::core::{
    AdapterId, Dimension, InvalidationKind, LayoutMode, NodeId, PropertyKey, PropertyStore,
    PropertyValue,
};

use super::{SceneEvent, SceneGraph};

impl SceneGraph {
    /// Stores a literal and schedules the passes the key requires.
    ///
    /// Cancels an in-flight transition on the same key. Returns `true` when
    /// the literal changed; stale handles are ignored.
    pub fn set(&mut self, id: NodeId, key: PropertyKey, value: impl Into<PropertyValue>) -> bool {
        if let Some(node) = self.nodes.get_mut(id) {
            node.transitions.shift_remove(&key);
        }
        self.write_property(id, key, value.into())
    }

    /// Resolved value: literal (or `None`) passed through the adapter chain.
    #[must_use]
    pub fn get(&self, id: NodeId, key: PropertyKey) -> Option<PropertyValue> {
        self.nodes.get(id).and_then(|node| node.props.resolve(key))
    }

    /// Resolved value with `fallback` substituted for a missing literal.
    #[must_use]
    pub fn get_or(&self, id: NodeId, key: PropertyKey, fallback: PropertyValue) -> PropertyValue {
        match self.nodes.get(id) {
            Some(node) => node.props.get(key, fallback),
            None => fallback,
        }
    }

    #[must_use]
    pub fn literal(&self, id: NodeId, key: PropertyKey) -> Option<&PropertyValue> {
        self.nodes.get(id).and_then(|node| node.props.literal(key))
    }

    /// Removes a literal; reads fall back to defaults afterwards.
    pub fn unset(&mut self, id: NodeId, key: PropertyKey) -> Option<PropertyValue> {
        let node = self.nodes.get_mut(id)?;
        node.transitions.shift_remove(&key);
        let removed = node.props.remove(key)?;
        self.invalidate_kinds(id, key.invalidation_kinds());
        self.invalidate_parent_extent(id, key);
        Some(removed)
    }

    /// Registers a read-time adapter on `key`. Lower priorities run first.
    pub fn add_adapter<F>(
        &mut self,
        id: NodeId,
        key: PropertyKey,
        priority: i32,
        adapter: F,
    ) -> Option<AdapterId>
    where
        F: Fn(PropertyValue, &PropertyStore) -> PropertyValue + 'static,
    {
        let node = self.nodes.get_mut(id)?;
        let adapter_id = node.props.add_adapter(key, priority, adapter);
        self.invalidate_kinds(id, key.invalidation_kinds());
        self.invalidate_parent_extent(id, key);
        Some(adapter_id)
    }

    pub fn remove_adapter(&mut self, id: NodeId, key: PropertyKey, adapter: AdapterId) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        if !node.props.remove_adapter(adapter) {
            return false;
        }
        self.invalidate_kinds(id, key.invalidation_kinds());
        self.invalidate_parent_extent(id, key);
        true
    }

    /// Writes a literal without touching transitions; used by the transition
    /// stepper so that sampling does not cancel itself.
    pub(super) fn write_property(&mut self, id: NodeId, key: PropertyKey, value: PropertyValue) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let Some(change) = node.props.set(key, value) else {
            return false;
        };
        trace!(?id, ?key, "property changed");
        self.invalidate_kinds(id, key.invalidation_kinds());
        self.invalidate_parent_extent(id, key);
        self.emit(SceneEvent::PropertyChanged {
            node: id,
            key: change.key,
            old: change.old,
            new: change.new,
        });
        true
    }

    /// `x`/`y` feed the natural extent of an auto-sized absolute parent.
    fn invalidate_parent_extent(&mut self, id: NodeId, key: PropertyKey) {
        if !matches!(key, PropertyKey::X | PropertyKey::Y) {
            return;
        }
        let Some(parent) = self.parent(id) else {
            return;
        };
        let sized_by_children = self.nodes.get(parent).is_some_and(|node| {
            node.props.layout_mode() == LayoutMode::Absolute
                && [PropertyKey::Width, PropertyKey::Height]
                    .into_iter()
                    .any(|axis| node.props.dimension(axis) == Dimension::Auto)
        });
        if sized_by_children {
            self.invalidate(parent, InvalidationKind::Layout);
        }
    }
}
