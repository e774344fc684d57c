use tracing::trace;

use crate::core::{Easing, NodeId, PropertyKey, PropertyValue, Transition};

use super::{SceneEvent, SceneGraph};

impl SceneGraph {
    /// Tweens a single property of `id` toward `to`.
    ///
    /// Starts from the in-flight value when `key` is already animating.
    /// Non-positive durations write `to` immediately.
    pub fn animate(
        &mut self,
        id: NodeId,
        key: PropertyKey,
        to: impl Into<PropertyValue>,
        duration_ms: f64,
        easing: Easing,
    ) -> bool {
        let to = to.into();
        let now = self.clock.now_ms();
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let start = match node.transitions.get(&key) {
            Some(running) => Some(running.sample(now).value),
            None => node
                .props
                .literal(key)
                .cloned()
                .or_else(|| key.implicit_default()),
        };
        let write = match start {
            Some(start) if duration_ms.is_finite() && duration_ms > 0.0 && start != to => {
                let transition = Transition::new(key, start, to, now, duration_ms, easing);
                let first = transition.sample(now).value;
                node.transitions.insert(key, transition);
                first
            }
            _ => {
                node.transitions.shift_remove(&key);
                to
            }
        };
        self.write_property(id, key, write);
        true
    }

    /// Samples every running transition at the current scene time and writes
    /// the values. Finished transitions settle on their exact end value and
    /// emit [`SceneEvent::TransitionEnded`].
    pub fn step_transitions(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut writes = Vec::new();
        let mut ended = Vec::new();
        for (id, node) in &mut self.nodes {
            if node.transitions.is_empty() {
                continue;
            }
            node.transitions.retain(|key, transition| {
                let sample = transition.sample(now);
                writes.push((id, *key, sample.value));
                if sample.finished {
                    ended.push((id, *key));
                }
                !sample.finished
            });
        }

        let stepped = writes.len();
        for (id, key, value) in writes {
            self.write_property(id, key, value);
        }
        for (id, key) in ended {
            trace!(?id, ?key, "transition ended");
            self.emit(SceneEvent::TransitionEnded { node: id, key });
        }
        stepped
    }

    /// Transitions still running across the scene.
    #[must_use]
    pub fn active_transition_count(&self) -> usize {
        self.nodes.values().map(|node| node.transitions.len()).sum()
    }

    #[must_use]
    pub fn transition(&self, id: NodeId, key: PropertyKey) -> Option<&Transition> {
        self.nodes.get(id).and_then(|node| node.transitions.get(&key))
    }

    /// Stops every transition of `id`, leaving current values in place.
    pub fn cancel_transitions(&mut self, id: NodeId) -> usize {
        self.nodes.get_mut(id).map_or(0, |node| {
            let cancelled = node.transitions.len();
            node.transitions.clear();
            cancelled
        })
    }
}
