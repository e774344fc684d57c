use tracing::debug;

use crate::core::{
    DEFAULT_STATE, HIDDEN_STATE, NodeId, PropertyKey, PropertyValue, State, Transition,
};

use super::{SceneEvent, SceneGraph};

impl SceneGraph {
    /// Returns the named state of `id` for configuration, creating it if
    /// missing. `None` for a stale handle.
    pub fn create_state(&mut self, id: NodeId, name: &str) -> Option<&mut State> {
        self.nodes.get_mut(id).map(|node| node.states.create(name))
    }

    #[must_use]
    pub fn state(&self, id: NodeId, name: &str) -> Option<&State> {
        self.nodes.get(id).and_then(|node| node.states.get(name))
    }

    /// Removes a custom state; `default` cannot be removed.
    pub fn remove_state(&mut self, id: NodeId, name: &str) -> Option<State> {
        self.nodes.get_mut(id).and_then(|node| node.states.remove(name))
    }

    /// Name of the state last applied to `id`.
    #[must_use]
    pub fn current_state(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|node| node.current_state.as_deref())
    }

    /// Moves `id` toward the properties of state `name`.
    ///
    /// Each key starts from its current value (mid-flight if a transition is
    /// running) and runs for `duration_override_ms`, else the state's
    /// duration, else the scene default. A zero duration, or a key already at
    /// its target, is written immediately. Keys the state does not mention
    /// are left alone. Returns `false` for a stale handle or unknown state.
    pub fn set_state(&mut self, id: NodeId, name: &str, duration_override_ms: Option<f64>) -> bool {
        let now = self.clock.now_ms();
        let config = self.config;
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        if !node.states.contains(name) {
            debug!(?id, state = name, "unknown state ignored");
            return false;
        }

        let props = &node.props;
        node.states.remember_defaults(name, move |key| {
            props.literal(key).cloned().or_else(|| key.implicit_default())
        });
        let Some(state) = node.states.get(name).cloned() else {
            return false;
        };

        let duration_ms = duration_override_ms
            .or(state.transition_duration_ms)
            .unwrap_or(config.default_transition_duration_ms);
        let easing = state.easing.unwrap_or(config.default_easing);

        let mut writes = Vec::with_capacity(state.properties.len());
        for (key, target) in state.properties {
            let start = match node.transitions.get(&key) {
                Some(running) => Some(running.sample(now).value),
                None => node
                    .props
                    .literal(key)
                    .cloned()
                    .or_else(|| key.implicit_default()),
            };
            match start {
                Some(start) if duration_ms.is_finite() && duration_ms > 0.0 && start != target => {
                    let transition = Transition::new(key, start, target, now, duration_ms, easing);
                    writes.push((key, transition.sample(now).value));
                    node.transitions.insert(key, transition);
                }
                _ => {
                    node.transitions.shift_remove(&key);
                    writes.push((key, target));
                }
            }
        }
        node.current_state = Some(name.to_owned());

        for (key, value) in writes {
            self.write_property(id, key, value);
        }
        debug!(?id, state = name, duration_ms, "state applied");
        self.emit(SceneEvent::StateApplied {
            node: id,
            state: name.to_owned(),
        });
        true
    }

    /// Fades `id` back to its `default` state, making it visible first.
    pub fn show(&mut self, id: NodeId, duration_ms: Option<f64>) -> bool {
        if let Some(node) = self.nodes.get_mut(id) {
            let props = &node.props;
            node.states.remember_defaults(HIDDEN_STATE, move |key| {
                props.literal(key).cloned().or_else(|| key.implicit_default())
            });
            node.states
                .create(DEFAULT_STATE)
                .set(PropertyKey::Visible, PropertyValue::Bool(true));
        }
        self.set_state(id, DEFAULT_STATE, duration_ms)
    }

    /// Fades `id` out through the implicit `hidden` state.
    pub fn hide(&mut self, id: NodeId, duration_ms: Option<f64>) -> bool {
        self.set_state(id, HIDDEN_STATE, duration_ms)
    }
}
