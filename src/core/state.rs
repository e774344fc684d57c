use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::easing::Easing;
use crate::core::property::{PropertyKey, PropertyValue};

pub const DEFAULT_STATE: &str = "default";
pub const HIDDEN_STATE: &str = "hidden";
pub const HOVER_STATE: &str = "hover";

/// Named partial property snapshot used as a transition target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub properties: IndexMap<PropertyKey, PropertyValue>,
    #[serde(default)]
    pub transition_duration_ms: Option<f64>,
    #[serde(default)]
    pub easing: Option<Easing>,
}

impl State {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            transition_duration_ms: None,
            easing: None,
        }
    }

    pub fn set(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> &mut Self {
        self.properties.insert(key, value.into());
        self
    }

    pub fn with_duration_ms(&mut self, duration_ms: f64) -> &mut Self {
        self.transition_duration_ms = Some(duration_ms);
        self
    }

    pub fn with_easing(&mut self, easing: Easing) -> &mut Self {
        self.easing = Some(easing);
        self
    }

    #[must_use]
    pub fn get(&self, key: PropertyKey) -> Option<&PropertyValue> {
        self.properties.get(&key)
    }
}

/// Per-node state table. `default` and `hidden` always exist.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRegistry {
    states: IndexMap<String, State>,
}

impl Default for StateRegistry {
    fn default() -> Self {
        let mut hidden = State::new(HIDDEN_STATE);
        hidden
            .set(PropertyKey::Opacity, 0.0)
            .set(PropertyKey::Visible, false);

        let mut states = IndexMap::new();
        states.insert(DEFAULT_STATE.to_owned(), State::new(DEFAULT_STATE));
        states.insert(HIDDEN_STATE.to_owned(), hidden);
        Self { states }
    }
}

impl StateRegistry {
    /// Returns the named state, creating an empty one when missing.
    pub fn create(&mut self, name: &str) -> &mut State {
        self.states
            .entry(name.to_owned())
            .or_insert_with(|| State::new(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<State> {
        if name == DEFAULT_STATE {
            return None;
        }
        self.states.shift_remove(name)
    }

    /// Records `current` into the default state for every key `target`
    /// touches that the default state does not define yet.
    pub fn remember_defaults(
        &mut self,
        target: &str,
        current: impl Fn(PropertyKey) -> Option<PropertyValue>,
    ) {
        if target == DEFAULT_STATE {
            return;
        }
        let Some(keys) = self
            .states
            .get(target)
            .map(|state| state.properties.keys().copied().collect::<Vec<_>>())
        else {
            return;
        };
        let default = self.create(DEFAULT_STATE);
        for key in keys {
            if default.properties.contains_key(&key) {
                continue;
            }
            if let Some(value) = current(key) {
                default.properties.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_STATE, HIDDEN_STATE, StateRegistry};
    use crate::core::property::{PropertyKey, PropertyValue};

    #[test]
    fn registry_starts_with_default_and_hidden() {
        let registry = StateRegistry::default();
        assert!(registry.contains(DEFAULT_STATE));
        let hidden = registry.get(HIDDEN_STATE).expect("hidden state");
        assert_eq!(
            hidden.get(PropertyKey::Visible),
            Some(&PropertyValue::Bool(false))
        );
    }

    #[test]
    fn default_state_cannot_be_removed() {
        let mut registry = StateRegistry::default();
        assert!(registry.remove(DEFAULT_STATE).is_none());
        registry.create("hover").set(PropertyKey::Opacity, 1.0);
        assert!(registry.remove("hover").is_some());
    }

    #[test]
    fn remember_defaults_keeps_first_recorded_value() {
        let mut registry = StateRegistry::default();
        registry
            .create("hover")
            .set(PropertyKey::Opacity, 1.0)
            .set(PropertyKey::Scale, 1.2);

        let opacity = PropertyValue::Number(0.4);
        registry.remember_defaults("hover", |key| {
            (key == PropertyKey::Opacity).then(|| opacity.clone())
        });
        let later = PropertyValue::Number(0.9);
        registry.remember_defaults("hover", |key| {
            (key == PropertyKey::Opacity).then(|| later.clone())
        });

        let default = registry.get(DEFAULT_STATE).expect("default");
        assert_eq!(default.get(PropertyKey::Opacity), Some(&opacity));
        assert_eq!(default.get(PropertyKey::Scale), None);
    }
}
