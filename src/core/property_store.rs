use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::color::Color;
use crate::core::property::{Align, Dimension, LayoutMode, PropertyKey, PropertyValue};

/// Read-time transform: receives the previous stage's value and the owning
/// store, returns the next value. The shared borrow keeps adapters read-only.
pub type Adapter = Box<dyn Fn(PropertyValue, &PropertyStore) -> PropertyValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterId(u64);

struct AdapterEntry {
    id: AdapterId,
    priority: i32,
    adapter: Adapter,
}

/// Literal change produced by [`PropertyStore::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    pub key: PropertyKey,
    pub old: Option<PropertyValue>,
    pub new: PropertyValue,
}

/// Per-node literal values plus adapter chains keyed by [`PropertyKey`].
#[derive(Default)]
pub struct PropertyStore {
    literals: IndexMap<PropertyKey, PropertyValue>,
    adapters: IndexMap<PropertyKey, SmallVec<[AdapterEntry; 2]>>,
    next_adapter_id: u64,
}

impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyStore")
            .field("literals", &self.literals)
            .field(
                "adapter_keys",
                &self.adapters.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl PropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored literal without adapters.
    #[must_use]
    pub fn literal(&self, key: PropertyKey) -> Option<&PropertyValue> {
        self.literals.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: PropertyKey) -> bool {
        self.literals.contains_key(&key)
    }

    pub fn literals(&self) -> impl Iterator<Item = (PropertyKey, &PropertyValue)> {
        self.literals.iter().map(|(key, value)| (*key, value))
    }

    /// Literal (or `fallback`) passed through the adapter chain for `key`.
    #[must_use]
    pub fn get(&self, key: PropertyKey, fallback: PropertyValue) -> PropertyValue {
        let value = self.literals.get(&key).cloned().unwrap_or(fallback);
        self.adapt(key, value)
    }

    /// Like [`Self::get`] but yields `None` when no literal is stored.
    #[must_use]
    pub fn resolve(&self, key: PropertyKey) -> Option<PropertyValue> {
        let value = self.literals.get(&key).cloned()?;
        Some(self.adapt(key, value))
    }

    fn adapt(&self, key: PropertyKey, value: PropertyValue) -> PropertyValue {
        let Some(chain) = self.adapters.get(&key) else {
            return value;
        };
        chain
            .iter()
            .fold(value, |value, entry| (entry.adapter)(value, self))
    }

    /// Stores `value`; returns the change when it differs from the previous literal.
    pub fn set(&mut self, key: PropertyKey, value: PropertyValue) -> Option<PropertyChange> {
        if self.literals.get(&key) == Some(&value) {
            return None;
        }
        let old = self.literals.insert(key, value.clone());
        Some(PropertyChange {
            key,
            old,
            new: value,
        })
    }

    pub fn remove(&mut self, key: PropertyKey) -> Option<PropertyValue> {
        self.literals.shift_remove(&key)
    }

    /// Inserts `adapter` into the chain for `key`. Chains run lowest priority
    /// first; equal priorities keep registration order.
    pub fn add_adapter<F>(&mut self, key: PropertyKey, priority: i32, adapter: F) -> AdapterId
    where
        F: Fn(PropertyValue, &PropertyStore) -> PropertyValue + 'static,
    {
        let id = AdapterId(self.next_adapter_id);
        self.next_adapter_id = self.next_adapter_id.saturating_add(1);

        let chain = self.adapters.entry(key).or_default();
        let position = chain
            .iter()
            .position(|entry| entry.priority > priority)
            .unwrap_or(chain.len());
        chain.insert(
            position,
            AdapterEntry {
                id,
                priority,
                adapter: Box::new(adapter),
            },
        );
        id
    }

    /// Returns `true` when the adapter was registered and is now removed.
    pub fn remove_adapter(&mut self, id: AdapterId) -> bool {
        let mut emptied = None;
        let mut removed = false;
        for (key, chain) in &mut self.adapters {
            if let Some(position) = chain.iter().position(|entry| entry.id == id) {
                chain.remove(position);
                removed = true;
                if chain.is_empty() {
                    emptied = Some(*key);
                }
                break;
            }
        }
        if let Some(key) = emptied {
            self.adapters.shift_remove(&key);
        }
        removed
    }

    #[must_use]
    pub fn has_adapters(&self, key: PropertyKey) -> bool {
        self.adapters.contains_key(&key)
    }

    #[must_use]
    pub fn number(&self, key: PropertyKey, fallback: f64) -> f64 {
        self.get(key, PropertyValue::Number(fallback))
            .as_number()
            .filter(|value| value.is_finite())
            .unwrap_or(fallback)
    }

    #[must_use]
    pub fn optional_number(&self, key: PropertyKey) -> Option<f64> {
        self.resolve(key)
            .and_then(|value| value.as_number())
            .filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn flag(&self, key: PropertyKey, fallback: bool) -> bool {
        self.get(key, PropertyValue::Bool(fallback))
            .as_bool()
            .unwrap_or(fallback)
    }

    #[must_use]
    pub fn color(&self, key: PropertyKey) -> Option<Color> {
        self.resolve(key).and_then(|value| value.as_color())
    }

    #[must_use]
    pub fn text(&self, key: PropertyKey) -> Option<String> {
        self.resolve(key)
            .and_then(|value| value.as_text().map(str::to_owned))
    }

    #[must_use]
    pub fn dimension(&self, key: PropertyKey) -> Dimension {
        self.resolve(key)
            .map_or(Dimension::Auto, |value| value.as_dimension())
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.resolve(PropertyKey::Layout)
            .and_then(|value| value.as_layout())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn align(&self, key: PropertyKey) -> Align {
        self.resolve(key)
            .and_then(|value| value.as_align())
            .unwrap_or_default()
    }
}
