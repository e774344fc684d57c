use std::hash::Hash;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Validation passes, declared in drain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvalidationKind {
    Layout,
    Position,
    Redraw,
}

impl InvalidationKind {
    /// Fixed drain order: sizes settle before coordinates, coordinates before paint.
    pub const DRAIN_ORDER: [Self; 3] = [Self::Layout, Self::Position, Self::Redraw];

    const fn bit(self) -> u8 {
        match self {
            Self::Layout => 1 << 0,
            Self::Position => 1 << 1,
            Self::Redraw => 1 << 2,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Layout => 0,
            Self::Position => 1,
            Self::Redraw => 2,
        }
    }
}

/// Bitmask of validation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationKinds {
    bits: u8,
}

impl InvalidationKinds {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: InvalidationKind::Layout.bit()
                | InvalidationKind::Position.bit()
                | InvalidationKind::Redraw.bit(),
        }
    }

    #[must_use]
    pub const fn from_kind(kind: InvalidationKind) -> Self {
        Self { bits: kind.bit() }
    }

    #[must_use]
    pub const fn with_kind(self, kind: InvalidationKind) -> Self {
        Self {
            bits: self.bits | kind.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_kind(self, kind: InvalidationKind) -> bool {
        (self.bits & kind.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = InvalidationKind> {
        InvalidationKind::DRAIN_ORDER
            .into_iter()
            .filter(move |kind| self.contains_kind(*kind))
    }
}

/// Frame-scoped, insertion-ordered sets of dirty handles, one per kind.
///
/// Each set holds a handle at most once. Draining a kind walks the set by
/// index so entries appended mid-drain are still visited, then clears it.
#[derive(Debug, Clone)]
pub struct InvalidationQueue<K> {
    sets: [IndexSet<K>; 3],
}

impl<K> Default for InvalidationQueue<K> {
    fn default() -> Self {
        Self {
            sets: [IndexSet::new(), IndexSet::new(), IndexSet::new()],
        }
    }
}

impl<K: Copy + Eq + Hash> InvalidationQueue<K> {
    /// Returns `true` when the handle was not already queued for `kind`.
    pub fn invalidate(&mut self, key: K, kind: InvalidationKind) -> bool {
        self.sets[kind.index()].insert(key)
    }

    pub fn invalidate_kinds(&mut self, key: K, kinds: InvalidationKinds) {
        for kind in kinds.iter() {
            self.invalidate(key, kind);
        }
    }

    #[must_use]
    pub fn contains(&self, key: K, kind: InvalidationKind) -> bool {
        self.sets[kind.index()].contains(&key)
    }

    /// Entry at `index` of the `kind` set; used for grow-tolerant iteration.
    #[must_use]
    pub fn get(&self, kind: InvalidationKind, index: usize) -> Option<K> {
        self.sets[kind.index()].get_index(index).copied()
    }

    #[must_use]
    pub fn len(&self, kind: InvalidationKind) -> usize {
        self.sets[kind.index()].len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(IndexSet::is_empty)
    }

    #[must_use]
    pub fn pending_kinds(&self, key: K) -> InvalidationKinds {
        InvalidationKind::DRAIN_ORDER
            .into_iter()
            .filter(|kind| self.contains(key, *kind))
            .fold(InvalidationKinds::none(), InvalidationKinds::with_kind)
    }

    /// Reorders the `kind` set by a cached sort key; ties keep insertion order.
    pub fn sort_kind_by_key<T, F>(&mut self, kind: InvalidationKind, key_fn: F)
    where
        T: Ord,
        F: FnMut(&K) -> T,
    {
        self.sets[kind.index()].sort_by_cached_key(key_fn);
    }

    pub fn clear(&mut self, kind: InvalidationKind) {
        self.sets[kind.index()].clear();
    }

    /// Drops every membership of `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: K) {
        for set in &mut self.sets {
            set.shift_remove(&key);
        }
    }
}
