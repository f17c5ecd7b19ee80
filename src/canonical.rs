//! A map whose keys are compared by a canonical form, e.g. case-insensitively.
use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::MapLike;

/// A map which stores each entry under `canonicalize(key)`. Keys with the same canonical form
/// address the same entry; the entry remembers the original key it was first inserted with.
pub struct CanonicalMap<K, V, C, F = fn(&K) -> C> {
    canonicalize: F,
    entries: HashMap<C, (K, V)>,
}

impl<K, V, C, F> CanonicalMap<K, V, C, F>
where
    C: Hash + Eq,
    F: Fn(&K) -> C,
{
    pub fn new(canonicalize: F) -> Self {
        CanonicalMap {
            canonicalize,
            entries: HashMap::new(),
        }
    }

    pub fn canonical(&self, key: &K) -> C {
        (self.canonicalize)(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(&self.canonical(key)).map(|(_, value)| value)
    }

    /// The key the entry addressed by `key` was first inserted with.
    pub fn original_key(&self, key: &K) -> Option<&K> {
        self.entries.get(&self.canonical(key)).map(|(original, _)| original)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(&self.canonical(key))
    }

    /// Stores `value` under the canonical form of `key`. An existing entry keeps its original key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.entry(self.canonical(&key)) {
            Entry::Occupied(mut occupied) => {
                Some(std::mem::replace(&mut occupied.get_mut().1, value))
            }
            Entry::Vacant(vacant) => {
                vacant.insert((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let canonical = self.canonical(key);
        self.entries.remove(&canonical).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries with their original keys, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.values().map(|(key, value)| (key, value))
    }
}

impl<K, V, C, F> MapLike<K, V> for CanonicalMap<K, V, C, F>
where
    C: Hash + Eq,
    F: Fn(&K) -> C,
{
    fn get(&self, key: &K) -> Option<&V> {
        CanonicalMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        CanonicalMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        CanonicalMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        CanonicalMap::remove(self, key)
    }

    fn len(&self) -> usize {
        CanonicalMap::len(self)
    }
}

impl<K: Clone, V: Clone, C: Clone, F: Clone> Clone for CanonicalMap<K, V, C, F> {
    fn clone(&self) -> Self {
        CanonicalMap {
            canonicalize: self.canonicalize.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, F> fmt::Debug for CanonicalMap<K, V, C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.values().map(|(key, value)| (key, value)))
            .finish()
    }
}
