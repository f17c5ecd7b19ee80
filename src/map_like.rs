//! The map abstraction the collection engine and the eventual map write through.
//!
//! Any associative container with unique keys can be populated by this crate, as long as it can
//! look a key up, insert, and remove. Implementations are provided for the standard maps, for the
//! persistent maps of [`im`], and for the crate's own [`BiMap`](crate::BiMap) and
//! [`CanonicalMap`](crate::CanonicalMap).
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

pub trait MapLike<K, V> {
    fn get(&self, key: &K) -> Option<&V>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` at `key`, replacing whatever was there.
    fn insert(&mut self, key: K, value: V);

    fn remove(&mut self, key: &K) -> Option<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MapLike<K, V> for HashMap<K, V, S> {
    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        HashMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K: Ord, V> MapLike<K, V> for BTreeMap<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        BTreeMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> MapLike<K, V> for im::HashMap<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        im::HashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        im::HashMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        im::HashMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        im::HashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        im::HashMap::len(self)
    }
}

impl<K: Ord + Clone, V: Clone> MapLike<K, V> for im::OrdMap<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        im::OrdMap::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        im::OrdMap::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        im::OrdMap::remove(self, key)
    }

    fn len(&self) -> usize {
        im::OrdMap::len(self)
    }
}
