//! A one-to-one map, which can be looked up by key or by value.
use std::collections::HashMap;
use std::hash::Hash;

use crate::MapLike;

/// A map in which every value is also unique. Inserting a pair evicts any existing pair which
/// shares its key or its value, so the map can always be read backwards through
/// [`BiMap::reversed`].
#[derive(Clone, Debug)]
pub struct BiMap<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> Default for BiMap<K, V> {
    fn default() -> Self {
        BiMap {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }
}

impl<K, V> BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    pub fn get_key(&self, value: &V) -> Option<&K> {
        self.backward.get(value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.backward.contains_key(value)
    }

    /// Inserts the pair, evicting whichever pairs used `key` or `value` before.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(previous) = self.forward.remove(&key) {
            self.backward.remove(&previous);
        }
        if let Some(previous) = self.backward.remove(&value) {
            self.forward.remove(&previous);
        }
        self.forward.insert(key.clone(), value.clone());
        self.backward.insert(value, key);
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.forward.remove(key)?;
        self.backward.remove(&value);
        Some(value)
    }

    pub fn remove_value(&mut self, value: &V) -> Option<K> {
        let key = self.backward.remove(value)?;
        self.forward.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }

    /// A view of this map with keys and values swapped, through which the map can also be modified.
    pub fn reversed(&mut self) -> Reversed<'_, K, V> {
        Reversed { map: self }
    }

    /// A read-only view of this map with keys and values swapped.
    pub fn reversed_ref(&self) -> ReversedRef<'_, K, V> {
        ReversedRef { map: self }
    }
}

impl<K, V> MapLike<K, V> for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn get(&self, key: &K) -> Option<&V> {
        BiMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BiMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        BiMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BiMap::remove(self, key)
    }

    fn len(&self) -> usize {
        BiMap::len(self)
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for BiMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut map = BiMap::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }
}

/// The value-to-key view of a [`BiMap`]. Every operation is forwarded to the owning map.
#[derive(Debug)]
pub struct Reversed<'a, K, V> {
    map: &'a mut BiMap<K, V>,
}

impl<'a, K, V> MapLike<V, K> for Reversed<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn get(&self, value: &V) -> Option<&K> {
        self.map.get_key(value)
    }

    fn contains_key(&self, value: &V) -> bool {
        self.map.contains_value(value)
    }

    fn insert(&mut self, value: V, key: K) {
        self.map.insert(key, value)
    }

    fn remove(&mut self, value: &V) -> Option<K> {
        self.map.remove_value(value)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ReversedRef<'a, K, V> {
    map: &'a BiMap<K, V>,
}

impl<'a, K, V> ReversedRef<'a, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    pub fn get(&self, value: &V) -> Option<&'a K> {
        self.map.backward.get(value)
    }

    pub fn contains_key(&self, value: &V) -> bool {
        self.map.contains_value(value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a V, &'a K)> {
        self.map.backward.iter()
    }
}
