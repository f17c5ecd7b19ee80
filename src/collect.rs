//! Synchronous collection of a sequence of entries into a map.
//!
//! Note the contrast with [`EventualMap`](crate::EventualMap): collecting without a reconciler lets
//! the *last* entry for a key win, while the eventual map keeps the *first*.
use crate::bump::{self, Bumper};
use crate::{MapLike, Reconciler};

/// Inserts every entry into `seed`, in order. Later entries overwrite earlier ones.
pub fn collect_into<K, V, M, I>(entries: I, seed: &mut M)
where
    M: MapLike<K, V> + ?Sized,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in entries {
        seed.insert(key, value);
    }
}

/// Merges every entry into `seed` through `reconciler`.
///
/// The reconciler runs for *every* entry, including the first one at a key, in which case it is
/// given `None` as the colliding value. A `None` result deletes the key, any other result updates
/// the entry in place.
pub fn collect_into_reconciling<K, T, V, M, I, R>(entries: I, seed: &mut M, reconciler: R)
where
    V: Clone,
    M: MapLike<K, V> + ?Sized,
    I: IntoIterator<Item = (K, T)>,
    R: Reconciler<K, T, V>,
{
    for (key, incoming) in entries {
        let colliding = seed.get(&key).cloned();
        match reconciler.reconcile(colliding, incoming, &key) {
            Some(value) => seed.insert(key, value),
            None => {
                seed.remove(&key);
            }
        }
    }
}

/// Collects `entries` into a new map. Later entries overwrite earlier ones.
pub fn collect<K, V, M, I>(entries: I) -> M
where
    M: MapLike<K, V> + Default,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = M::default();
    collect_into(entries, &mut map);
    map
}

/// Collects `entries` into a new map through `reconciler`, see [`collect_into_reconciling`].
pub fn collect_reconciling<K, T, V, M, I, R>(entries: I, reconciler: R) -> M
where
    V: Clone,
    M: MapLike<K, V> + Default,
    I: IntoIterator<Item = (K, T)>,
    R: Reconciler<K, T, V>,
{
    let mut map = M::default();
    collect_into_reconciling(entries, &mut map, reconciler);
    map
}

/// Inserts every entry into `seed`, asking `bumper` for an alternate key whenever an entry's key is
/// already taken. Entries the bumper gives up on are dropped.
///
/// Attempts are not capped: see the [`bump`](crate::bump) module.
pub fn collect_bumping<K, V, M, I, B>(entries: I, bumper: B, seed: &mut M)
where
    M: MapLike<K, V> + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    B: Bumper<K, V>,
{
    for (key, value) in entries {
        if let Some(key) = bump::vacant_key(seed, key, &value, &bumper) {
            seed.insert(key, value);
        }
    }
}
