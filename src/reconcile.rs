//! Reconcilers merge a value arriving at a key with whatever is already stored there.
//!
//! A reconciler receives the stored value, or `None` if the key is vacant, together with the
//! incoming value and the key. Returning `Some` stores the result; returning `None` deletes the
//! key. Because the vacant slot is an `Option<V>`, a map whose values are themselves `Option`s can
//! store `None` and it will be passed in as `Some(None)`, never confused with a vacant key.
//!
//! The functions in this module are factories for the common cases; any closure of the right shape
//! is a [`Reconciler`] as well.
use std::ops::Add;

pub trait Reconciler<K, T, V> {
    fn reconcile(&self, colliding: Option<V>, incoming: T, key: &K) -> Option<V>;
}

impl<K, T, V, F> Reconciler<K, T, V> for F
where
    F: Fn(Option<V>, T, &K) -> Option<V>,
{
    fn reconcile(&self, colliding: Option<V>, incoming: T, key: &K) -> Option<V> {
        self(colliding, incoming, key)
    }
}

/// Collects every value arriving at a key into a `Vec`, in arrival order.
pub fn append<K, T>() -> impl Fn(Option<Vec<T>>, T, &K) -> Option<Vec<T>> + Clone {
    |colliding, incoming, _key| {
        let mut list = colliding.unwrap_or_default();
        list.push(incoming);
        Some(list)
    }
}

/// Like [`append`], but passes each incoming value through `mapper` first.
pub fn append_with<K, T, U, F>(
    mapper: F,
) -> impl Fn(Option<Vec<U>>, T, &K) -> Option<Vec<U>> + Clone
where
    F: Fn(T) -> U + Clone,
{
    move |colliding, incoming, _key| {
        let mut list = colliding.unwrap_or_default();
        list.push(mapper(incoming));
        Some(list)
    }
}

/// Sums the values arriving at a key.
pub fn add<K, N>() -> impl Fn(Option<N>, N, &K) -> Option<N> + Clone
where
    N: Add<Output = N>,
{
    |colliding, incoming, _key| match colliding {
        Some(sum) => Some(sum + incoming),
        None => Some(incoming),
    }
}

/// Sums the values arriving at a key after converting each with `to_number`.
pub fn add_with<K, T, N, F>(to_number: F) -> impl Fn(Option<N>, T, &K) -> Option<N> + Clone
where
    N: Add<Output = N>,
    F: Fn(T) -> N + Clone,
{
    move |colliding, incoming, _key| {
        let incoming = to_number(incoming);
        match colliding {
            Some(sum) => Some(sum + incoming),
            None => Some(incoming),
        }
    }
}

/// Counts how many values arrived at a key, ignoring what they are.
pub fn count<K, T>() -> impl Fn(Option<usize>, T, &K) -> Option<usize> + Clone {
    |colliding, _incoming, _key| Some(colliding.unwrap_or(0) + 1)
}

/// Flattens iterable values arriving at a key into one `Vec`.
pub fn concat<K, I>() -> impl Fn(Option<Vec<I::Item>>, I, &K) -> Option<Vec<I::Item>> + Clone
where
    I: IntoIterator,
{
    |colliding, incoming, _key| {
        let mut list = colliding.unwrap_or_default();
        list.extend(incoming);
        Some(list)
    }
}

/// Builds the first value at a key with `mapper` and folds every later one in with `reducer`.
///
/// `reducer` runs whenever the slot is occupied, even if what it holds is an "empty" value such as
/// `None` or `0`.
pub fn fold<K, T, V, M, R>(mapper: M, reducer: R) -> impl Fn(Option<V>, T, &K) -> Option<V> + Clone
where
    M: Fn(T, &K) -> V + Clone,
    R: Fn(V, T, &K) -> V + Clone,
{
    move |colliding, incoming, key| match colliding {
        Some(accumulated) => Some(reducer(accumulated, incoming, key)),
        None => Some(mapper(incoming, key)),
    }
}

/// Plain overwrite: the incoming value always replaces the stored one.
pub fn default<K, V>() -> impl Fn(Option<V>, V, &K) -> Option<V> + Clone {
    |_colliding, incoming, _key| Some(incoming)
}

/// Keeps the stored value if there is one; only vacant keys take the incoming value.
pub fn first<K, V>() -> impl Fn(Option<V>, V, &K) -> Option<V> + Clone {
    |colliding, incoming, _key| Some(colliding.unwrap_or(incoming))
}
