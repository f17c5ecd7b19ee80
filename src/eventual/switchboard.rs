use std::collections::HashMap;
use std::hash::Hash;

use futures::future::{FutureExt, Shared};
use tokio::sync::oneshot::{self, Receiver, Sender};

/// The future every query for a not-yet-arrived key awaits. `None` means the key never arrived.
pub(crate) type Pending<V> = Shared<Receiver<Option<V>>>;

struct Line<V> {
    future: Pending<V>,
    resolver: Sender<Option<V>>,
}

/// Keeps one line per key that was queried before it arrived. All queries for the same key share
/// the line's future, and a line is removed at the moment it is resolved, so it cannot be resolved
/// twice.
pub(crate) struct Switchboard<K, V> {
    lines: HashMap<K, Line<V>>,
}

impl<K, V> Default for Switchboard<K, V> {
    fn default() -> Self {
        Switchboard {
            lines: HashMap::new(),
        }
    }
}

impl<K, V> Switchboard<K, V> {
    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}

impl<K, V> Switchboard<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Returns the future for `key`, opening a line for it if none exists yet.
    pub(crate) fn query(&mut self, key: &K) -> Pending<V> {
        if let Some(line) = self.lines.get(key) {
            return line.future.clone();
        }

        let (resolver, receiver) = oneshot::channel();
        let future = receiver.shared();
        self.lines.insert(
            key.clone(),
            Line {
                future: future.clone(),
                resolver,
            },
        );
        future
    }

    /// Resolves the line for `key`, if there is one, with `value`.
    pub(crate) fn resolve(&mut self, key: &K, value: &V) -> bool {
        match self.lines.remove(key) {
            Some(line) => {
                // The line still holds a receiver, so the send cannot fail.
                let _ = line.resolver.send(Some(value.clone()));
                true
            }
            None => false,
        }
    }

    /// Resolves every open line with absence, returning how many lines there were.
    pub(crate) fn resolve_remaining(&mut self) -> usize {
        let absent = self.lines.len();
        for (_, line) in self.lines.drain() {
            let _ = line.resolver.send(None);
        }
        absent
    }
}
