//! The `eventual` module implements a map which is populated from an asynchronous stream of entries
//! while it is already being queried. A query for a key that has not arrived yet waits until either
//! the key arrives, or the stream ends, at which point the key is known to be absent.
//!
//! Ingestion is performed by a single driver, the [`Ingestion`] future, which consumes the stream
//! in order. The first entry for a key wins; later entries for the same key are dropped, unless a
//! [`Bumper`](crate::Bumper) is configured to find them another key. Queries that cannot be
//! answered yet register a line on a switchboard; the driver resolves the line when the key is
//! written, and resolves all remaining lines with absence when the stream ends (finalization).
//! After finalization every query is a direct lookup in the map.
//!
//! The state shared by the driver and the queries is guarded by a mutex which is never held across
//! an `.await`, so every ingestion step and every query registration happens atomically with
//! respect to the others, and each query observes the map either before or after an entry is
//! written.
mod switchboard;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::future::{FutureExt, Shared};
use futures::Stream;
use log::{debug, trace};
use tokio::sync::oneshot::{self, Receiver, Sender};

use self::switchboard::{Pending, Switchboard};
use crate::bump::{self, Bumper};
use crate::{AsyncKey, AsyncStorable, Error, Failure, MapLike};

type BoxedBumper<K, V> = Box<dyn Bumper<K, V> + Send>;

/// Configuration for an [`EventualMap`]: the map it starts from, and how it handles colliding keys.
pub struct EventualMapOptions<K, V, M = HashMap<K, V>> {
    seed: M,
    bumper: Option<BoxedBumper<K, V>>,
}

impl<K, V, M: Default> EventualMapOptions<K, V, M> {
    /// Starts from an empty map and drops colliding entries.
    pub fn new() -> Self {
        Self::seeded(M::default())
    }
}

impl<K, V, M: Default> Default for EventualMapOptions<K, V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, M> EventualMapOptions<K, V, M> {
    /// Starts from `seed`, which may already hold entries. Seeded entries win over arriving ones,
    /// just like entries that arrived earlier.
    pub fn seeded(seed: M) -> Self {
        EventualMapOptions { seed, bumper: None }
    }

    pub fn seed(mut self, seed: M) -> Self {
        self.seed = seed;
        self
    }

    /// Moves colliding entries to the keys `bumper` proposes, instead of dropping them.
    pub fn bumper<B: Bumper<K, V> + Send + 'static>(mut self, bumper: B) -> Self {
        self.bumper = Some(Box::new(bumper));
        self
    }
}

impl<K, V, M> fmt::Debug for EventualMapOptions<K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventualMapOptions")
            .field("bumper", &self.bumper.is_some())
            .finish()
    }
}

struct Core<K, V, M> {
    map: M,
    switchboard: Switchboard<K, V>,
    finalized: bool,
    finished: Option<Sender<()>>,
}

enum Lookup<V> {
    Ready(Option<V>),
    Waiting(Pending<V>),
}

impl<V: AsyncStorable> Lookup<V> {
    async fn resolve(self) -> Option<V> {
        match self {
            Lookup::Ready(value) => value,
            Lookup::Waiting(pending) => match pending.await {
                Ok(value) => value,
                // Lines are resolved on write, or at the latest at finalization, which also runs
                // when the driver is dropped. A line dropped unresolved means that invariant is
                // broken.
                Err(_) => panic!("Switchboard line dropped without resolution!"),
            },
        }
    }
}

impl<K, V, M> Core<K, V, M>
where
    K: AsyncKey,
    V: AsyncStorable,
    M: MapLike<K, V>,
{
    fn lookup(&mut self, key: &K) -> Lookup<V> {
        match self.map.get(key) {
            Some(value) => Lookup::Ready(Some(value.clone())),
            None if self.finalized => Lookup::Ready(None),
            None => Lookup::Waiting(self.switchboard.query(key)),
        }
    }

    fn ingest(&mut self, key: K, value: V, bumper: Option<&(dyn Bumper<K, V> + Send)>) {
        if self.finalized {
            return;
        }

        let key = if !self.map.contains_key(&key) {
            key
        } else if let Some(bumper) = bumper {
            match bump::vacant_key(&self.map, key, &value, bumper) {
                Some(key) => {
                    trace!("entry bumped to {:?}", key);
                    key
                }
                None => return,
            }
        } else {
            trace!("duplicate entry for {:?} dropped", key);
            return;
        };

        if self.switchboard.resolve(&key, &value) {
            trace!("resolved pending queries for {:?}", key);
        }
        self.map.insert(key, value);
    }

    fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;

        let absent = self.switchboard.resolve_remaining();
        debug!(
            "eventual map finalized with {} entries, {} pending key(s) absent",
            self.map.len(),
            absent
        );

        if let Some(finished) = self.finished.take() {
            let _ = finished.send(());
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A map populated from an asynchronous stream, whose queries resolve once the answer is certain.
///
/// Clones share the same map. All query methods register their interest synchronously, when called,
/// and return a future which is independent of `self` and of the key reference.
pub struct EventualMap<K, V, M = HashMap<K, V>> {
    core: Arc<Mutex<Core<K, V, M>>>,
    finished: Shared<Receiver<()>>,
}

impl<K, V, M> Clone for EventualMap<K, V, M> {
    fn clone(&self) -> Self {
        EventualMap {
            core: self.core.clone(),
            finished: self.finished.clone(),
        }
    }
}

impl<K: AsyncKey, V: AsyncStorable> EventualMap<K, V> {
    /// Creates an empty map fed by `source`, returning it with the driver that performs the
    /// ingestion. Nothing is ingested until the driver is polled.
    pub fn from_stream<S>(source: S) -> (Self, Ingestion<K, V, HashMap<K, V>, S>)
    where
        S: Stream<Item = (K, V)>,
    {
        Self::with_options(source, EventualMapOptions::new())
    }

    /// Creates an empty map fed by `source`, ingesting on a newly spawned task.
    pub fn spawn<S>(source: S) -> Self
    where
        S: Stream<Item = (K, V)> + Send + 'static,
    {
        Self::spawn_with_options(source, EventualMapOptions::new())
    }
}

impl<K, V, M> EventualMap<K, V, M>
where
    K: AsyncKey,
    V: AsyncStorable,
    M: MapLike<K, V> + Send + 'static,
{
    pub fn with_options<S>(
        source: S,
        options: EventualMapOptions<K, V, M>,
    ) -> (Self, Ingestion<K, V, M, S>)
    where
        S: Stream<Item = (K, V)>,
    {
        let (finished_sender, finished_receiver) = oneshot::channel();
        let core = Arc::new(Mutex::new(Core {
            map: options.seed,
            switchboard: Switchboard::default(),
            finalized: false,
            finished: Some(finished_sender),
        }));

        let ingestion = Ingestion {
            core: core.clone(),
            source: Box::pin(source),
            bumper: options.bumper,
        };

        (
            EventualMap {
                core,
                finished: finished_receiver.shared(),
            },
            ingestion,
        )
    }

    pub fn spawn_with_options<S>(source: S, options: EventualMapOptions<K, V, M>) -> Self
    where
        S: Stream<Item = (K, V)> + Send + 'static,
    {
        let (map, ingestion) = Self::with_options(source, options);
        tokio::task::spawn(ingestion);
        map
    }

    fn lookup(&self, key: &K) -> Lookup<V> {
        lock(&self.core).lookup(key)
    }

    /// The most general query: resolves with `on_found(value)` if `key` is or becomes present, or
    /// with `on_absent()` once it is certain that it never will be.
    pub fn folding_get<T, F, A>(
        &self,
        key: &K,
        on_found: F,
        on_absent: A,
    ) -> impl Future<Output = T> + Send
    where
        F: FnOnce(V) -> T + Send + 'static,
        A: FnOnce() -> T + Send + 'static,
    {
        let lookup = self.lookup(key);
        async move {
            match lookup.resolve().await {
                Some(value) => on_found(value),
                None => on_absent(),
            }
        }
    }

    pub fn get(&self, key: &K) -> impl Future<Output = Option<V>> + Send {
        self.folding_get(key, Some, || None)
    }

    pub fn has(&self, key: &K) -> impl Future<Output = bool> + Send {
        self.folding_get(key, |_| true, || false)
    }

    /// Resolves with the value at `key`, or with `substitute(key)` if there will never be one.
    pub fn get_or_else<F>(&self, key: &K, substitute: F) -> impl Future<Output = V> + Send
    where
        F: FnOnce(&K) -> V + Send + 'static,
    {
        let owned = key.clone();
        self.folding_get(key, |value| value, move || substitute(&owned))
    }

    pub fn get_or_val(&self, key: &K, fallback: V) -> impl Future<Output = V> + Send {
        self.folding_get(key, |value| value, move || fallback)
    }

    /// Resolves with the value at `key`, or fails with [`Error::NotFound`] once it is certain that
    /// there will never be one. `failure` describes the message, see [`Failure`].
    pub fn get_or_fail<E>(
        &self,
        key: &K,
        failure: E,
    ) -> impl Future<Output = Result<V, Error>> + Send
    where
        K: fmt::Display,
        E: Into<Failure<K>>,
    {
        let owned = key.clone();
        let failure = failure.into();
        self.folding_get(key, Ok, move || Err(failure.into_error(&owned)))
    }

    /// Returns the value currently at `key` without waiting, whether or not the map is finalized.
    pub fn get_now(&self, key: &K) -> Option<V> {
        lock(&self.core).map.get(key).cloned()
    }

    pub fn has_now(&self, key: &K) -> bool {
        lock(&self.core).map.contains_key(key)
    }

    pub fn is_finalized(&self) -> bool {
        lock(&self.core).finalized
    }

    /// The number of keys that have been queried but have neither arrived nor been resolved as
    /// absent.
    pub fn pending_keys(&self) -> usize {
        lock(&self.core).switchboard.len()
    }

    /// Resolves once the map is finalized, with a copy of the finished map.
    pub fn final_map(&self) -> impl Future<Output = M> + Send
    where
        M: Clone,
    {
        let core = self.core.clone();
        let finished = self.finished.clone();
        async move {
            // The sender is only ever dropped after sending.
            let _ = finished.await;
            let map = lock(&core).map.clone();
            map
        }
    }

    /// Gives `action` direct access to the underlying map.
    ///
    /// Writing to the map before it is finalized bypasses the switchboard: queries already waiting
    /// for a key written this way are not resolved by the write, and entries written this way take
    /// precedence over arriving ones. None of the guarantees of the query methods hold for keys
    /// modified like this.
    ///
    /// `action` runs while the map is locked, so it must not call back into this map or any of its
    /// clones: doing so deadlocks.
    pub fn with_underlying_map<U, F: FnOnce(&mut M) -> U>(&self, action: F) -> U {
        action(&mut lock(&self.core).map)
    }
}

impl<K, V, M> fmt::Debug for EventualMap<K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (finalized, pending) = {
            let core = lock(&self.core);
            (core.finalized, core.switchboard.len())
        };
        f.debug_struct("EventualMap")
            .field("finalized", &finalized)
            .field("pending", &pending)
            .finish()
    }
}

/// The driver of an [`EventualMap`]: a future which consumes the source stream into the map, and
/// finalizes the map when the stream ends.
///
/// Dropping the driver before the stream ends finalizes the map with whatever has arrived so far.
pub struct Ingestion<K, V, M, S>
where
    K: AsyncKey,
    V: AsyncStorable,
    M: MapLike<K, V>,
{
    core: Arc<Mutex<Core<K, V, M>>>,
    source: Pin<Box<S>>,
    bumper: Option<BoxedBumper<K, V>>,
}

impl<K, V, M, S> Future for Ingestion<K, V, M, S>
where
    K: AsyncKey,
    V: AsyncStorable,
    M: MapLike<K, V>,
    S: Stream<Item = (K, V)>,
{
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        loop {
            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some((key, value))) => {
                    lock(&this.core).ingest(key, value, this.bumper.as_deref());
                }
                Poll::Ready(None) => {
                    lock(&this.core).finalize();
                    return Poll::Ready(());
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<K, V, M, S> Drop for Ingestion<K, V, M, S>
where
    K: AsyncKey,
    V: AsyncStorable,
    M: MapLike<K, V>,
{
    fn drop(&mut self) {
        let mut core = lock(&self.core);
        if !core.finalized {
            debug!("ingestion dropped before its source ended");
            core.finalize();
        }
    }
}
