//! Bumpers resolve key collisions by proposing an alternate key for the incoming entry.
//!
//! When an entry arrives at an occupied key, the bumper is asked for another key, given the key
//! that collided, how many attempts have been made for this entry (starting at 1), the entry's
//! original key, the value stored at the colliding key, and the incoming value. A vacant key is
//! written to; an occupied one triggers another attempt; `None` drops the entry.
//!
//! There is no built-in limit on attempts. A bumper that keeps proposing occupied keys loops
//! forever, so bumpers should inspect the attempt counter, or be wrapped with [`bounded`].
use log::debug;

use crate::MapLike;

pub trait Bumper<K, V> {
    fn bump(
        &self,
        candidate: &K,
        attempt: usize,
        original: &K,
        colliding: &V,
        incoming: &V,
    ) -> Option<K>;
}

impl<K, V, F> Bumper<K, V> for F
where
    F: Fn(&K, usize, &K, &V, &V) -> Option<K>,
{
    fn bump(
        &self,
        candidate: &K,
        attempt: usize,
        original: &K,
        colliding: &V,
        incoming: &V,
    ) -> Option<K> {
        self(candidate, attempt, original, colliding, incoming)
    }
}

/// Wraps `bumper` so that it gives up once `max_attempts` proposals have been made for one entry.
pub fn bounded<K, V, B>(
    bumper: B,
    max_attempts: usize,
) -> impl Fn(&K, usize, &K, &V, &V) -> Option<K>
where
    B: Bumper<K, V>,
{
    move |candidate, attempt, original, colliding, incoming| {
        if attempt > max_attempts {
            None
        } else {
            bumper.bump(candidate, attempt, original, colliding, incoming)
        }
    }
}

/// Runs the bump loop for an entry arriving at `key`, returning the vacant key it should be written
/// to, or `None` if the bumper gave up. The map itself is not modified.
pub(crate) fn vacant_key<M, K, V, B>(map: &M, key: K, value: &V, bumper: &B) -> Option<K>
where
    M: MapLike<K, V> + ?Sized,
    B: Bumper<K, V> + ?Sized,
{
    let mut attempt = 0;
    let mut bumped: Option<K> = None;

    loop {
        let candidate = bumped.as_ref().unwrap_or(&key);
        let colliding = match map.get(candidate) {
            Some(colliding) => colliding,
            None => break,
        };

        attempt += 1;
        match bumper.bump(candidate, attempt, &key, colliding, value) {
            Some(next) => bumped = Some(next),
            None => {
                debug!("bumper gave up after {} attempt(s); entry dropped", attempt);
                return None;
            }
        }
    }

    Some(bumped.unwrap_or(key))
}
