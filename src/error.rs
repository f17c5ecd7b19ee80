use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Raised by [`EventualMap::get_or_fail`](crate::EventualMap::get_or_fail) once the key is
    /// known to be absent.
    #[error("{0}")]
    NotFound(String),
}

/// How [`EventualMap::get_or_fail`](crate::EventualMap::get_or_fail) describes a missing key.
///
/// Plain strings convert into [`Failure::Message`], so `map.get_or_fail(&key, "gone")` works, as
/// does `Failure::Default` for the generic `Map has no entry "<key>"` message.
pub enum Failure<K> {
    Default,
    Message(String),
    WithKey(Box<dyn FnOnce(&K) -> String + Send>),
}

impl<K> Failure<K> {
    pub fn with_key<F: FnOnce(&K) -> String + Send + 'static>(describe: F) -> Self {
        Failure::WithKey(Box::new(describe))
    }
}

impl<K: fmt::Display> Failure<K> {
    pub(crate) fn into_error(self, key: &K) -> Error {
        let message = match self {
            Failure::Default => format!("Map has no entry \"{}\"", key),
            Failure::Message(message) => message,
            Failure::WithKey(describe) => describe(key),
        };
        Error::NotFound(message)
    }
}

impl<K> Default for Failure<K> {
    fn default() -> Self {
        Failure::Default
    }
}

impl<K> From<&str> for Failure<K> {
    fn from(message: &str) -> Self {
        Failure::Message(message.to_owned())
    }
}

impl<K> From<String> for Failure<K> {
    fn from(message: String) -> Self {
        Failure::Message(message)
    }
}

impl<K> fmt::Debug for Failure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Default => f.write_str("Failure::Default"),
            Failure::Message(message) => f.debug_tuple("Failure::Message").field(message).finish(),
            Failure::WithKey(_) => f.write_str("Failure::WithKey(..)"),
        }
    }
}
