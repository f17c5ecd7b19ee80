//! This crate provides key-value collection utilities and, at its core, the [`EventualMap`]: a map
//! which is filled from an asynchronous stream of entries, and whose queries resolve correctly
//! whether the requested key has already arrived, arrives later, or never arrives at all.
//!
//! The synchronous helpers in [`collect`] and the reconcilers in [`reconcile`] share one merge
//! contract, so that collecting a finite iterator and collecting an asynchronous stream can be
//! reasoned about in the same terms.
#![crate_name = "eventual_map"]
pub mod bimap;
pub mod bump;
pub mod canonical;
pub mod collect;
mod error;
pub mod eventual;
pub mod map_like;
pub mod reconcile;

use std::hash::Hash;

pub use bimap::BiMap;
pub use bump::Bumper;
pub use canonical::CanonicalMap;
pub use error::{Error, Failure};
pub use eventual::{EventualMap, EventualMapOptions, Ingestion};
pub use map_like::MapLike;
pub use reconcile::Reconciler;

/// A trait for types that can be held in a collection used in an asynchronous context,
/// which might be shared between many tasks. A blanket implementation is provided.
pub trait AsyncStorable: Clone + Send + Sync + std::fmt::Debug + Unpin + 'static {}
impl<T: Clone + Send + Sync + Unpin + std::fmt::Debug + 'static> AsyncStorable for T {}

/// A trait for types that can be keys in an asynchronous map. A blanket implementation is provided.
pub trait AsyncKey: AsyncStorable + Hash + Eq {}
impl<T: AsyncStorable + Hash + Eq> AsyncKey for T {}
