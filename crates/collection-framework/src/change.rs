//! # Change Feed
//!
//! Every mutation a `ResourceActor` commits is published as a [`ChangeEvent`] on a
//! broadcast channel. Observers register through `ResourceClient::subscribe`, which hands
//! back a [`Subscription`]: the collection as it was when the request was processed, plus
//! the receiver for every change committed after it. Because the actor handles requests
//! one at a time, no change can fall between the snapshot and the first event.

use crate::entity::CollectionEntity;
use tokio::sync::broadcast;

/// A single committed change to a collection.
#[derive(Debug, Clone)]
pub enum ChangeEvent<T: CollectionEntity> {
    /// A document that did not exist before.
    Added(T),
    /// The new state of an existing document.
    Modified(T),
    /// The id of a deleted document.
    Removed(T::Id),
}

impl<T: CollectionEntity> ChangeEvent<T> {
    pub fn id(&self) -> &T::Id {
        match self {
            ChangeEvent::Added(doc) | ChangeEvent::Modified(doc) => doc.id(),
            ChangeEvent::Removed(id) => id,
        }
    }
}

/// Observer registration returned by `subscribe`.
///
/// Dropping it unregisters the observer.
#[derive(Debug)]
pub struct Subscription<T: CollectionEntity> {
    /// Every document at registration time, in no particular order.
    pub snapshot: Vec<T>,
    /// Changes committed after the snapshot.
    pub events: broadcast::Receiver<ChangeEvent<T>>,
}

/// One write inside an atomic batch.
#[derive(Debug)]
pub enum BatchOp<T: CollectionEntity> {
    /// Create or overwrite the document stored under `id`.
    Set { id: T::Id, params: T::Create },
    /// Remove the document stored under `id`. Missing ids are ignored.
    Delete(T::Id),
}
