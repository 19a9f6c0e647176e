//! # Live Mirror
//!
//! A [`LiveMirror`] keeps a local, projected copy of a collection up to date by following
//! the collection's change feed. Every applied change re-runs the [`Projection`] (filter,
//! then sort) and publishes the result on a `watch` channel, so readers always see the
//! latest snapshot and can `await` the next one instead of polling.
//!
//! ```text
//! ResourceActor ──ChangeEvent──▶ mirror task ──Arc<Vec<T>>──▶ watch::Receiver
//!                  (broadcast)    (HashMap by id)              (snapshot / changed)
//! ```
//!
//! The mirror only holds a weak client. It never keeps the collection alive, and it stops
//! on its own once the collection shuts down.
//!
//! ## Lagging
//! A mirror that falls more than [`EVENT_CAPACITY`](crate::actor::EVENT_CAPACITY) events
//! behind re-subscribes and replaces its local copy with the fresh snapshot, so a burst of
//! writes can delay the mirror but never make it miss a change.

use crate::change::{ChangeEvent, Subscription};
use crate::client::{ResourceClient, WeakResourceClient};
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// How a mirror turns the raw documents into the snapshot it publishes.
pub struct Projection<T> {
    filter: Filter<T>,
    order: Option<Comparator<T>>,
}

impl<T: Clone> Projection<T> {
    /// Keeps every document, in no particular order.
    pub fn all() -> Self {
        Self {
            filter: Box::new(|_| true),
            order: None,
        }
    }

    /// Keeps only documents matching `predicate`. Replaces any previous filter.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Box::new(predicate);
        self
    }

    /// Orders the snapshot with `compare`. The sort is stable.
    pub fn sort_by(mut self, compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.order = Some(Box::new(compare));
        self
    }

    pub fn project<'a>(&self, docs: impl IntoIterator<Item = &'a T>) -> Vec<T>
    where
        T: 'a,
    {
        let mut out: Vec<T> = docs.into_iter().filter(|d| (self.filter)(d)).cloned().collect();
        if let Some(order) = &self.order {
            out.sort_by(|a, b| order(a, b));
        }
        out
    }
}

/// A projected, continuously updated copy of a collection.
///
/// Dropping the mirror (or calling [`LiveMirror::cancel`]) unregisters it from the feed.
pub struct LiveMirror<T: CollectionEntity> {
    snapshot: watch::Receiver<Arc<Vec<T>>>,
    task: JoinHandle<()>,
}

impl<T: CollectionEntity> LiveMirror<T> {
    /// Subscribes to `client`'s collection and starts following it.
    ///
    /// The first snapshot is available as soon as this returns.
    pub async fn spawn(
        client: &ResourceClient<T>,
        projection: Projection<T>,
    ) -> Result<Self, FrameworkError> {
        let Subscription { snapshot, events } = client.subscribe().await?;
        let docs = index(snapshot);
        let (publisher, receiver) = watch::channel(Arc::new(projection.project(docs.values())));

        info!(collection = T::COLLECTION, size = docs.len(), "Mirror started");
        let task = tokio::spawn(follow(
            client.downgrade(),
            projection,
            docs,
            events,
            publisher,
        ));

        Ok(Self {
            snapshot: receiver,
            task,
        })
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.borrow().clone()
    }

    /// A receiver that observes every snapshot this mirror publishes.
    pub fn watch(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.snapshot.clone()
    }

    /// Waits for the next snapshot.
    ///
    /// Fails with `ActorClosed` once the mirror has stopped.
    pub async fn changed(&mut self) -> Result<Arc<Vec<T>>, FrameworkError> {
        self.snapshot
            .changed()
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        Ok(self.snapshot.borrow_and_update().clone())
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops following the collection. The last snapshot stays readable.
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            debug!(collection = T::COLLECTION, "Mirror cancelled");
        }
        self.task.abort();
    }
}

impl<T: CollectionEntity> Drop for LiveMirror<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn index<T: CollectionEntity>(docs: Vec<T>) -> HashMap<T::Id, T> {
    docs.into_iter().map(|doc| (doc.id().clone(), doc)).collect()
}

fn apply<T: CollectionEntity>(docs: &mut HashMap<T::Id, T>, event: ChangeEvent<T>) {
    match event {
        ChangeEvent::Added(doc) | ChangeEvent::Modified(doc) => {
            docs.insert(doc.id().clone(), doc);
        }
        ChangeEvent::Removed(id) => {
            docs.remove(&id);
        }
    }
}

async fn follow<T: CollectionEntity>(
    client: WeakResourceClient<T>,
    projection: Projection<T>,
    mut docs: HashMap<T::Id, T>,
    mut events: broadcast::Receiver<ChangeEvent<T>>,
    publisher: watch::Sender<Arc<Vec<T>>>,
) {
    let collection = T::COLLECTION;
    loop {
        match events.recv().await {
            Ok(event) => apply(&mut docs, event),
            Err(RecvError::Lagged(skipped)) => {
                warn!(collection, skipped, "Mirror lagged, resubscribing");
                let Some(client) = client.upgrade() else {
                    break;
                };
                match client.subscribe().await {
                    Ok(fresh) => {
                        docs = index(fresh.snapshot);
                        events = fresh.events;
                    }
                    Err(e) => {
                        warn!(collection, error = %e, "Resubscribe failed");
                        break;
                    }
                }
            }
            Err(RecvError::Closed) => break,
        }
        publisher.send_replace(Arc::new(projection.project(docs.values())));
    }
    info!(collection, size = docs.len(), "Mirror stopped");
}
