//! # Collection Actor
//!
//! `ResourceActor` owns one document collection. It processes requests sequentially,
//! runs the entity hooks, and publishes a [`ChangeEvent`] for every committed write.

use crate::change::{BatchOp, ChangeEvent, Subscription};
use crate::client::ResourceClient;
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::{HashMap, HashSet};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change feed. A subscriber that falls further behind than this
/// receives `RecvError::Lagged` and has to resynchronise from a listing.
pub const EVENT_CAPACITY: usize = 256;

/// The generic actor that manages a collection of documents.
///
/// # Architecture Note
/// This struct is the "server" half of the collection. It owns the store, the receiving
/// end of the request channel and the sending end of the change feed.
///
/// **Concurrency Model**:
/// Requests are handled one at a time inside a single Tokio task, so the store needs no
/// lock, and a subscriber's snapshot is always consistent with the events that follow it.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its `ResourceClient`.
/// 2.  **Wire**: pass the entity's context into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Operations
///
/// * **Create**: draws an id from the id generator, builds the document, runs `on_create`,
///   stores it and publishes `Added`.
/// * **Update** / **Action**: run the hook on a copy of the document; the copy replaces the
///   stored one only when the hook succeeds, then `Modified` is published.
/// * **Delete**: runs `on_delete`, removes the document and publishes `Removed`.
/// * **Batch**: stages every operation against a copy of the store. Any failure discards
///   the copy; success swaps it in and publishes one event per touched document.
/// * **Subscribe**: returns the current documents and a fresh change-feed receiver.
pub struct ResourceActor<T: CollectionEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    events: broadcast::Sender<ChangeEvent<T>>,
    next_id: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: CollectionEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full, client calls
    ///   wait for space.
    /// * `next_id` - Id generator used by `create`.
    pub fn new(
        buffer_size: usize,
        next_id: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            events,
            next_id: Box::new(next_id),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Seeds the store before the actor starts. No events are published for these.
    pub fn with_documents(mut self, documents: impl IntoIterator<Item = T>) -> Self {
        for doc in documents {
            self.store.insert(doc.id().clone(), doc);
        }
        self
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, which lets documents reach dependencies
    /// that were created after the actor itself.
    pub async fn run(mut self, context: T::Context) {
        let collection = T::COLLECTION;
        info!(collection, size = self.store.len(), "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(collection, ?params, "Create");
                    let id = (self.next_id)();

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(collection, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(collection, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item.clone());
                    self.publish(ChangeEvent::Added(item));
                    info!(collection, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(collection, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(collection, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut item = current.clone();
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(collection, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item.clone());
                    self.publish(ChangeEvent::Modified(item.clone()));
                    info!(collection, %id, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(collection, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.publish(ChangeEvent::Removed(id.clone()));
                    info!(collection, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(collection, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut item = current.clone();
                    match item.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), item.clone());
                            self.publish(ChangeEvent::Modified(item));
                            info!(collection, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(collection, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Batch { ops, respond_to } => {
                    let op_count = ops.len();
                    debug!(collection, op_count, "Batch");
                    let staged = self.stage_batch(ops, &context).await;
                    match staged {
                        Ok((staged, touched)) => {
                            let previous = std::mem::replace(&mut self.store, staged);
                            for id in touched {
                                match (previous.contains_key(&id), self.store.get(&id)) {
                                    (false, Some(doc)) => self.publish(ChangeEvent::Added(doc.clone())),
                                    (true, Some(doc)) => self.publish(ChangeEvent::Modified(doc.clone())),
                                    (true, None) => self.publish(ChangeEvent::Removed(id)),
                                    (false, None) => {}
                                }
                            }
                            info!(collection, op_count, size = self.store.len(), "Batch committed");
                            let _ = respond_to.send(Ok(()));
                        }
                        Err(e) => {
                            warn!(collection, op_count, error = %e, "Batch rejected");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Subscribe { respond_to } => {
                    let subscription = Subscription {
                        snapshot: self.store.values().cloned().collect(),
                        events: self.events.subscribe(),
                    };
                    info!(
                        collection,
                        observers = self.events.receiver_count(),
                        "Observer registered"
                    );
                    let _ = respond_to.send(Ok(subscription));
                }
            }
        }

        info!(collection, size = self.store.len(), "Shutdown");
    }

    /// Applies `ops` to a copy of the store. Returns the copy and the touched ids in
    /// first-touch order.
    async fn stage_batch(
        &self,
        ops: Vec<BatchOp<T>>,
        context: &T::Context,
    ) -> Result<(HashMap<T::Id, T>, Vec<T::Id>), FrameworkError> {
        let mut staged = self.store.clone();
        let mut seen = HashSet::new();
        let mut touched = Vec::new();

        for op in ops {
            let id = match op {
                BatchOp::Set { id, params } => {
                    let mut item = T::from_create_params(id.clone(), params)
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
                    item.on_create(context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
                    staged.insert(id.clone(), item);
                    id
                }
                BatchOp::Delete(id) => {
                    if let Some(item) = staged.get(&id) {
                        item.on_delete(context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
                        staged.remove(&id);
                    }
                    id
                }
            };
            if seen.insert(id.clone()) {
                touched.push(id);
            }
        }

        Ok((staged, touched))
    }

    fn publish(&self, event: ChangeEvent<T>) {
        // Err only means nobody is subscribed right now.
        let _ = self.events.send(event);
    }
}
