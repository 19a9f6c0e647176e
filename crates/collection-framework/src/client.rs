//! # Generic Client
//!
//! The generic client for talking to a collection actor.

use crate::change::{BatchOp, Subscription};
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the request sender, so it is cheap to clone and share across tasks.
/// The actor stops once every client (strong handle) has been dropped.
#[derive(Clone)]
pub struct ResourceClient<T: CollectionEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: CollectionEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// A handle that does not keep the actor alive.
    pub fn downgrade(&self) -> WeakResourceClient<T> {
        WeakResourceClient {
            sender: self.sender.downgrade(),
        }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Commits `ops` atomically.
    pub async fn batch(&self, ops: Vec<BatchOp<T>>) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Batch { ops, respond_to })
            .await
    }

    /// Creates or overwrites the document stored under `id`.
    pub async fn set(&self, id: T::Id, params: T::Create) -> Result<(), FrameworkError> {
        self.batch(vec![BatchOp::Set { id, params }]).await
    }

    /// Registers an observer on the collection's change feed.
    pub async fn subscribe(&self) -> Result<Subscription<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Subscribe { respond_to })
            .await
    }
}

/// Non-owning counterpart of [`ResourceClient`].
#[derive(Clone)]
pub struct WeakResourceClient<T: CollectionEntity> {
    sender: mpsc::WeakSender<ResourceRequest<T>>,
}

impl<T: CollectionEntity> WeakResourceClient<T> {
    /// Returns a usable client while the actor is still running.
    pub fn upgrade(&self) -> Option<ResourceClient<T>> {
        self.sender.upgrade().map(ResourceClient::new)
    }
}
