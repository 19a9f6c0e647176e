//! # Mock Collections & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of a running `ResourceActor`. Use it to test code that sits
//! *around* a collection client (typed clients, the kiosk controller) without any real
//! documents.
//!
//! | | MockClient | Real collection |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real documents, real hooks |
//! | **Change feed** | Pushed by the test through the sender from `expect_subscribe` | Published by the actor |
//! | **Error injection** | `return_err(...)` | Needs a document that actually fails |
//!
//! ## Patterns
//!
//! 1. **Client logic, pure mock**: script `expect_*` calls, drive the typed client, then
//!    call [`MockClient::verify`].
//! 2. **Single collection**: spawn a real `ResourceActor` with a fixed id generator.
//! 3. **Full system**: boot the application's lifecycle type and go through its clients.
//!
//! ```rust
//! use async_trait::async_trait;
//! use collection_framework::mock::MockClient;
//! use collection_framework::{CollectionEntity, FrameworkError};
//!
//! #[derive(Clone, Debug)] struct Note { id: u32, text: String }
//! #[derive(Debug)] struct NoteCreate;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl CollectionEntity for Note {
//!     type Id = u32; type Create = NoteCreate; type Update = (); type Action = ();
//!     type ActionResult = (); type Context = (); type Error = NoteError;
//!     const COLLECTION: &'static str = "notes";
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { id, text: String::new() })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_get(1).return_ok(Some(Note { id: 1, text: "hi".into() }));
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().text, "hi");
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For tests that need to inspect the raw request, [`create_mock_client`] returns the
//! receiving end of the channel and the `expect_*` free functions pull typed requests off it.

use crate::actor::EVENT_CAPACITY;
use crate::change::{BatchOp, ChangeEvent, Subscription};
use crate::client::ResourceClient;
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request.
enum Expectation<T: CollectionEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
    Batch {
        response: Result<(), FrameworkError>,
    },
    Subscribe {
        response: Result<Subscription<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with expectation tracking.
///
/// Expectations are consumed in order; a request that does not match the next expectation
/// panics the mock task, which the caller observes as `FrameworkError::ActorDropped`.
pub struct MockClient<T: CollectionEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    batches: Arc<Mutex<Vec<Vec<BatchOp<T>>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: CollectionEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CollectionEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let batches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen_batches = batches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Batch { ops, respond_to },
                        Some(Expectation::Batch { response }),
                    ) => {
                        seen_batches.lock().unwrap().push(ops);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Subscribe { respond_to },
                        Some(Expectation::Subscribe { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!(
                            "Unexpected {} request or expectation mismatch",
                            request_kind(&request)
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            batches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Get { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Update { response })
    }

    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(|response| Expectation::Delete { response })
    }

    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(|response| Expectation::Action { response })
    }

    /// Expects a batch. The received operations are kept for [`MockClient::take_batches`].
    pub fn expect_batch(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(|response| Expectation::Batch { response })
    }

    /// Expects a subscription answered with `snapshot`.
    ///
    /// Returns the sender side of the change feed, so the test can push events.
    pub fn expect_subscribe(&mut self, snapshot: Vec<T>) -> broadcast::Sender<ChangeEvent<T>> {
        let (sender, events) = broadcast::channel(EVENT_CAPACITY);
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Subscribe {
                response: Ok(Subscription { snapshot, events }),
            });
        sender
    }

    /// Expects a subscription that fails with `error`.
    pub fn expect_subscribe_err(&mut self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Subscribe {
                response: Err(error),
            });
    }

    /// Every batch received so far, oldest first. Clears the record.
    pub fn take_batches(&self) -> Vec<Vec<BatchOp<T>>> {
        std::mem::take(&mut *self.batches.lock().unwrap())
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder returned by the `expect_*` methods of [`MockClient`].
pub struct ExpectationBuilder<T: CollectionEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: CollectionEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

fn request_kind<T: CollectionEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
        ResourceRequest::Batch { .. } => "batch",
        ResourceRequest::Subscribe { .. } => "subscribe",
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the collection: it pulls each request off `receiver`, asserts on the
/// payload and answers through the request's responder. Useful when the payload itself
/// is what is under test.
pub fn create_mock_client<T: CollectionEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: CollectionEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: CollectionEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Batch request
pub async fn expect_batch<T: CollectionEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Vec<BatchOp<T>>,
    tokio::sync::oneshot::Sender<Result<(), FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Batch { ops, respond_to }) => Some((ops, respond_to)),
        _ => None,
    }
}
