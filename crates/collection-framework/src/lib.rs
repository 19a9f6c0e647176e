//! # Collection Framework
//!
//! Building blocks for in-process document collections with a live change feed. Each
//! collection is owned by one actor task; callers talk to it through a typed client, and
//! observers follow it through a subscription that starts with a consistent snapshot.
//!
//! The framework plays the part of a hosted document database: create / get / list /
//! update / delete, custom per-document actions, atomic batches, and push notifications
//! for every committed write.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`CollectionEntity`]) - the document type, its payloads and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - owns the documents, serialises every request
//! 3. **Interface Layer** ([`ResourceClient`], [`CollectionClient`]) - typed request/response
//! 4. **Observation Layer** ([`Subscription`], [`LiveMirror`]) - change feed and projected read models
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use collection_framework::{CollectionEntity, LiveMirror, Projection, ResourceActor};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! #[derive(Clone, Debug)]
//! struct Dish {
//!     id: u32,
//!     name: String,
//!     price: f64,
//! }
//!
//! #[derive(Debug)] struct DishCreate { name: String, price: f64 }
//! #[derive(Debug)] struct DishUpdate { price: Option<f64> }
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl CollectionEntity for Dish {
//!     type Id = u32;
//!     type Create = DishCreate;
//!     type Update = DishUpdate;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = DishError;
//!     const COLLECTION: &'static str = "dishes";
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(id: u32, params: DishCreate) -> Result<Self, DishError> {
//!         Ok(Self { id, name: params.name, price: params.price })
//!     }
//!
//!     async fn on_update(&mut self, update: DishUpdate, _: &()) -> Result<(), DishError> {
//!         if let Some(price) = update.price { self.price = price; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), DishError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let next = AtomicU32::new(1);
//!     let (actor, client) = ResourceActor::<Dish>::new(10, move || next.fetch_add(1, Ordering::Relaxed));
//!     tokio::spawn(actor.run(()));
//!
//!     let mut mirror = LiveMirror::spawn(
//!         &client,
//!         Projection::all().sort_by(|a: &Dish, b: &Dish| a.name.cmp(&b.name)),
//!     )
//!     .await
//!     .unwrap();
//!
//!     client.create(DishCreate { name: "Samosa".into(), price: 20.0 }).await.unwrap();
//!     let dishes = mirror.changed().await.unwrap();
//!     assert_eq!(dishes[0].name, "Samosa");
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies reach the entity hooks through `run(context)` rather than `new()`, so
//! collections can be constructed first and wired together afterwards.
//!
//! ## Concurrency Model
//!
//! - Each collection runs in its own Tokio task
//! - Requests are processed **sequentially** within a collection (no locks)
//! - Update and action hooks work on a copy; a failing hook leaves the stored document as it was
//! - Events are published after the write is committed, in commit order
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers client requests from scripted expectations and lets a test
//! push change events by hand. See the [`mock`] module.

pub mod actor;
pub mod change;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mirror;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use change::{BatchOp, ChangeEvent, Subscription};
pub use client::{ResourceClient, WeakResourceClient};
pub use client_trait::CollectionClient;
pub use entity::CollectionEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use mirror::{LiveMirror, Projection};
