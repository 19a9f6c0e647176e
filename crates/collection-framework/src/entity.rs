//! # CollectionEntity Trait
//!
//! The `CollectionEntity` trait is the contract every document type (menu items, orders, ...)
//! implements to live inside a `ResourceActor`. It names the document's identifier, its
//! creation and patch payloads, its custom actions, the context injected at run time and
//! its error type, and it exposes the lifecycle hooks the actor calls around every mutation.
//!
//! # Provided Methods (Hooks)
//! - [`CollectionEntity::on_create`]
//! - [`CollectionEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document type must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can call other collections. The `Context` associated type is
/// handed to every hook; it is passed to `run()` rather than `new()`, which lets actors be
/// wired together after all of them have been constructed.
#[async_trait]
pub trait CollectionEntity: Clone + Send + Sync + 'static {
    /// Document identifier. The actor's id generator produces these for `create`;
    /// batch `set` operations supply them explicitly.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload for a new document.
    type Create: Send + Sync + Debug;

    /// Partial update applied to an existing document.
    type Update: Send + Sync + Debug;

    /// Document-specific operations (e.g. `ToggleAvailability`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error type for this document.
    ///
    /// One enum per collection rather than one per action: callers match a single
    /// `MenuError` or `OrderError` whatever the operation was.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name of the backing collection, as it appears in logs.
    const COLLECTION: &'static str;

    /// The document's identifier.
    fn id(&self) -> &Self::Id;

    /// Build the document from its id and payload. Runs before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the document is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a patch. Returning an error leaves the stored document untouched.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
