//! # Order Actor
//!
//! The `orders` collection. An order is written once at checkout; afterwards only its
//! status moves, through [`OrderAction::Transition`]. Orders are never patched or deleted.
//!
//! ## Structure
//!
//! - [`entity`] - [`CollectionEntity`](collection_framework::CollectionEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`] and [`StatusChange`]
//! - [`policy`] - [`TransitionPolicy`], injected as the actor's context
//!
//! ## Transition Policy
//!
//! The policy is handed to `run()`:
//!
//! ```rust,ignore
//! let (actor, client) = order_actor::new(32);
//! tokio::spawn(actor.run(TransitionPolicy::Strict));
//! ```
//!
//! Under [`TransitionPolicy::Strict`] a move outside
//! [`OrderStatus::can_transition_to`](crate::model::OrderStatus::can_transition_to) fails
//! with [`OrderError::InvalidTransition`]. [`TransitionPolicy::Unchecked`] writes any status
//! and only logs a warning.

pub mod actions;
pub mod entity;
pub mod error;
pub mod policy;

pub use actions::*;
pub use error::*;
pub use policy::*;

use crate::model::{Order, OrderId};
use collection_framework::{ResourceActor, ResourceClient};

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size, OrderId::generate)
}
