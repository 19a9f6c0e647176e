//! Error types for the order actor.

use crate::model::OrderStatus;
use collection_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order must contain at least one item.
    #[error("Order has no items")]
    EmptyOrder,

    /// The status change is not in the transition table.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Orders are not patched after creation; only their status moves.
    #[error("Order {0} cannot be edited")]
    ImmutableOrder(String),

    /// Orders are kept forever.
    #[error("Order {0} cannot be deleted")]
    DeleteForbidden(String),

    /// An error occurred while communicating with the collection.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
