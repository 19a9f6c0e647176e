//! Error types for the menu actor.

use collection_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested dish was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    #[error("Menu item name is required")]
    MissingName,

    #[error("Menu item description is required")]
    MissingDescription,

    /// Negative, NaN or infinite.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// An error occurred while communicating with the collection.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for MenuError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => other
                .into_entity_error::<MenuError>()
                .unwrap_or_else(|e| MenuError::ActorCommunicationError(e.to_string())),
        }
    }
}
