//! # Framework Errors
//!
//! Errors raised by the collection plumbing itself, independent of any document type.
//! Document-level failures travel inside [`FrameworkError::EntityError`].

/// Errors that can occur within the collection framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Collection closed")]
    ActorClosed,
    #[error("Collection dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recover the typed document error, if this is one.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Takes the typed document error out, or hands `self` back unchanged.
    pub fn into_entity_error<E: std::error::Error + 'static>(self) -> Result<E, Self> {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
