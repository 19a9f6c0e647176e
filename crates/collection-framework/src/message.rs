//! # Generic Messages
//!
//! Requests sent from a `ResourceClient` to its `ResourceActor`.

use crate::change::{BatchOp, Subscription};
use crate::entity::CollectionEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor that owns a collection.
///
/// The variants mirror what a document store offers a client: single-document CRUD,
/// a full listing, custom actions, atomic batches and change subscriptions. Each variant
/// uses the associated types of [`CollectionEntity`], so a menu payload can never reach
/// the orders collection.
#[derive(Debug)]
pub enum ResourceRequest<T: CollectionEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    /// All operations are applied, or none are.
    Batch {
        ops: Vec<BatchOp<T>>,
        respond_to: Response<()>,
    },
    Subscribe {
        respond_to: Response<Subscription<T>>,
    },
}
