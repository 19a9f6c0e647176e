//! # Order Client
//!
//! High-level API for the `orders` collection. Placing an order is a single create; every
//! later change goes through [`OrderClient::update_status`].
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError, StatusChange};
use async_trait::async_trait;
use collection_framework::{CollectionClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(token = %params.token_number, student = %params.student_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(lines = params.items.len(), "Sending request");
        let id = self.inner.create(params).await.map_err(OrderError::from)?;
        info!(%id, "Order placed");
        Ok(id)
    }

    /// Moves the order to `status`. Whether an out-of-table move is rejected depends on
    /// the collection's transition policy.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<StatusChange, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Transition(status))
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl CollectionClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
