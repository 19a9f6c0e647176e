//! [`CollectionEntity`] implementation for [`Order`].

use super::actions::{OrderAction, StatusChange};
use super::error::OrderError;
use super::policy::TransitionPolicy;
use crate::model::{total_of, Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use collection_framework::CollectionEntity;
use tracing::warn;

#[async_trait]
impl CollectionEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = StatusChange;
    type Context = TransitionPolicy;
    type Error = OrderError;

    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Builds a `PENDING` order. The total is fixed here from the line items.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        Ok(Self {
            id,
            student_id: params.student_id,
            student_name: params.student_name,
            roll_no: params.roll_no,
            token_number: params.token_number,
            total_amount: total_of(&params.items),
            items: params.items,
            status: OrderStatus::Pending,
            timestamp: params.timestamp,
            payment_method: params.payment_method,
        })
    }

    async fn on_update(&mut self, _update: (), _policy: &TransitionPolicy) -> Result<(), OrderError> {
        Err(OrderError::ImmutableOrder(self.id.to_string()))
    }

    async fn on_delete(&self, _policy: &TransitionPolicy) -> Result<(), OrderError> {
        Err(OrderError::DeleteForbidden(self.id.to_string()))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        policy: &TransitionPolicy,
    ) -> Result<StatusChange, OrderError> {
        match action {
            OrderAction::Transition(to) => {
                let from = self.status;
                if !from.can_transition_to(to) {
                    match policy {
                        TransitionPolicy::Strict => {
                            return Err(OrderError::InvalidTransition { from, to });
                        }
                        TransitionPolicy::Unchecked => {
                            warn!(id = %self.id, %from, %to, "Status change outside the transition table");
                        }
                    }
                }
                self.status = to;
                Ok(StatusChange { from, to })
            }
        }
    }
}
