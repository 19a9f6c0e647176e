//! Turning a tray into an order payload.
use crate::model::{CartItem, OrderCreate, PaymentMethod, Session};
use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Your tray is empty")]
    EmptyCart,
}

/// `#` followed by a random number in `1000..=9999`. Tokens can repeat.
pub fn generate_token() -> String {
    format!("#{}", rand::thread_rng().gen_range(1000..=9999))
}

/// Builds the order for `items`, owned by `session`, stamped with `now`.
pub fn build_order(
    session: &Session,
    items: &[CartItem],
    payment_method: Option<PaymentMethod>,
    now: DateTime<Utc>,
) -> Result<OrderCreate, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(OrderCreate {
        student_id: session.uid.clone(),
        student_name: session.display_name.clone(),
        roll_no: session.roll_number().to_string(),
        token_number: generate_token(),
        items: items.to_vec(),
        payment_method,
        timestamp: now.timestamp_millis(),
    })
}
