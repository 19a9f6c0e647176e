//! Top-level error for kiosk operations.

use crate::auth::AuthError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::menu_actor::MenuError;
use crate::model::CartError;
use crate::order_actor::OrderError;
use collection_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KioskError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A live mirror could not be started.
    #[error("Live data error: {0}")]
    Mirror(#[from] FrameworkError),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Administrator access required")]
    Forbidden,

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}
