//! # Menu Actor
//!
//! The `menu` collection: every dish the kiosk can sell.
//!
//! ## Structure
//!
//! - [`entity`] - [`CollectionEntity`](collection_framework::CollectionEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`]
//! - [`actions`] - [`MenuAction`], the availability toggle
//! - [`new()`] - creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use canteen_kiosk::clients::MenuClient;
//! use canteen_kiosk::menu_actor;
//! use canteen_kiosk::model::{Category, MenuItemCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = menu_actor::new(32);
//!     let client = MenuClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .add_item(MenuItemCreate::new("Masala Chai", "Ginger tea.", 15.0, Category::Drink))
//!         .await?;
//!     assert!(!client.toggle_availability(id).await?);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{MenuItem, MenuItemId};
use collection_framework::{ResourceActor, ResourceClient};

/// Creates a new menu actor and its client. Admin-added dishes get generated ids.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size, MenuItemId::generate)
}
