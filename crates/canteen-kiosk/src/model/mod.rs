//! Documents and session-local values shared by the collections, the kiosk controller and
//! the derived views.

pub mod cart;
pub mod menu;
pub mod order;
pub mod session;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use session::*;
