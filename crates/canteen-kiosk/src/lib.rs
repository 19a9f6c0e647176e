//! # Canteen Kiosk
//!
//! Self-service ordering for a college canteen. Students browse the menu, fill a tray and
//! place orders; administrators run the kitchen queue, manage the menu and read the sales
//! figures.
//!
//! - **[model]**: documents ([`MenuItem`](model::MenuItem), [`Order`](model::Order)) and
//!   session values
//! - **[menu_actor]**, **[order_actor]**: the two collections, with their validation and the
//!   order status machine
//! - **[clients]**: typed clients for both collections
//! - **[live]**, **[views]**: live mirrors and what is computed from them
//! - **[kiosk]**: the controller a front-end drives
//! - **[lifecycle]**: starting and stopping everything

pub mod auth;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod countdown;
pub mod default_menu;
pub mod error;
pub mod image;
pub mod insights;
pub mod kiosk;
pub mod lifecycle;
pub mod live;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod state;
pub mod views;

pub use error::KioskError;
pub use kiosk::Kiosk;
pub use lifecycle::KioskSystem;
