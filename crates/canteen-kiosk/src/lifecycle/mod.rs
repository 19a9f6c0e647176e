//! # System Lifecycle
//!
//! Starting, wiring and stopping the collections and the kiosk on top of them.
//!
//! ## Wiring
//!
//! Each collection is created first and started with its context afterwards:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(config.channel_buffer);
//! let handle = tokio::spawn(order_actor.run(config.status_policy));
//! ```
//!
//! The menu needs no context. The orders collection receives the
//! [`TransitionPolicy`](crate::order_actor::TransitionPolicy) that decides whether
//! out-of-table status changes are refused.
//!
//! ## Graceful Shutdown
//!
//! 1. **Close the kiosk** - stops the mirrors and any running countdown
//! 2. **Drop all clients** - closes the request channels
//! 3. **Collections detect closure** - `receiver.recv()` returns `None` and they log their final size
//! 4. **Await completion** - wait for every collection task
//!
//! Mirrors only hold weak clients, so they never keep a collection running. Kiosk
//! clones do: drop them before shutting down.

pub mod kiosk_system;

pub use kiosk_system::*;
