//! # Observability
//!
//! [`setup_tracing`] installs the process-wide subscriber used by every binary built on
//! this framework. Collections log with a `collection` field instead of module paths, so
//! targets are hidden and the compact format keeps spans inline.
//!
//! ```bash
//! RUST_LOG=info cargo run    # lifecycle: started, created, updated, shutdown
//! RUST_LOG=debug cargo run   # full request payloads
//! ```
//!
//! With `RUST_LOG=info` a checkout reads roughly like:
//!
//! ```text
//! INFO Collection started collection="orders" size=0
//! INFO place_order: Placing order token="#4821" items=2
//! INFO Created collection="orders" id=9f1c… size=1
//! ```

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG`.
///
/// Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
