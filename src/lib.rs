//! agent-adapter - Expose a JSON run-case handler over HTTP
//!
//! This library wraps a single handler function (JSON value in, JSON value
//! out) and serves it on `POST /run-case`, next to a `POST /health` probe.
//! Malformed bodies and handler failures are reported as structured JSON
//! error envelopes.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapter;
pub mod api;
pub mod config;
pub mod server;

pub use adapter::{Adapter, Listener, ServeError};
pub use api::Handler;
pub use config::AdapterConfig;
