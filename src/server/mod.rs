//! HTTP server adapters
//!
//! This module translates between an HTTP framework and the HTTP-agnostic
//! [`crate::api`] layer.
//!
//! Currently supported:
//! - `tiny_http` - Lightweight blocking HTTP server

pub mod tiny_http;

pub use self::tiny_http::{Route, handle_request};
