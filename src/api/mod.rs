//! HTTP-agnostic run-case layer
//!
//! Everything needed to turn a request body into a response body without
//! touching an HTTP framework. The server adapter in [`crate::server`] only
//! routes and converts.
//!
//! ## Design
//!
//! - **Handlers are the only extension point**: `Value` in, `anyhow::Result<Value>` out
//! - **The adapter is schema-agnostic**: typed contracts live in [`types`] and are opt-in
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code and envelope

mod error;
mod handler;
mod run_case;
pub mod types;

pub use error::{ApiError, ErrorEnvelope, ErrorKind};
pub use handler::{Handler, Typed, example_handler, example_simple_agent, typed, wrap_simple_agent};
pub use run_case::{HEALTH_BODY, decode_body, invoke, run_case};
pub use types::{AgentOutput, AgentResponse, FinalOutput, RunCaseInput, RunCaseRequest, Version};
