//! The handler extension point
//!
//! A [`Handler`] maps one decoded request value to a response value. Plain
//! functions and closures of type `Fn(Value) -> anyhow::Result<Value>` are
//! handlers already; [`typed`] and [`wrap_simple_agent`] lift typed agents
//! into handlers.

use std::fmt;
use std::marker::PhantomData;

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use super::types::{AgentOutput, AgentResponse, FinalOutput, RunCaseInput, RunCaseRequest};

/// Business logic invoked for every well-formed `/run-case` request
pub trait Handler {
    /// Handle one request. An `Err` becomes a `handler_error` response.
    fn handle(&self, request: Value) -> anyhow::Result<Value>;
}

impl<F> Handler for F
where
    F: Fn(Value) -> anyhow::Result<Value>,
{
    fn handle(&self, request: Value) -> anyhow::Result<Value> {
        self(request)
    }
}

// =============================================================================
// TYPED HANDLERS
// =============================================================================

/// Handler that decodes the request into `Req` and encodes `Resp` back
///
/// Created with [`typed`].
pub struct Typed<F, Req, Resp> {
    f: F,
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<F, Req, Resp> fmt::Debug for Typed<F, Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("request", &std::any::type_name::<Req>())
            .field("response", &std::any::type_name::<Resp>())
            .finish_non_exhaustive()
    }
}

/// Wrap a typed function as a [`Handler`]
///
/// A request value that does not decode into `Req` fails the handler, so the
/// client sees a `handler_error`; the adapter itself only checks that the body
/// is JSON.
pub const fn typed<F, Req, Resp>(f: F) -> Typed<F, Req, Resp>
where
    F: Fn(Req) -> anyhow::Result<Resp>,
    Req: DeserializeOwned,
    Resp: Serialize,
{
    Typed {
        f,
        _marker: PhantomData,
    }
}

impl<F, Req, Resp> Handler for Typed<F, Req, Resp>
where
    F: Fn(Req) -> anyhow::Result<Resp>,
    Req: DeserializeOwned,
    Resp: Serialize,
{
    fn handle(&self, request: Value) -> anyhow::Result<Value> {
        let request: Req =
            serde_json::from_value(request).context("request does not match the expected shape")?;
        let response = (self.f)(request)?;
        serde_json::to_value(response).context("failed to encode handler response")
    }
}

/// Wrap an agent that only sees the `input` part of a run-case request
///
/// The resulting handler echoes `case_id` and `version` from the request and
/// leaves out `workflow_id`, `events` and `proposed_actions` unless the agent
/// provides them.
pub fn wrap_simple_agent<A>(agent: A) -> impl Handler
where
    A: Fn(&RunCaseInput) -> anyhow::Result<AgentOutput>,
{
    typed(move |request: RunCaseRequest| -> anyhow::Result<AgentResponse> {
        let output = agent(&request.input)?;
        Ok(output.into_response(&request))
    })
}

// =============================================================================
// BUNDLED EXAMPLES
// =============================================================================

/// Untyped example handler
///
/// Echoes `case_id` and `version` (null when absent) and always answers
/// `"ok"` with no events.
pub fn example_handler(request: Value) -> anyhow::Result<Value> {
    let field = |name: &str| request.get(name).cloned().unwrap_or(Value::Null);
    Ok(json!({
        "case_id": field("case_id"),
        "version": field("version"),
        "final_output": {"content_type": "text", "content": "ok"},
        "events": [],
    }))
}

/// Example simple agent: answers `ok: <user>` under workflow `example_agent_v1`
pub fn example_simple_agent(input: &RunCaseInput) -> anyhow::Result<AgentOutput> {
    Ok(AgentOutput::new(FinalOutput::text(format!("ok: {}", input.user)))
        .with_workflow_id("example_agent_v1")
        .with_events(Vec::new()))
}
