//! Typed run-case contract
//!
//! The adapter itself moves `serde_json::Value` around and never looks inside
//! it. These types describe the conventional envelope shape so handlers can
//! decode requests and encode responses at the edge (see [`crate::api::typed`]).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Which side of a comparison run a case belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// The reference agent build
    Baseline,
    /// The candidate agent build
    New,
}

/// Body of a `/run-case` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCaseRequest {
    /// Case identifier, echoed back in the response
    pub case_id: String,
    /// Agent version under test
    pub version: Version,
    /// Input handed to the agent
    pub input: RunCaseInput,
}

/// Agent input nested in a run-case request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCaseInput {
    /// The user message
    pub user: String,
    /// Arbitrary extra context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// How `FinalOutput::content` should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Plain text
    Text,
    /// Structured JSON
    Json,
}

/// The agent's final answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalOutput {
    /// Content interpretation
    pub content_type: ContentType,
    /// The answer itself
    pub content: Value,
}

impl FinalOutput {
    /// Create a text answer
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Text,
            content: Value::String(content.into()),
        }
    }

    /// Create a JSON answer
    #[must_use]
    pub const fn json(content: Value) -> Self {
        Self {
            content_type: ContentType::Json,
            content,
        }
    }
}

/// Outcome of a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// Call succeeded
    Ok,
    /// Call failed
    Error,
    /// Call timed out
    Timeout,
}

/// A trace event emitted while the agent ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// The agent invoked a tool
    ToolCall {
        /// Timestamp (milliseconds since the epoch)
        ts: u64,
        /// Call identifier, referenced by the matching result
        call_id: String,
        /// Proposed action this call belongs to
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action_id: Option<String>,
        /// Tool name
        tool: String,
        /// Tool arguments
        #[serde(default)]
        args: Map<String, Value>,
    },
    /// A tool returned
    ToolResult {
        /// Timestamp (milliseconds since the epoch)
        ts: u64,
        /// Call identifier of the originating `tool_call`
        call_id: String,
        /// Proposed action this result belongs to
        #[serde(default, skip_serializing_if = "Option::is_none")]
        action_id: Option<String>,
        /// Outcome
        status: ToolStatus,
        /// Wall time spent in the tool
        #[serde(default, skip_serializing_if = "Option::is_none")]
        latency_ms: Option<u64>,
        /// Short description of the returned payload
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload_summary: Option<Value>,
    },
    /// Documents were retrieved
    Retrieval {
        /// Timestamp (milliseconds since the epoch)
        ts: u64,
        /// Query text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query: Option<String>,
        /// Retrieved document ids
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc_ids: Option<Vec<String>>,
        /// Hashes of the retrieved snippets
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snippets_hashes: Option<Vec<String>>,
    },
    /// The final answer was produced
    FinalOutput {
        /// Timestamp (milliseconds since the epoch)
        ts: u64,
        /// Content interpretation
        content_type: ContentType,
        /// The answer itself
        content: Value,
    },
}

/// Risk classification of a proposed action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

/// Evidence backing a proposed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceRef {
    /// Output of a tool call
    ToolResult {
        /// Call identifier
        call_id: String,
    },
    /// A retrieved document
    RetrievalDoc {
        /// Document id
        id: String,
    },
}

/// A side effect the agent wants to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Action identifier
    pub action_id: String,
    /// Action category
    pub action_type: String,
    /// Tool that would perform it
    pub tool_name: String,
    /// Tool parameters
    #[serde(default)]
    pub params: Map<String, Value>,
    /// Risk classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    /// Free-form risk tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tags: Option<Vec<String>>,
    /// Supporting evidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_refs: Option<Vec<EvidenceRef>>,
}

/// Token accounting reported by the agent; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt and context tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    /// Generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    /// Total tokens (may differ from the sum when cached)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    /// Distinct tool calls made during the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_count: Option<u64>,
    /// Whether the agent detected a tool-call loop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_detected: Option<bool>,
    /// Loop analysis (argument similarity suspects, duplicate output hashes),
    /// carried through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_details: Option<Value>,
}

/// Body of a successful `/run-case` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Echo of the request's case id
    pub case_id: String,
    /// Echo of the request's version
    pub version: Version,
    /// Identifier of the workflow that produced the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// The final answer
    pub final_output: FinalOutput,
    /// Trace events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<RunEvent>>,
    /// Side effects the agent proposes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_actions: Option<Vec<ProposedAction>>,
    /// Token accounting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

/// What a simple agent returns; the envelope fields are filled in by
/// [`crate::api::wrap_simple_agent`]
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    /// The final answer
    pub final_output: FinalOutput,
    /// Workflow identifier, omitted from the response when `None`
    pub workflow_id: Option<String>,
    /// Trace events, omitted from the response when `None`
    pub events: Option<Vec<RunEvent>>,
    /// Proposed actions, omitted from the response when `None`
    pub proposed_actions: Option<Vec<ProposedAction>>,
}

impl AgentOutput {
    /// Create an output carrying only a final answer
    #[must_use]
    pub const fn new(final_output: FinalOutput) -> Self {
        Self {
            final_output,
            workflow_id: None,
            events: None,
            proposed_actions: None,
        }
    }

    /// Attach a workflow identifier
    #[must_use]
    pub fn with_workflow_id(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    /// Attach trace events
    #[must_use]
    pub fn with_events(mut self, events: Vec<RunEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Attach proposed actions
    #[must_use]
    pub fn with_proposed_actions(mut self, actions: Vec<ProposedAction>) -> Self {
        self.proposed_actions = Some(actions);
        self
    }

    /// Combine with the originating request into a full response
    #[must_use]
    pub fn into_response(self, request: &RunCaseRequest) -> AgentResponse {
        AgentResponse {
            case_id: request.case_id.clone(),
            version: request.version,
            workflow_id: self.workflow_id,
            final_output: self.final_output,
            events: self.events,
            proposed_actions: self.proposed_actions,
            token_usage: None,
        }
    }
}
