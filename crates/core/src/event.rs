//! Execution events — the live output of a running agent invocation.
//!
//! `ExecutionEvent` is a closed sum type; the translation boundary
//! (the event bridge) matches it exhaustively, so adding a variant is a
//! compile error everywhere it matters.
//!
//! Invariants an event source must uphold (checked by the bridge):
//! - every `PartDelta.index` refers to a previously emitted
//!   `PartStart.index` of the same kind;
//! - every `ToolResult.call_id` refers to a preceding `ToolCall.call_id`;
//! - `PartStart.index` values are monotonically non-decreasing.

use serde::{Deserialize, Serialize};

/// The kind of a streamed message part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// Model reasoning — shown to the client but excluded from the
    /// accumulated response text.
    Thinking,
    /// Response text.
    Text,
}

impl PartKind {
    /// Wire-protocol label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thinking => "thinking",
            Self::Text => "text",
        }
    }
}

/// One event produced by a running agent invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_kind", rename_all = "snake_case")]
pub enum ExecutionEvent {
    /// A new message part opened (with its initial content, possibly empty).
    PartStart {
        kind: PartKind,
        content: String,
        index: usize,
    },

    /// Incremental content for an already-opened part.
    PartDelta {
        kind: PartKind,
        content_delta: String,
        index: usize,
    },

    /// The agent is invoking a tool.
    ToolCall {
        call_id: String,
        tool_name: String,
        args: serde_json::Value,
    },

    /// A tool invocation completed.
    ToolResult {
        call_id: String,
        tool_name: String,
        content: String,
    },
}

impl ExecutionEvent {
    /// Short name for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PartStart { .. } => "part_start",
            Self::PartDelta { .. } => "part_delta",
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
        }
    }
}
