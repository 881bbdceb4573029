//! Stream frames — the externally visible units of the real-time protocol.
//!
//! A streaming chat session is a sequence of frames: a `ping` confirming
//! the channel opened, zero or more `event` frames, and exactly one
//! terminal frame (`done` or `error`). `final_result` precedes `done` and
//! tells the client no more incremental content will follow.
//!
//! `to_wire` produces the exact JSON shape each frame takes on the wire,
//! with the session's conversation id and agent name echoed into every
//! non-error frame.

use serde_json::{Value, json};

use crate::event::ExecutionEvent;

/// One discrete unit of the outward real-time protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// Channel-open confirmation, always the first frame of a healthy
    /// session.
    Ping,

    /// One forwarded execution event.
    Event(ExecutionEvent),

    /// No more incremental content will follow; interpret what you have.
    FinalResult,

    /// Terminal success frame carrying the full response text.
    Done { response: String },

    /// Terminal failure frame. May follow partial events; partial output
    /// is not retracted.
    Error { message: String },
}

impl StreamFrame {
    /// Whether this frame ends the session. No frame may follow a
    /// terminal frame.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }

    /// Translate this frame into its wire JSON object.
    pub fn to_wire(&self, conversation_id: &str, agent: &str) -> Value {
        match self {
            Self::Ping => json!({
                "type": "ping",
                "conversation_id": conversation_id,
                "agent": agent,
            }),
            Self::Event(event) => event_to_wire(event, conversation_id, agent),
            Self::FinalResult => json!({
                "event_kind": "final_result",
                "conversation_id": conversation_id,
                "agent": agent,
            }),
            Self::Done { response } => json!({
                "type": "done",
                "done": true,
                "response": response,
                "conversation_id": conversation_id,
                "agent": agent,
            }),
            Self::Error { message } => json!({
                "type": "error",
                "error": message,
            }),
        }
    }
}

fn event_to_wire(event: &ExecutionEvent, conversation_id: &str, agent: &str) -> Value {
    match event {
        ExecutionEvent::PartStart {
            kind,
            content,
            index,
        } => json!({
            "event_kind": "part_start",
            "part": {
                "part_kind": kind.as_str(),
                "content": content,
            },
            "index": index,
            "conversation_id": conversation_id,
            "agent": agent,
        }),
        ExecutionEvent::PartDelta {
            kind,
            content_delta,
            index,
        } => json!({
            "event_kind": "part_delta",
            "delta": {
                "part_delta_kind": kind.as_str(),
                "content_delta": content_delta,
            },
            "index": index,
            "conversation_id": conversation_id,
            "agent": agent,
        }),
        ExecutionEvent::ToolCall {
            call_id,
            tool_name,
            args,
        } => json!({
            "event_kind": "function_tool_call",
            "part": {
                "tool_call_id": call_id,
                "tool_name": tool_name,
                "args": args,
            },
            "conversation_id": conversation_id,
            "agent": agent,
        }),
        ExecutionEvent::ToolResult {
            call_id,
            tool_name,
            content,
        } => json!({
            "event_kind": "function_tool_result",
            "result": {
                "part_kind": "tool-return",
                "tool_call_id": call_id,
                "tool_name": tool_name,
                "content": content,
            },
            "conversation_id": conversation_id,
            "agent": agent,
        }),
    }
}
