//! Agent trait — the abstraction over conversational agents.
//!
//! An Agent takes an input message and optional prior turns, optionally
//! emits execution events while it works, and returns a final textual
//! output. What the agent *is* (which model, which prompt, which tools)
//! is entirely its own business — the runtime only depends on this
//! contract.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::ExecutionError;
use crate::event::ExecutionEvent;
use crate::turn::ConversationTurn;

/// Handle an agent uses to publish execution events while it runs.
///
/// `emit` never fails and never suspends the producer: if the consumer
/// has gone away the event is silently dropped, and the invocation's
/// outcome still surfaces through its returned `Result`. An agent that
/// streams nothing simply never calls it.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<ExecutionEvent>,
}

impl EventSink {
    /// Create a sink and the receiver that observes it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExecutionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publish one event, in emission order.
    pub fn emit(&self, event: ExecutionEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Event sink closed; execution event dropped");
        }
    }
}

/// The core Agent trait.
///
/// Every agent implementation (LLM-backed, scripted, remote) implements
/// this; the execution driver calls `invoke` without knowing which.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Human-readable description of what this agent does.
    fn description(&self) -> &str;

    /// Label of the model backing this agent (surfaced by `GET /agents`).
    fn model(&self) -> &str;

    /// Run one invocation: process `message` with `history` as context,
    /// emitting events through `events` as work progresses.
    ///
    /// Events must be emitted before the invocation returns; failure
    /// surfaces only through the returned `Result`, never through the
    /// sink.
    async fn invoke(
        &self,
        message: &str,
        history: &[ConversationTurn],
        events: &EventSink,
    ) -> std::result::Result<String, ExecutionError>;
}
