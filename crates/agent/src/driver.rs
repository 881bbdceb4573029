//! Execution driver — runs one agent invocation as a background task.
//!
//! The invocation owns the producing half of the event channel; when it
//! finishes (or is aborted) the channel closes and `recv_event` drains
//! whatever was already emitted, then returns `None`. Events therefore
//! always arrive in emission order and are never lost to timing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use agenthub_core::{Agent, ConversationTurn, EventSink, ExecutionError, ExecutionEvent};

/// Handle over a running invocation.
pub struct ExecutionHandle {
    events: mpsc::UnboundedReceiver<ExecutionEvent>,
    task: JoinHandle<Result<String, ExecutionError>>,
}

/// Start one invocation on the tokio runtime.
pub fn start(
    agent: Arc<dyn Agent>,
    message: String,
    history: Vec<ConversationTurn>,
) -> ExecutionHandle {
    let (sink, events) = EventSink::channel();

    let task = tokio::spawn(async move {
        tracing::debug!(history_turns = history.len(), "Invocation started");
        agent.invoke(&message, &history, &sink).await
    });

    ExecutionHandle { events, task }
}

impl ExecutionHandle {
    /// Receive the next event, or `None` once the invocation finished and
    /// every emitted event has been drained.
    pub async fn recv_event(&mut self) -> Option<ExecutionEvent> {
        self.events.recv().await
    }

    /// Whether the invocation task has finished.
    pub fn is_done(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the invocation. Already-emitted events remain readable.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Await the invocation's final output.
    pub async fn await_result(self) -> Result<String, ExecutionError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ExecutionError::Cancelled),
            Err(e) => Err(ExecutionError::Invocation(format!(
                "invocation task failed: {e}"
            ))),
        }
    }
}
