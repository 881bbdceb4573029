//! Error types for the AgentHub domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// The top-level error type for all AgentHub operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Execution errors ---
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    // --- History errors ---
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of one agent invocation or its event stream.
///
/// `AgentNotFound` maps to HTTP 404 on the synchronous path and to an
/// error frame on the streaming path. Everything else is a 500 or a
/// terminal error frame, depending on the transport.
#[derive(Debug, Clone, Error)]
pub enum ExecutionError {
    #[error("Agent '{0}' not found")]
    AgentNotFound(String),

    #[error("Agent invocation failed: {0}")]
    Invocation(String),

    #[error("Malformed execution event: {0}")]
    Translation(String),

    #[error("Execution was cancelled")]
    Cancelled,
}

/// Failures while fetching prior conversation turns.
///
/// Never surfaces to clients — the history loader recovers every variant
/// to an empty history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History store request failed: {0}")]
    Request(String),

    #[error("History store returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed history record: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_not_found_names_the_agent() {
        let err = Error::Execution(ExecutionError::AgentNotFound("event-planner".into()));
        assert!(err.to_string().contains("event-planner"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn history_status_error_displays_correctly() {
        let err = HistoryError::Status {
            status: 503,
            message: "store offline".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("store offline"));
    }
}
