//! Conversation history retrieval.
//!
//! Chat requests carry a conversation id; before invoking an agent the
//! gateway loads that conversation's prior turns so the agent sees the
//! full dialogue. The store is pluggable behind [`HistoryStore`]: a
//! remote record server in production, an in-memory map in tests.
//!
//! History is context, not state of record — if the store is down or
//! returns garbage, the chat proceeds with an empty history rather than
//! failing the request.

use async_trait::async_trait;
use serde::Deserialize;

use agenthub_core::{ConversationTurn, HistoryError, Role};

pub mod in_memory;
pub mod remote;

pub use in_memory::InMemoryStore;
pub use remote::RemoteStore;

/// One raw record as stored, before role filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    /// Stored role string; anything other than "user" / "assistant" is
    /// dropped during conversion.
    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub content: String,
}

impl HistoryRecord {
    /// Convert to a typed turn. Returns `None` for unknown roles; empty
    /// content is kept as-is.
    pub fn into_turn(self) -> Option<ConversationTurn> {
        let role = match self.role.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => return None,
        };
        Some(ConversationTurn {
            role,
            content: self.content,
        })
    }
}

/// Source of prior conversation turns.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fetch the records of one conversation, oldest first.
    async fn fetch(&self, conversation_id: &str) -> Result<Vec<HistoryRecord>, HistoryError>;
}

/// Loads history through a store, absorbing failures.
///
/// `None` store means history is not configured; every conversation
/// starts empty.
pub struct HistoryLoader {
    store: Option<Box<dyn HistoryStore>>,
}

impl HistoryLoader {
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A loader with no backing store.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    /// Load a conversation's turns in stored order.
    ///
    /// Store failures and malformed records degrade to an empty (or
    /// shorter) history; they never propagate to the caller.
    pub async fn load(&self, conversation_id: &str) -> Vec<ConversationTurn> {
        let Some(store) = &self.store else {
            return Vec::new();
        };

        match store.fetch(conversation_id).await {
            Ok(records) => {
                let turns: Vec<ConversationTurn> =
                    records.into_iter().filter_map(HistoryRecord::into_turn).collect();
                tracing::debug!(
                    conversation_id,
                    turns = turns.len(),
                    "Loaded conversation history"
                );
                turns
            }
            Err(e) => {
                tracing::warn!(
                    conversation_id,
                    error = %e,
                    "History fetch failed; continuing with empty history"
                );
                Vec::new()
            }
        }
    }
}
