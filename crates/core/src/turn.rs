//! Conversation turn value objects.
//!
//! A `ConversationTurn` is one prior exchange replayed to an agent as
//! context: who spoke and what they said. Turns are produced by the
//! history loader, consumed once, and never mutated.

use serde::{Deserialize, Serialize};

/// The speaker of a conversation turn.
///
/// Only user and assistant turns exist in replayed history; records with
/// any other role are dropped by the history loader before they become
/// turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

/// A single prior turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who spoke
    pub role: Role,

    /// The text content
    pub content: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
