//! Scripted agent — replies with a fixed text, streamed in small chunks.
//!
//! Exists so a freshly configured server answers chats without any
//! external backend; config `[[agents]]` entries become instances of
//! this type.

use async_trait::async_trait;

use agenthub_core::{
    Agent, ConversationTurn, EventSink, ExecutionError, ExecutionEvent, PartKind,
};

/// Reply chunk width, in characters.
const CHUNK_CHARS: usize = 16;

/// An agent with a fixed reply.
pub struct ScriptedAgent {
    description: String,
    model: String,
    reply: String,
}

impl ScriptedAgent {
    pub fn new(
        description: impl Into<String>,
        model: impl Into<String>,
        reply: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            model: model.into(),
            reply: reply.into(),
        }
    }

    fn chunks(&self) -> Vec<String> {
        let chars: Vec<char> = self.reply.chars().collect();
        chars
            .chunks(CHUNK_CHARS)
            .map(|c| c.iter().collect())
            .collect()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn description(&self) -> &str {
        &self.description
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        _message: &str,
        _history: &[ConversationTurn],
        events: &EventSink,
    ) -> Result<String, ExecutionError> {
        let mut chunks = self.chunks().into_iter();

        if let Some(first) = chunks.next() {
            events.emit(ExecutionEvent::PartStart {
                kind: PartKind::Text,
                content: first,
                index: 0,
            });
            for chunk in chunks {
                events.emit(ExecutionEvent::PartDelta {
                    kind: PartKind::Text,
                    content_delta: chunk,
                    index: 0,
                });
            }
        }

        Ok(self.reply.clone())
    }
}
