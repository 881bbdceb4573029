//! Per-session bookkeeping for one streaming chat call.
//!
//! A session validates event ordering as events flow through and folds
//! text content into the full-response accumulator. Validation failures
//! are fatal to the session; the bridge turns them into a terminal error
//! frame.

use std::collections::{HashMap, HashSet};

use agenthub_core::{ExecutionError, ExecutionEvent, PartKind};

/// State for one streaming session.
pub struct StreamSession {
    conversation_id: String,
    agent_name: String,
    full_text: String,
    forwarded: usize,
    parts: HashMap<usize, PartKind>,
    last_start_index: Option<usize>,
    call_ids: HashSet<String>,
}

impl StreamSession {
    pub fn new(conversation_id: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            agent_name: agent_name.into(),
            full_text: String::new(),
            forwarded: 0,
            parts: HashMap::new(),
            last_start_index: None,
            call_ids: HashSet::new(),
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Events accepted so far.
    pub fn forwarded(&self) -> usize {
        self.forwarded
    }

    /// Validate one event and fold it into the session.
    ///
    /// Ordering rules: part indices never go backwards; a delta must
    /// follow a start of the same kind at the same index; a tool result
    /// must follow its tool call. Text parts accumulate into the full
    /// response; thinking parts and tool traffic do not.
    pub fn observe(&mut self, event: &ExecutionEvent) -> Result<(), ExecutionError> {
        match event {
            ExecutionEvent::PartStart {
                kind,
                content,
                index,
            } => {
                if let Some(last) = self.last_start_index
                    && *index < last
                {
                    return Err(ExecutionError::Translation(format!(
                        "part index went backwards: {index} after {last}"
                    )));
                }
                self.last_start_index = Some(*index);
                self.parts.insert(*index, *kind);
                if *kind == PartKind::Text {
                    self.full_text.push_str(content);
                }
            }
            ExecutionEvent::PartDelta {
                kind,
                content_delta,
                index,
            } => match self.parts.get(index) {
                None => {
                    return Err(ExecutionError::Translation(format!(
                        "delta for unstarted part index {index}"
                    )));
                }
                Some(started) if started != kind => {
                    return Err(ExecutionError::Translation(format!(
                        "delta kind {} does not match part {} at index {index}",
                        kind.as_str(),
                        started.as_str()
                    )));
                }
                Some(_) => {
                    if *kind == PartKind::Text {
                        self.full_text.push_str(content_delta);
                    }
                }
            },
            ExecutionEvent::ToolCall { call_id, .. } => {
                self.call_ids.insert(call_id.clone());
            }
            ExecutionEvent::ToolResult { call_id, .. } => {
                if !self.call_ids.contains(call_id) {
                    return Err(ExecutionError::Translation(format!(
                        "result for unknown tool call '{call_id}'"
                    )));
                }
            }
        }

        self.forwarded += 1;
        Ok(())
    }

    /// The final response text: accumulated text parts, or `fallback`
    /// when the invocation streamed no text at all.
    pub fn response_text(&self, fallback: &str) -> String {
        if self.full_text.is_empty() {
            fallback.to_string()
        } else {
            self.full_text.clone()
        }
    }
}
