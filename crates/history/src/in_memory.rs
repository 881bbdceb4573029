//! In-memory history store, used by tests and single-process setups.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use agenthub_core::HistoryError;

use crate::{HistoryRecord, HistoryStore};

/// History store holding records in a process-local map.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<String, Vec<HistoryRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to a conversation.
    pub fn push(&self, conversation_id: &str, role: &str, content: &str) {
        let mut records = self.records.lock().expect("history lock poisoned");
        records
            .entry(conversation_id.to_string())
            .or_default()
            .push(HistoryRecord {
                role: role.to_string(),
                content: content.to_string(),
            });
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn fetch(&self, conversation_id: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
        let records = self.records.lock().expect("history lock poisoned");
        Ok(records.get(conversation_id).cloned().unwrap_or_default())
    }
}
