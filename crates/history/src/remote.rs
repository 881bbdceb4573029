//! Remote record-server store.
//!
//! Talks to a PocketBase-style records API:
//! `GET {base}/api/collections/{collection}/records` with a filter on
//! the conversation id and ascending creation order. Only `role` and
//! `content` are read from each record.

use async_trait::async_trait;
use serde::Deserialize;

use agenthub_core::HistoryError;

use crate::{HistoryRecord, HistoryStore};

const DEFAULT_PAGE_SIZE: usize = 500;

/// History store backed by a remote records API.
pub struct RemoteStore {
    base_url: String,
    collection: String,
    page_size: usize,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            page_size: DEFAULT_PAGE_SIZE,
            client,
        }
    }

    /// Cap the number of records fetched per conversation.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    fn records_url(&self) -> String {
        format!(
            "{}/api/collections/{}/records",
            self.base_url, self.collection
        )
    }
}

#[async_trait]
impl HistoryStore for RemoteStore {
    async fn fetch(&self, conversation_id: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
        let filter = format!("(conversationId='{conversation_id}')");

        tracing::debug!(conversation_id, url = %self.records_url(), "Fetching history records");

        let response = self
            .client
            .get(self.records_url())
            .query(&[
                ("page", "1".to_string()),
                ("perPage", self.page_size.to_string()),
                ("filter", filter),
                ("sort", "created".to_string()),
            ])
            .send()
            .await
            .map_err(|e| HistoryError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(HistoryError::Status { status, message });
        }

        let page: RecordPage = response
            .json()
            .await
            .map_err(|e| HistoryError::Malformed(e.to_string()))?;

        Ok(page.items)
    }
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    items: Vec<HistoryRecord>,
}
