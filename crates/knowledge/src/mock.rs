//! Mock Collaborators
//!
//! In-memory stand-ins for the generative API, usable from any crate's
//! tests without network access.

use crate::chat::{ChatMessage, ChatModel};
use crate::client::{KnowledgeSource, LookupRequest};
use crate::error::KnowledgeError;
use async_trait::async_trait;
use dtc_model::DiagnosticRecord;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned knowledge source keyed by code.
///
/// Lookups for codes without a canned record fail with a transport error;
/// an optional artificial delay exercises timeout handling.
pub struct MockKnowledgeSource {
    records: HashMap<String, DiagnosticRecord>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockKnowledgeSource {
    /// A source that fails every lookup
    pub fn empty() -> Self {
        Self::with_records([])
    }

    pub fn with_records(records: impl IntoIterator<Item = DiagnosticRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.code.clone(), r))
                .collect(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every lookup, for exercising caller-side timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of lookups attempted against this source
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeSource for MockKnowledgeSource {
    async fn lookup(&self, request: &LookupRequest) -> Result<DiagnosticRecord, KnowledgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.records
            .get(&request.code)
            .cloned()
            .ok_or_else(|| KnowledgeError::Transport("mock: no canned record".to_string()))
    }
}

/// Chat model returning a fixed reply, or failing when none is set
pub struct MockChatModel {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl MockChatModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, KnowledgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| KnowledgeError::Transport("mock: chat offline".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_record_round_trips() {
        let record = DiagnosticRecord::unknown("P9998");
        let source = MockKnowledgeSource::with_records([DiagnosticRecord {
            category: "Powertrain".to_string(),
            ..record
        }]);

        let request = LookupRequest {
            code: "P9998".to_string(),
            vehicle_context: None,
        };
        let found = source.lookup(&request).await.unwrap();
        assert_eq!(found.code, "P9998");
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_record_fails_lookup() {
        let source = MockKnowledgeSource::empty();
        let request = LookupRequest {
            code: "P0001".to_string(),
            vehicle_context: None,
        };
        assert!(source.lookup(&request).await.is_err());
    }

    #[tokio::test]
    async fn failing_chat_model_errors() {
        let model = MockChatModel::failing();
        assert!(model.complete(&[]).await.is_err());
        assert_eq!(model.call_count(), 1);
    }
}
