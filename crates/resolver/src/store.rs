//! Session Store
//!
//! Per-session record cache plus the bounded recent-lookup history. Owned
//! by the session that created it and dropped with it; nothing here
//! survives the session.

use chrono::Utc;
use dtc_model::DiagnosticRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::debug;

/// Most recent lookups kept per session
pub const HISTORY_CAPACITY: usize = 5;

/// A single entry in the recent-lookup history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub code: String,
    pub title: String,
    pub timestamp_millis: i64,
}

/// Cache of resolved records and the recent-lookup list for one session.
///
/// Seeded with the built-in catalog at creation, grown only by successful
/// external resolutions, never evicted for the session lifetime.
pub struct SessionStore {
    records: Mutex<HashMap<String, DiagnosticRecord>>,
    history: Mutex<VecDeque<HistoryEntry>>,
}

impl SessionStore {
    /// Create a store seeded with the built-in catalog
    pub fn seeded() -> Self {
        Self::with_records(code_catalog::seed_records())
    }

    /// Create a store with explicit seed records (primarily for tests)
    pub fn with_records(records: impl IntoIterator<Item = DiagnosticRecord>) -> Self {
        Self {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|r| (r.code.clone(), r))
                    .collect(),
            ),
            history: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }

    /// Look up a record by normalized code
    pub fn get(&self, code: &str) -> Option<DiagnosticRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.get(code).cloned()
    }

    pub fn contains(&self, code: &str) -> bool {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.contains_key(code)
    }

    /// Persist a resolved record under its code
    pub fn insert(&self, record: DiagnosticRecord) {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        debug!(code = %record.code, "caching resolved record");
        records.insert(record.code.clone(), record);
    }

    /// Prepend a history entry, deduplicating by code and truncating to
    /// the capacity bound.
    pub fn record_lookup(&self, code: &str, title: &str) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.retain(|entry| entry.code != code);
        history.push_front(HistoryEntry {
            code: code.to_string(),
            title: title.to_string(),
            timestamp_millis: Utc::now().timestamp_millis(),
        });
        history.truncate(HISTORY_CAPACITY);
    }

    /// Recent lookups, most recent first
    pub fn history(&self) -> Vec<HistoryEntry> {
        let history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.iter().cloned().collect()
    }

    pub fn record_count(&self) -> usize {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.len()
    }

    pub fn history_len(&self) -> usize {
        let history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let store = SessionStore::with_records([]);
        let record = DiagnosticRecord::unknown("P0420");
        store.insert(DiagnosticRecord {
            category: "Emissions".to_string(),
            ..record
        });

        assert!(store.contains("P0420"));
        assert_eq!(store.get("P0420").unwrap().category, "Emissions");
        assert_eq!(store.record_count(), 1);
    }

    #[test]
    fn history_deduplicates_and_promotes() {
        let store = SessionStore::with_records([]);
        store.record_lookup("P0300", "Misfire");
        store.record_lookup("P0420", "Catalyst");
        store.record_lookup("P0300", "Misfire");

        let codes: Vec<_> = store.history().into_iter().map(|e| e.code).collect();
        assert_eq!(codes, ["P0300", "P0420"]);
    }

    #[test]
    fn history_is_bounded() {
        let store = SessionStore::with_records([]);
        for i in 0..7 {
            store.record_lookup(&format!("P010{i}"), "test");
        }

        let codes: Vec<_> = store.history().into_iter().map(|e| e.code).collect();
        assert_eq!(codes, ["P0106", "P0105", "P0104", "P0103", "P0102"]);
    }

    #[test]
    fn seeded_store_contains_the_catalog() {
        let store = SessionStore::seeded();
        assert_eq!(store.record_count(), code_catalog::seed_records().len());
        assert!(store.contains("P0420"));
        assert_eq!(store.history_len(), 0);
    }
}
