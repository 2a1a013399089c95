//! Log of generated reports

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const HISTORY_KEY: &str = "reportHistory";

/// One generated PDF report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub inspection_id: String,
    pub bridge_name: String,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub page_count: usize,
}

pub struct HistoryRepository<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All entries, oldest first; empty when missing or unreadable
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = HISTORY_KEY, error = %e, "Failed to read report history");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = HISTORY_KEY, error = %e, "Ignoring unreadable report history");
            Vec::new()
        })
    }

    pub fn record(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        let mut entries = self.load_all();
        entries.push(entry);
        let json = serde_json::to_string(&entries)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.store.set(HISTORY_KEY, &json)
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.remove(HISTORY_KEY)
    }
}
