//! Local persistence for bridge inspections
//!
//! Everything lives in a flat key-value store: one key holds the whole
//! serialized collection of inspections, others hold the inspector settings
//! and the log of generated reports. Reads fail soft (unreadable data is
//! treated as absent), writes replace the full value under a key.

pub mod error;
pub mod history;
pub mod inspections;
pub mod kv;
pub mod settings;

pub use error::StoreError;
pub use history::{HistoryEntry, HistoryRepository, HISTORY_KEY};
pub use inspections::{InspectionRepository, INSPECTIONS_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use settings::{SettingsRepository, SETTINGS_KEY};
