//! The saved inspection collection
//!
//! The whole collection is one JSON array under [`INSPECTIONS_KEY`]. There is
//! no indexing and no partial update: every append reads the array, pushes
//! the new record and writes the array back. Concurrent writers are not
//! coordinated; the last write wins.

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use inspection_types::Inspection;
use tracing::{debug, warn};

pub const INSPECTIONS_KEY: &str = "bridgeInspections";

pub struct InspectionRepository<S> {
    store: S,
}

impl<S: KeyValueStore> InspectionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load every saved inspection in storage order
    ///
    /// Missing or unreadable data yields an empty collection.
    pub fn load_all(&self) -> Vec<Inspection> {
        match self.read() {
            Ok(inspections) => inspections,
            Err(e) => {
                warn!(key = INSPECTIONS_KEY, error = %e, "Ignoring unreadable inspection data");
                Vec::new()
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<Inspection> {
        self.load_all().into_iter().find(|i| i.id == id)
    }

    /// Append one inspection to the stored collection
    ///
    /// Fails with [`StoreError::Corrupt`] instead of overwriting a stored
    /// value that cannot be read back.
    pub fn append(&mut self, inspection: &Inspection) -> Result<(), StoreError> {
        let mut inspections = self.read()?;
        inspections.push(inspection.clone());
        let json = serde_json::to_string(&inspections)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.store.set(INSPECTIONS_KEY, &json)?;
        debug!(
            id = %inspection.id,
            total = inspections.len(),
            "Appended inspection"
        );
        Ok(())
    }

    /// Remove the stored collection entirely
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.remove(INSPECTIONS_KEY)
    }

    fn read(&self) -> Result<Vec<Inspection>, StoreError> {
        let Some(raw) = self.store.get(INSPECTIONS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            key: INSPECTIONS_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::NaiveDate;
    use inspection_types::{Category, Comment, InspectionItem, PhotoRef, Priority, Severity};
    use pretty_assertions::assert_eq;

    fn sample(bridge: &str) -> Inspection {
        Inspection {
            id: inspection_types::new_id(),
            bridge_name: bridge.to_string(),
            location: "Pier 4".to_string(),
            inspector_name: "Dana Reyes".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            notes: "Low tide during inspection".to_string(),
            created_at: "2024-05-17T10:00:00Z".parse().unwrap(),
            items: vec![InspectionItem {
                id: inspection_types::new_id(),
                title: "Deck Surface".to_string(),
                description: "Asphalt wearing course".to_string(),
                category: Category::Deck,
                photo_url: Some(PhotoRef::new("blob:photo-1")),
                comments: vec![Comment {
                    id: inspection_types::new_id(),
                    text: "Spalling near expansion joint".to_string(),
                    severity: Severity::Critical,
                    priority: Priority::High,
                }],
            }],
        }
    }

    #[test]
    fn test_load_all_empty_when_nothing_stored() {
        let repo = InspectionRepository::new(MemoryStore::new());
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_append_then_load_roundtrip() {
        let mut repo = InspectionRepository::new(MemoryStore::new());
        let first = sample("Harbor Bridge");
        let second = sample("Main Street Bridge");
        repo.append(&first).unwrap();
        repo.append(&second).unwrap();

        assert_eq!(repo.load_all(), vec![first.clone(), second]);
        assert_eq!(repo.find(&first.id), Some(first));
        assert_eq!(repo.find("missing"), None);
    }

    #[test]
    fn test_malformed_data_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(INSPECTIONS_KEY, r#"{"not":"an array"}"#).unwrap();
        let repo = InspectionRepository::new(store);
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_append_refuses_to_overwrite_corrupt_data() {
        let mut store = MemoryStore::new();
        store.set(INSPECTIONS_KEY, "not json").unwrap();
        let mut repo = InspectionRepository::new(store);
        assert!(matches!(
            repo.append(&sample("Harbor Bridge")),
            Err(StoreError::Corrupt { .. })
        ));
        let store = repo.into_inner();
        assert_eq!(
            store.get(INSPECTIONS_KEY).unwrap(),
            Some("not json".to_string())
        );
    }

    #[test]
    fn test_clear_all_removes_collection() {
        let mut repo = InspectionRepository::new(MemoryStore::new());
        repo.append(&sample("Harbor Bridge")).unwrap();
        repo.clear_all().unwrap();
        assert!(repo.load_all().is_empty());
    }
}
