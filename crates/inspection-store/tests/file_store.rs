//! Inspection collection persisted through the file-backed store

use chrono::{NaiveDate, TimeZone, Utc};
use inspection_store::{FileStore, InspectionRepository, KeyValueStore, INSPECTIONS_KEY};
use inspection_types::{Category, InspectionDraft, PhotoRef, Priority, Severity};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn draft(bridge: &str, notes: &str, comment: &str) -> InspectionDraft {
    let mut draft = InspectionDraft::new();
    draft.bridge_name = bridge.to_string();
    draft.location = "Route 9 over Mill Creek".to_string();
    draft.inspector_name = "Dana Reyes".to_string();
    draft.date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
    draft.notes = notes.to_string();
    let item_id = draft.add_item("Deck Surface", "Wearing course", Category::Deck);
    let item = draft.item_mut(&item_id).unwrap();
    item.add_comment(comment, Severity::Moderate, Priority::High)
        .unwrap();
    item.attach_photo(PhotoRef::inline("image/png", "iVBORw0KGgo="));
    draft
}

#[test]
fn appended_inspections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 5, 17, 10, 0, 0).unwrap();
    let inspection = draft("Harbor Bridge", "", "Spalling").finalize(now).unwrap();

    let mut repo = InspectionRepository::new(FileStore::open(dir.path()).unwrap());
    repo.append(&inspection).unwrap();

    let reopened = InspectionRepository::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.load_all(), vec![inspection]);
}

#[test]
fn non_array_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set(INSPECTIONS_KEY, "42").unwrap();
    let repo = InspectionRepository::new(store);
    assert!(repo.load_all().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: free text round-trips unchanged through the stored blob
    #[test]
    fn free_text_round_trips(
        bridge in "[A-Za-z][A-Za-z ]{0,30}",
        notes in "\\PC{0,80}",
        comment in "[A-Za-z0-9][\\PC]{0,60}",
    ) {
        let dir = tempfile::tempdir().unwrap();
        let inspection = draft(&bridge, &notes, &comment).finalize(Utc::now()).unwrap();
        let mut repo = InspectionRepository::new(FileStore::open(dir.path()).unwrap());
        repo.append(&inspection).unwrap();
        prop_assert_eq!(repo.load_all(), vec![inspection]);
    }
}
