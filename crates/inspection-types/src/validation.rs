//! Save-time validation of inspection drafts

use crate::draft::InspectionDraft;
use crate::error::ValidationError;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a draft against the save-time rules
///
/// Rules are checked in a fixed order and only the first violation is
/// returned: bridge name, location, inspector name, then at least one item.
pub fn validate(draft: &InspectionDraft) -> Result<(), ValidationError> {
    if is_blank(&draft.bridge_name) {
        return Err(ValidationError::MissingBridgeName);
    }
    if is_blank(&draft.location) {
        return Err(ValidationError::MissingLocation);
    }
    if is_blank(&draft.inspector_name) {
        return Err(ValidationError::MissingInspectorName);
    }
    if draft.items.is_empty() {
        return Err(ValidationError::NoItems);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use proptest::prelude::*;

    fn draft(bridge: &str, location: &str, inspector: &str, items: usize) -> InspectionDraft {
        let mut draft = InspectionDraft::new();
        draft.bridge_name = bridge.to_string();
        draft.location = location.to_string();
        draft.inspector_name = inspector.to_string();
        for i in 0..items {
            draft.add_item(format!("Item {}", i), "", Category::Other);
        }
        draft
    }

    #[test]
    fn test_complete_draft_passes() {
        assert_eq!(validate(&draft("Harbor Bridge", "Pier 4", "Dana", 1)), Ok(()));
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        assert_eq!(
            validate(&draft("  ", "Pier 4", "Dana", 1)),
            Err(ValidationError::MissingBridgeName)
        );
    }

    #[test]
    fn test_rules_checked_in_order() {
        assert_eq!(
            validate(&draft("", "", "", 0)),
            Err(ValidationError::MissingBridgeName)
        );
        assert_eq!(
            validate(&draft("Bridge", "", "", 0)),
            Err(ValidationError::MissingLocation)
        );
        assert_eq!(
            validate(&draft("Bridge", "Pier", "", 0)),
            Err(ValidationError::MissingInspectorName)
        );
        assert_eq!(
            validate(&draft("Bridge", "Pier", "Dana", 0)),
            Err(ValidationError::NoItems)
        );
    }

    fn field() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), Just(" ".to_string()), "[A-Za-z]{1,12}"]
    }

    proptest! {
        /// Property: the reported error is always the first rule that fails
        #[test]
        fn first_violation_wins(
            bridge in field(),
            location in field(),
            inspector in field(),
            items in 0usize..3,
        ) {
            let expected = if bridge.trim().is_empty() {
                Err(ValidationError::MissingBridgeName)
            } else if location.trim().is_empty() {
                Err(ValidationError::MissingLocation)
            } else if inspector.trim().is_empty() {
                Err(ValidationError::MissingInspectorName)
            } else if items == 0 {
                Err(ValidationError::NoItems)
            } else {
                Ok(())
            };
            prop_assert_eq!(validate(&draft(&bridge, &location, &inspector, items)), expected);
        }
    }
}
