//! Inspection entity model
//!
//! The persisted shape is camelCase JSON with lowercase enum values
//! (`bridgeName`, `"critical"`), one flat object per inspection with items and
//! comments nested in order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural section of the bridge an item belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Superstructure,
    Substructure,
    Deck,
    Joints,
    Bearings,
    Drainage,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Superstructure => "superstructure",
            Category::Substructure => "substructure",
            Category::Deck => "deck",
            Category::Joints => "joints",
            Category::Bearings => "bearings",
            Category::Drainage => "drainage",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition rating of a finding
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Minor,
    Moderate,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }

    /// Display label: the enum value with its first letter capitalized
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Critical => "Critical",
        }
    }

    /// Badge text color as 8-bit RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Severity::Minor => (22, 101, 52),
            Severity::Moderate => (133, 77, 14),
            Severity::Critical => (153, 27, 27),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a finding
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the single photo attached to an item
///
/// Either an inline `data:` URL carrying a base64 payload, or an opaque
/// reference (e.g. a `blob:` object URL) that is only meaningful inside the
/// session that captured it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

/// Classified view of a [`PhotoRef`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource<'a> {
    Inline { mime: &'a str, payload: &'a str },
    Session(&'a str),
}

impl PhotoRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Build an inline `data:` reference from a base64 payload
    pub fn inline(mime: &str, base64_payload: &str) -> Self {
        Self(format!("data:{};base64,{}", mime, base64_payload))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn source(&self) -> PhotoSource<'_> {
        let Some(rest) = self.0.strip_prefix("data:") else {
            return PhotoSource::Session(&self.0);
        };
        match rest.split_once(',') {
            Some((header, payload)) => match header.strip_suffix(";base64") {
                Some(mime) => PhotoSource::Inline {
                    mime: mime.trim(),
                    payload,
                },
                None => PhotoSource::Session(&self.0),
            },
            None => PhotoSource::Session(&self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub severity: Severity,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub photo_url: Option<PhotoRef>,
    pub comments: Vec<Comment>,
}

/// One completed bridge inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub bridge_name: String,
    pub location: String,
    pub inspector_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<InspectionItem>,
}

/// Tally of comments by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub minor: usize,
    pub moderate: usize,
    pub critical: usize,
}

impl IssueCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Minor => self.minor += 1,
            Severity::Moderate => self.moderate += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.minor + self.moderate + self.critical
    }
}

impl Inspection {
    /// Count every comment of every item by severity
    pub fn issue_counts(&self) -> IssueCounts {
        let mut counts = IssueCounts::default();
        for comment in self.comments() {
            counts.record(comment.severity);
        }
        counts
    }

    /// Number of items carrying a photo
    pub fn photo_count(&self) -> usize {
        self.items.iter().filter(|i| i.photo_url.is_some()).count()
    }

    /// All comments in item order, then comment order
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.items.iter().flat_map(|item| item.comments.iter())
    }

    /// (item, comment) pairs in item order, then comment order
    pub fn findings(&self) -> impl Iterator<Item = (&InspectionItem, &Comment)> {
        self.items
            .iter()
            .flat_map(|item| item.comments.iter().map(move |c| (item, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn comment(severity: Severity) -> Comment {
        Comment {
            id: crate::new_id(),
            text: "Spalling".to_string(),
            severity,
            priority: Priority::Medium,
        }
    }

    fn item(title: &str, comments: Vec<Comment>) -> InspectionItem {
        InspectionItem {
            id: crate::new_id(),
            title: title.to_string(),
            description: String::new(),
            category: Category::Deck,
            photo_url: None,
            comments,
        }
    }

    fn inspection(items: Vec<InspectionItem>) -> Inspection {
        Inspection {
            id: "insp-1".to_string(),
            bridge_name: "Harbor Bridge".to_string(),
            location: "Pier 4".to_string(),
            inspector_name: "Dana Reyes".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            notes: String::new(),
            created_at: "2024-05-17T10:00:00Z".parse().unwrap(),
            items,
        }
    }

    #[test]
    fn test_issue_counts_tally_by_severity() {
        let insp = inspection(vec![
            item("Deck", vec![comment(Severity::Minor), comment(Severity::Minor)]),
            item("Joints", vec![comment(Severity::Critical)]),
        ]);
        let counts = insp.issue_counts();
        assert_eq!(
            counts,
            IssueCounts {
                minor: 2,
                moderate: 0,
                critical: 1
            }
        );
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_findings_flatten_items_by_comments() {
        let insp = inspection(vec![
            item("Deck", vec![comment(Severity::Minor), comment(Severity::Moderate)]),
            item("Bearings", vec![]),
            item("Joints", vec![comment(Severity::Critical)]),
        ]);
        let titles: Vec<&str> = insp.findings().map(|(i, _)| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Deck", "Deck", "Joints"]);
    }

    #[test]
    fn test_labels_capitalize_first_letter() {
        assert_eq!(Severity::Critical.label(), "Critical");
        assert_eq!(Priority::Medium.label(), "Medium");
        for s in [Severity::Minor, Severity::Moderate, Severity::Critical] {
            let mut chars = s.as_str().chars();
            let first = chars.next().unwrap().to_ascii_uppercase();
            assert_eq!(s.label(), format!("{}{}", first, chars.as_str()));
        }
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let mut insp = inspection(vec![item("Deck", vec![comment(Severity::Critical)])]);
        insp.items[0].photo_url = Some(PhotoRef::new("blob:abc"));
        let value = serde_json::to_value(&insp).unwrap();
        assert_eq!(value["bridgeName"], "Harbor Bridge");
        assert_eq!(value["inspectorName"], "Dana Reyes");
        assert_eq!(value["date"], "2024-05-17");
        assert_eq!(value["items"][0]["category"], "deck");
        assert_eq!(value["items"][0]["photoUrl"], "blob:abc");
        assert_eq!(value["items"][0]["comments"][0]["severity"], "critical");
    }

    #[test]
    fn test_missing_photo_serializes_as_null() {
        let insp = inspection(vec![item("Deck", vec![])]);
        let value = serde_json::to_value(&insp).unwrap();
        assert!(value["items"][0]["photoUrl"].is_null());
    }

    #[test]
    fn test_photo_source_classification() {
        let inline = PhotoRef::inline("image/png", "iVBORw0KGgo=");
        assert_eq!(
            inline.source(),
            PhotoSource::Inline {
                mime: "image/png",
                payload: "iVBORw0KGgo="
            }
        );
        let blob = PhotoRef::new("blob:http://localhost/1234");
        assert!(matches!(blob.source(), PhotoSource::Session(_)));
        let not_base64 = PhotoRef::new("data:text/plain,hello");
        assert!(matches!(not_base64.source(), PhotoSource::Session(_)));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"{"id":"1","title":"t","description":"","category":"roof",
            "photoUrl":null,"comments":[]}"#;
        assert!(serde_json::from_str::<InspectionItem>(json).is_err());
    }
}
