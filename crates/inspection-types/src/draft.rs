//! In-memory editing of an inspection before it is saved
//!
//! A draft is the only mutable form of an inspection. Items and comments are
//! added, edited and removed here; [`InspectionDraft::finalize`] validates the
//! draft and freezes it into an [`Inspection`] ready to be appended to the
//! store.

use crate::error::{DraftError, ValidationError};
use crate::model::{Category, Comment, Inspection, InspectionItem, PhotoRef, Priority, Severity};
use crate::validation::validate;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    #[serde(default = "crate::new_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[serde(default = "crate::new_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    photo_url: Option<PhotoRef>,
    #[serde(default)]
    pub comments: Vec<CommentDraft>,
}

impl ItemDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: crate::new_id(),
            title: title.into(),
            description: description.into(),
            category,
            photo_url: None,
            comments: Vec::new(),
        }
    }

    /// Add a finding; blank text is rejected
    pub fn add_comment(
        &mut self,
        text: &str,
        severity: Severity,
        priority: Priority,
    ) -> Result<String, DraftError> {
        if text.trim().is_empty() {
            return Err(DraftError::EmptyComment);
        }
        let comment = CommentDraft {
            id: crate::new_id(),
            text: text.to_string(),
            severity,
            priority,
        };
        let id = comment.id.clone();
        self.comments.push(comment);
        Ok(id)
    }

    pub fn update_comment(
        &mut self,
        comment_id: &str,
        text: &str,
        severity: Severity,
        priority: Priority,
    ) -> Result<(), DraftError> {
        if text.trim().is_empty() {
            return Err(DraftError::EmptyComment);
        }
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| DraftError::CommentNotFound(comment_id.to_string()))?;
        comment.text = text.to_string();
        comment.severity = severity;
        comment.priority = priority;
        Ok(())
    }

    pub fn remove_comment(&mut self, comment_id: &str) -> Result<(), DraftError> {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != comment_id);
        if self.comments.len() == before {
            return Err(DraftError::CommentNotFound(comment_id.to_string()));
        }
        Ok(())
    }

    /// Attach the item's photo, replacing any previous one
    ///
    /// Items hold at most one photo; the replaced reference is returned.
    pub fn attach_photo(&mut self, photo: PhotoRef) -> Option<PhotoRef> {
        self.photo_url.replace(photo)
    }

    pub fn clear_photo(&mut self) -> Option<PhotoRef> {
        self.photo_url.take()
    }

    pub fn photo(&self) -> Option<&PhotoRef> {
        self.photo_url.as_ref()
    }

    fn into_item(self) -> InspectionItem {
        InspectionItem {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            photo_url: self.photo_url,
            comments: self
                .comments
                .into_iter()
                .map(|c| Comment {
                    id: c.id,
                    text: c.text,
                    severity: c.severity,
                    priority: c.priority,
                })
                .collect(),
        }
    }
}

/// An inspection being filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionDraft {
    #[serde(default)]
    pub bridge_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub inspector_name: String,
    #[serde(default = "today")]
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

impl Default for InspectionDraft {
    fn default() -> Self {
        Self {
            bridge_name: String::new(),
            location: String::new(),
            inspector_name: String::new(),
            date: today(),
            notes: String::new(),
            items: Vec::new(),
        }
    }
}

impl InspectionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a draft from JSON, rejecting blank comments
    pub fn from_json(json: &str) -> Result<Self, DraftError> {
        let draft: Self =
            serde_json::from_str(json).map_err(|e| DraftError::Parse(e.to_string()))?;
        let has_blank = draft
            .items
            .iter()
            .flat_map(|i| i.comments.iter())
            .any(|c| c.text.trim().is_empty());
        if has_blank {
            return Err(DraftError::EmptyComment);
        }
        Ok(draft)
    }

    /// Append a new item and return its id
    pub fn add_item(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> String {
        let item = ItemDraft::new(title, description, category);
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    pub fn item_mut(&mut self, item_id: &str) -> Result<&mut ItemDraft, DraftError> {
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DraftError::ItemNotFound(item_id.to_string()))
    }

    pub fn remove_item(&mut self, item_id: &str) -> Result<(), DraftError> {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        if self.items.len() == before {
            return Err(DraftError::ItemNotFound(item_id.to_string()));
        }
        Ok(())
    }

    /// Validate and freeze the draft into a saveable inspection
    pub fn finalize(self, now: DateTime<Utc>) -> Result<Inspection, ValidationError> {
        validate(&self)?;
        Ok(Inspection {
            id: crate::new_id(),
            bridge_name: self.bridge_name,
            location: self.location,
            inspector_name: self.inspector_name,
            date: self.date,
            notes: self.notes,
            created_at: now,
            items: self.items.into_iter().map(ItemDraft::into_item).collect(),
        })
    }
}
