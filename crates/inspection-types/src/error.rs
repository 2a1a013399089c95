use thiserror::Error;

/// First violated save-time rule of an inspection draft
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Bridge name is required")]
    MissingBridgeName,

    #[error("Location is required")]
    MissingLocation,

    #[error("Inspector name is required")]
    MissingInspectorName,

    #[error("Please add at least one inspection item")]
    NoItems,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Inspection item not found: {0}")]
    ItemNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Failed to parse draft: {0}")]
    Parse(String),
}
