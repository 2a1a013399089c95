//! Bridge inspection records
//!
//! Entity model, draft editing, validation and listing filters shared by the
//! store, the report renderer and the CLI.

pub mod draft;
pub mod error;
pub mod filter;
pub mod model;
pub mod settings;
pub mod validation;

pub use draft::{CommentDraft, InspectionDraft, ItemDraft};
pub use error::{DraftError, ValidationError};
pub use filter::filter_inspections;
pub use model::{
    Category, Comment, Inspection, InspectionItem, IssueCounts, PhotoRef, PhotoSource, Priority,
    Severity,
};
pub use settings::{InspectorProfile, Settings};
pub use validation::validate;

/// Generate a fresh opaque identifier for an inspection, item or comment
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
