//! One module per subcommand
//!
//! Commands take the store as `&mut S` and reborrow it for each repository
//! they need, so a single store serves inspections, settings and history.

pub mod clear;
pub mod history;
pub mod home;
pub mod new;
pub mod report;
pub mod reports;
pub mod settings;
