//! Output file naming

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Whitespace runs and path separators collapse to a single underscore
    static ref SEPARATOR_RUNS: Regex = Regex::new(r"[\s/\\]+").unwrap();
}

/// `{bridge}_inspection_{YYYY-MM-DD}.pdf`, with the bridge name made path-safe
///
/// A blank bridge name becomes `bridge` so the name never starts with `_`.
pub fn report_filename(bridge_name: &str, date: NaiveDate) -> String {
    let trimmed = bridge_name.trim();
    let stem = if trimmed.is_empty() {
        "bridge".to_string()
    } else {
        SEPARATOR_RUNS.replace_all(trimmed, "_").into_owned()
    };
    format!("{}_inspection_{}.pdf", stem, date.format("%Y-%m-%d"))
}
