use super::report::write_report;
use crate::config::Config;
use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use inspection_store::{InspectionRepository, KeyValueStore, SettingsRepository};
use inspection_types::InspectionDraft;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Save the draft at `draft_path` as a new inspection
///
/// A draft that breaks a validation rule surfaces as a bare
/// `ValidationError` so the binary can map it to its own exit code.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    config: &Config,
    draft_path: &Path,
    now: DateTime<Local>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let json = fs::read_to_string(draft_path)
        .with_context(|| format!("Failed to read draft file: {}", draft_path.display()))?;
    let draft = InspectionDraft::from_json(&json)
        .with_context(|| format!("Invalid draft file: {}", draft_path.display()))?;

    let inspection = draft.finalize(now.with_timezone(&Utc))?;
    InspectionRepository::new(&mut *store)
        .append(&inspection)
        .context("Failed to save inspection")?;
    info!(id = %inspection.id, bridge = %inspection.bridge_name, "Saved inspection");
    writeln!(
        out,
        "Saved inspection {} for {} ({} item(s))",
        inspection.id,
        inspection.bridge_name,
        inspection.items.len()
    )?;

    if SettingsRepository::new(&mut *store).load().auto_generate_reports {
        let report = write_report(store, config, &inspection, &config.report.output_dir, now)
            .context("Inspection saved but the report could not be generated")?;
        writeln!(
            out,
            "Wrote {} ({} page(s))",
            report.path.display(),
            report.page_count
        )?;
    }
    Ok(())
}
