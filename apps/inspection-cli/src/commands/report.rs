use crate::config::Config;
use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use inspection_store::{
    HistoryEntry, HistoryRepository, InspectionRepository, KeyValueStore, SettingsRepository,
};
use inspection_types::Inspection;
use report_pdf::{generate_report, report_filename};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub path: PathBuf,
    pub page_count: usize,
}

pub fn run<S: KeyValueStore>(
    store: &mut S,
    config: &Config,
    id: &str,
    dir: &Path,
    now: DateTime<Local>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let inspection = InspectionRepository::new(&mut *store)
        .find(id)
        .with_context(|| format!("No inspection with id {}", id))?;
    let report = write_report(store, config, &inspection, dir, now)?;
    writeln!(
        out,
        "Wrote {} ({} page(s))",
        report.path.display(),
        report.page_count
    )?;
    Ok(())
}

/// Render `inspection`, save it under `dir` and record it in the history
///
/// The PDF is fully rendered in memory and written through a temporary file,
/// so a failed render leaves nothing behind in `dir`.
pub fn write_report<S: KeyValueStore>(
    store: &mut S,
    config: &Config,
    inspection: &Inspection,
    dir: &Path,
    now: DateTime<Local>,
) -> anyhow::Result<GeneratedReport> {
    let settings = SettingsRepository::new(&mut *store).load();
    let profile = Some(settings.profile).filter(|p| !p.is_empty());
    let options = config.report.options(profile);

    let rendered = generate_report(inspection, &options)
        .with_context(|| format!("Failed to render report for {}", inspection.bridge_name))?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    // UTC generation date, independent of the host time zone
    let generated_at = now.with_timezone(&Utc);
    let file_name = report_filename(&inspection.bridge_name, generated_at.date_naive());
    let path = dir.join(&file_name);
    let tmp = dir.join(format!(".{}.tmp", file_name));
    fs::write(&tmp, &rendered.bytes)
        .with_context(|| format!("Failed to write report: {}", tmp.display()))?;
    fs::rename(&tmp, &path)
        .with_context(|| format!("Failed to move report into place: {}", path.display()))?;

    HistoryRepository::new(&mut *store)
        .record(HistoryEntry {
            inspection_id: inspection.id.clone(),
            bridge_name: inspection.bridge_name.clone(),
            file_name,
            generated_at,
            page_count: rendered.page_count,
        })
        .context("Report written but the history could not be updated")?;

    info!(
        id = %inspection.id,
        path = %path.display(),
        pages = rendered.page_count,
        "Generated inspection report"
    );
    Ok(GeneratedReport {
        path,
        page_count: rendered.page_count,
    })
}
