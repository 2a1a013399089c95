use inspection_store::{HistoryRepository, InspectionRepository, KeyValueStore};
use std::io::Write;

pub fn run<S: KeyValueStore>(store: &mut S, out: &mut dyn Write) -> anyhow::Result<()> {
    let inspections = InspectionRepository::new(&mut *store).load_all();
    let reports = HistoryRepository::new(&mut *store).load_all();

    writeln!(out, "Bridge Inspection Recorder")?;
    writeln!(out, "Stored inspections: {}", inspections.len())?;
    writeln!(out, "Generated reports: {}", reports.len())?;
    if let Some(latest) = inspections.iter().max_by_key(|i| i.created_at) {
        writeln!(
            out,
            "Latest inspection: {} ({})",
            latest.bridge_name,
            latest.date.format("%Y-%m-%d")
        )?;
    }
    Ok(())
}
