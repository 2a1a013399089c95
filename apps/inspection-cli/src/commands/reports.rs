use inspection_store::{InspectionRepository, KeyValueStore};
use inspection_types::filter_inspections;
use std::io::Write;

pub fn run<S: KeyValueStore>(
    store: &mut S,
    query: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let inspections = InspectionRepository::new(&mut *store).load_all();
    let matches = filter_inspections(&inspections, query);
    if matches.is_empty() {
        writeln!(out, "No inspections found")?;
        return Ok(());
    }

    for inspection in matches {
        let counts = inspection.issue_counts();
        writeln!(
            out,
            "{}  {}  {}",
            inspection.id,
            inspection.date.format("%Y-%m-%d"),
            inspection.bridge_name
        )?;
        writeln!(
            out,
            "    {} - inspected by {}",
            inspection.location, inspection.inspector_name
        )?;
        writeln!(
            out,
            "    items: {}  issues: {} (critical {}, moderate {}, minor {})  photos: {}",
            inspection.items.len(),
            counts.total(),
            counts.critical,
            counts.moderate,
            counts.minor,
            inspection.photo_count()
        )?;
    }
    Ok(())
}
