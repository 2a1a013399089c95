use inspection_store::{HistoryRepository, KeyValueStore};
use std::io::Write;

pub fn run<S: KeyValueStore>(store: &mut S, out: &mut dyn Write) -> anyhow::Result<()> {
    let entries = HistoryRepository::new(&mut *store).load_all();
    if entries.is_empty() {
        writeln!(out, "No reports generated yet")?;
        return Ok(());
    }
    // Newest first
    for entry in entries.iter().rev() {
        writeln!(
            out,
            "{}  {}  {}  {} page(s)",
            entry.generated_at.format("%Y-%m-%d %H:%M UTC"),
            entry.bridge_name,
            entry.file_name,
            entry.page_count
        )?;
    }
    Ok(())
}
