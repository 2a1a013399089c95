use anyhow::{bail, Context};
use inspection_store::{InspectionRepository, KeyValueStore};
use std::io::Write;
use tracing::info;

pub fn run<S: KeyValueStore>(
    store: &mut S,
    confirmed: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if !confirmed {
        bail!("Refusing to delete stored inspections without --yes");
    }
    let mut repo = InspectionRepository::new(&mut *store);
    let count = repo.load_all().len();
    repo.clear_all().context("Failed to clear stored inspections")?;
    info!(count, "Cleared stored inspections");
    writeln!(out, "Deleted {} inspection(s)", count)?;
    Ok(())
}
