use crate::cli::SettingsUpdate;
use anyhow::Context;
use inspection_store::{KeyValueStore, SettingsRepository};
use inspection_types::Settings;
use std::io::Write;

fn or_unset(value: &str) -> &str {
    if value.trim().is_empty() {
        "(not set)"
    } else {
        value
    }
}

fn print(settings: &Settings, out: &mut dyn Write) -> anyhow::Result<()> {
    let profile = &settings.profile;
    writeln!(out, "Name: {}", or_unset(&profile.name))?;
    writeln!(out, "Email: {}", or_unset(&profile.email))?;
    writeln!(out, "Company: {}", or_unset(&profile.company))?;
    writeln!(out, "Signature: {}", or_unset(&profile.signature))?;
    writeln!(
        out,
        "Auto-generate reports: {}",
        if settings.auto_generate_reports { "yes" } else { "no" }
    )?;
    Ok(())
}

pub fn show<S: KeyValueStore>(store: &mut S, out: &mut dyn Write) -> anyhow::Result<()> {
    print(&SettingsRepository::new(&mut *store).load(), out)
}

pub fn set<S: KeyValueStore>(
    store: &mut S,
    update: SettingsUpdate,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut repo = SettingsRepository::new(&mut *store);
    let mut settings = repo.load();
    let profile = &mut settings.profile;

    if let Some(name) = update.name {
        profile.name = name;
    }
    if let Some(email) = update.email {
        profile.email = email;
    }
    if let Some(company) = update.company {
        profile.company = company;
    }
    if let Some(signature) = update.signature {
        profile.signature = signature;
    }
    if let Some(auto_generate) = update.auto_generate {
        settings.auto_generate_reports = auto_generate;
    }

    repo.save(&settings).context("Failed to save settings")?;
    writeln!(out, "Settings saved")?;
    print(&settings, out)
}
