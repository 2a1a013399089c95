//! Command-line surface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inspection")]
#[command(version, about = "Record bridge inspections and generate PDF reports")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides `storage.data_dir` from the config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show how many inspections and reports are stored
    Home,

    /// Validate a draft JSON file and save it as a new inspection
    New {
        /// Draft file with bridgeName, location, inspectorName, date, notes, items
        #[arg(long)]
        draft: PathBuf,
    },

    /// List stored inspections
    Reports {
        /// Only show inspections whose bridge, location or inspector matches
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Render the PDF report for one inspection
    Report {
        /// Inspection id as shown by `reports`
        id: String,

        /// Output directory (defaults to `report.output_dir`)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List generated reports
    History,

    /// Show or change the inspector profile
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Delete every stored inspection
    Clear {
        /// Confirm the deletion; it cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SettingsAction {
    Show,
    Set(SettingsUpdate),
}

/// Fields left out keep their stored value
#[derive(Args, Debug, Default, PartialEq)]
pub struct SettingsUpdate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub signature: Option<String>,
    /// Render the report as soon as a new inspection is saved
    #[arg(long)]
    pub auto_generate: Option<bool>,
}
