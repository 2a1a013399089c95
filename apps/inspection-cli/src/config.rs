//! TOML configuration for the inspection CLI
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup: data under `./inspection-data`, reports written to the
//! current directory on A4 pages.

use anyhow::Context;
use inspection_types::InspectorProfile;
use report_pdf::{GridSpec, PageGeometry, ReportOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Where the key-value store keeps its files
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("inspection-data")
}

/// Report title, output location and page geometry (points)
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default = "default_photo_width")]
    pub photo_width: f32,
    #[serde(default = "default_photo_height")]
    pub photo_height: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output_dir: default_output_dir(),
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin: default_margin(),
            photo_width: default_photo_width(),
            photo_height: default_photo_height(),
        }
    }
}

impl ReportConfig {
    /// Renderer options for this configuration plus an optional preparer
    pub fn options(&self, profile: Option<InspectorProfile>) -> ReportOptions {
        ReportOptions {
            title: self.title.clone(),
            geometry: PageGeometry {
                width: self.page_width,
                height: self.page_height,
                margin: self.margin,
            },
            grid: GridSpec {
                photo_width: self.photo_width,
                photo_height: self.photo_height,
                ..GridSpec::default()
            },
            profile,
        }
    }
}

fn default_title() -> String {
    report_pdf::render::DEFAULT_TITLE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_width() -> f32 {
    PageGeometry::A4.width
}

fn default_page_height() -> f32 {
    PageGeometry::A4.height
}

fn default_margin() -> f32 {
    PageGeometry::A4.margin
}

fn default_photo_width() -> f32 {
    GridSpec::default().photo_width
}

fn default_photo_height() -> f32 {
    GridSpec::default().photo_height
}
