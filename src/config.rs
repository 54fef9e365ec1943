//! Persistent settings. A small JSON file under the user's home directory
//! carries the backing table path, the document folders, the unsaved-changes
//! policy, and the preferred theme. Missing file means first run: defaults
//! are written out so the user has something to edit.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".case-reviewer";
/// Settings file stored inside the application data directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// The two color schemes the TUI can render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Everything configurable about a session. `warn_unsaved` feeds the
/// navigation policy; the rest is pass-through to the store, the document
/// index, and the theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the backing CSV table.
    pub table_path: PathBuf,
    /// Folder holding `case_{id}.pdf` documents.
    pub pdf_dir: PathBuf,
    /// Folder holding `case_{id}.txt` documents.
    pub txt_dir: PathBuf,
    /// Whether a dirty buffer blocks navigation behind a prompt.
    pub warn_unsaved: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("cases_review.csv"),
            pdf_dir: PathBuf::from("./pdfs"),
            txt_dir: PathBuf::from("./txts"),
            warn_unsaved: true,
            theme: Theme::Light,
        }
    }
}

/// Load the settings from the per-user config file, writing defaults on
/// first run.
pub fn load() -> Result<Settings> {
    load_from(&config_path()?)
}

/// Save the settings to the per-user config file.
pub fn save(settings: &Settings) -> Result<()> {
    save_to(&config_path()?, settings)
}

pub fn load_from(path: &Path) -> Result<Settings> {
    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("settings file {} is not valid JSON", path.display()))
    } else {
        let settings = Settings::default();
        save_to(path, &settings)?;
        Ok(settings)
    }
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create settings directory")?;
    }
    let raw = serde_json::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write settings to {}", path.display()))
}

/// Resolve the absolute path of the settings file inside the user's home.
fn config_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}
