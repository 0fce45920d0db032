//! Settings persistence: TOML record under the XDG config dir.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use super::Settings;

/// On-disk settings store.
///
/// Reads always merge the stored record over defaults (every field has a
/// serde default); a missing file is initialized with defaults on first
/// read.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at `~/.config/vshot/settings.toml`.
    pub fn default_location() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vshot")?;
        Ok(Self {
            path: xdg_dirs.place_config_file("settings.toml")?,
        })
    }

    /// Store at an explicit path (tests, alternate profiles).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, creating a default file if none exists.
    pub fn load_or_init(&self) -> Result<Settings> {
        if !self.path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            tracing::info!("created default settings at {}", self.path.display());
            return Ok(defaults);
        }
        let data = fs::read_to_string(&self.path)?;
        let settings: Settings = toml::from_str(&data)?;
        Ok(settings)
    }

    /// Settings snapshot for one request: the stored record, or defaults
    /// when the store is unreadable. Never fails the operation.
    pub fn snapshot(&self) -> Settings {
        match self.load_or_init() {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("settings unreadable, using defaults: {err:#}");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let text = toml::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}
