//! Persisted media preferences (which categories to download).
//!
//! Stored as JSON under the XDG config dir in a single `preferences` entry.
//! Read and write failures are logged and never fatal: callers keep working
//! with defaults or their in-memory options.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::media::{MediaCategory, MediaOptions};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesRecord {
    #[serde(default)]
    preferences: MediaOptions,
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default path: `~/.config/jdgrab/preferences.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("jdgrab")?;
        Ok(xdg_dirs.place_config_file("preferences.json")?)
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored options, or all-enabled defaults when nothing usable is stored.
    pub fn load(&self) -> MediaOptions {
        match self.try_load() {
            Ok(Some(options)) => options,
            Ok(None) => MediaOptions::default(),
            Err(e) => {
                tracing::warn!("error loading preferences: {:#}", e);
                MediaOptions::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<MediaOptions>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read preferences: {}", self.path.display()))
            }
        };
        let record: PreferencesRecord = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse preferences: {}", self.path.display()))?;
        Ok(Some(record.preferences))
    }

    /// Writes `options` (creates the parent dir if needed).
    pub fn save(&self, options: &MediaOptions) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let record = PreferencesRecord {
            preferences: *options,
        };
        let json = serde_json::to_string_pretty(&record).context("serialize preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write preferences: {}", self.path.display()))?;
        Ok(())
    }

    /// Toggles one category and persists immediately. A failed write is logged;
    /// the updated options are returned either way.
    pub fn set(&self, category: MediaCategory, enabled: bool) -> MediaOptions {
        let mut options = self.load();
        options.set(category, enabled);
        if let Err(e) = self.save(&options) {
            tracing::warn!("error saving preferences: {:#}", e);
        }
        options
    }

    /// Restores the all-enabled defaults.
    pub fn reset(&self) -> MediaOptions {
        let options = MediaOptions::default();
        if let Err(e) = self.save(&options) {
            tracing::warn!("error saving preferences: {:#}", e);
        }
        options
    }
}
