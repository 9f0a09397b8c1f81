use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::i18n::Locale;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerSettings {
    pub locale: Locale,
    /// How many sessions `load_history` pulls from the store
    pub session_history_limit: usize,
    /// How many standalone readings `load_history` pulls from the store
    pub reading_history_limit: usize,
    pub max_readings_per_session: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            session_history_limit: 100,
            reading_history_limit: 200,
            max_readings_per_session: 10,
        }
    }
}

/// JSON-backed settings. An unreadable file falls back to defaults.
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: RwLock<TrackerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed settings at {}: {err}", path.display());
                TrackerSettings::default()
            })
        } else {
            TrackerSettings::default()
        };

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Settings that are never written to disk.
    pub fn ephemeral(settings: TrackerSettings) -> Self {
        Self {
            path: None,
            data: RwLock::new(settings),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackerSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrackerSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> TrackerSettings {
        self.read().clone()
    }

    pub fn locale(&self) -> Locale {
        self.read().locale
    }

    pub fn set_locale(&self, locale: Locale) -> Result<()> {
        self.update(|settings| settings.locale = locale)
    }

    pub fn update(&self, apply: impl FnOnce(&mut TrackerSettings)) -> Result<()> {
        let mut guard = self.write();
        apply(&mut guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &TrackerSettings) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}
