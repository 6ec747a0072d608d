//! Persisted settings store

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::TimerConfig;

/// Errors while writing settings back
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to save settings to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for the timer configuration
pub trait SettingsStore {
    /// Load the stored config; anything missing or unreadable falls back to defaults
    fn load(&self) -> TimerConfig;

    /// Write the config back
    fn save(&self, config: &TimerConfig) -> Result<(), SettingsError>;
}

/// Settings kept as a YAML document at a fixed path
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> TimerConfig {
        match confy::load_path::<TimerConfig>(&self.path) {
            Ok(config) => {
                info!(
                    "Loaded settings: duration={}s, vibration={}, flash={}",
                    config.duration_seconds, config.vibration_enabled, config.flash_enabled
                );
                config
            }
            Err(e) => {
                warn!("Unreadable settings in {}: {}, using defaults", self.path.display(), e);
                TimerConfig::default()
            }
        }
    }

    fn save(&self, config: &TimerConfig) -> Result<(), SettingsError> {
        confy::store_path(&self.path, config).map_err(|source| SettingsError::Save {
            path: self.path.clone(),
            source,
        })?;

        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Arc<Mutex<Option<TimerConfig>>>,
}

impl MemoryStore {
    pub fn with_config(config: TimerConfig) -> Self {
        Self {
            saved: Arc::new(Mutex::new(Some(config))),
        }
    }

    /// Last config written, if any
    pub fn saved(&self) -> Option<TimerConfig> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> TimerConfig {
        self.saved().unwrap_or_default()
    }

    fn save(&self, config: &TimerConfig) -> Result<(), SettingsError> {
        let mut saved = self.saved.lock()
            .map_err(|e| SettingsError::Unavailable(format!("failed to lock settings: {}", e)))?;
        *saved = Some(config.clone());
        Ok(())
    }
}
