//! Application configuration
//!
//! Re-exports the shared [`BoardConfig`] and adds platform defaults and
//! persistence through confy.

pub use queuezero_types::BoardConfig;

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::storage::{FileStorage, default_data_dir};

const APP_NAME: &str = "queuezero";
const CONFIG_NAME: &str = "config";

/// Extension trait for BoardConfig persistence
pub trait BoardConfigExt: Sized {
    /// Load the saved config, or platform defaults if it is missing or unreadable
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    /// Directory of the storage file, with the platform default filled in
    fn data_dir(&self) -> PathBuf;
    /// File-backed storage described by this config
    fn storage(&self) -> FileStorage;
}

impl BoardConfigExt for BoardConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::load_with_defaults()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        let mut config: BoardConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        if config.data_directory.trim().is_empty() {
            config.data_directory = default_data_dir().to_string_lossy().into_owned();
        }
        Ok(config)
    }

    fn load_with_defaults() -> Self {
        BoardConfig::with_data_directory(default_data_dir().to_string_lossy().into_owned())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }

    fn data_dir(&self) -> PathBuf {
        if self.data_directory.trim().is_empty() {
            default_data_dir()
        } else {
            PathBuf::from(&self.data_directory)
        }
    }

    fn storage(&self) -> FileStorage {
        FileStorage::in_dir(self.data_dir(), &self.storage_file)
    }
}
