//! Global datebook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DatebookError, DatebookResult};
use crate::storage::FileStore;

static DEFAULT_STORE_PATH: &str = "~/.local/share/datebook/storage.json";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Configuration at ~/.config/datebook/config.toml
///
/// Any key can be overridden with a `DATEBOOK_` environment variable,
/// e.g. `DATEBOOK_STORE_PATH`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatebookConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl Default for DatebookConfig {
    fn default() -> Self {
        DatebookConfig {
            store_path: default_store_path(),
        }
    }
}

impl DatebookConfig {
    pub fn config_path() -> DatebookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DatebookError::Config("Could not determine config directory".into()))?
            .join("datebook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config
    /// file on first run.
    pub fn load() -> DatebookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DatebookResult<Self> {
        Self::load_with_env(path, Environment::with_prefix("DATEBOOK"))
    }

    /// Load `path`, letting `env` override any key it sets.
    pub fn load_with_env(path: &Path, env: Environment) -> DatebookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| DatebookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DatebookError::Config(e.to_string()))
    }

    /// Where bookings are stored, with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.store_path.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.store_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DatebookResult<()> {
        let contents = format!(
            "\
# datebook configuration

# Where bookings are saved:
# store_path = \"{}\"
",
            DEFAULT_STORE_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatebookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DatebookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
