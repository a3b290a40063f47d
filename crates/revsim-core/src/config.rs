//! Engine configuration for revsim
//!
//! Configuration lives in a TOML file with `[data]` and `[engine]` tables.
//! Lookup order: an explicit path, then `$REVSIM_CONFIG_DIR/config.toml`,
//! then the platform config directory (`~/.config/revsim/config.toml` on
//! Linux). A missing file means defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bail_invalid;
use crate::error::{Result, RevsimError};
use crate::text::Tokenizer;

pub use types::{
    DataConfig, EngineConfig, EngineSettings, DEFAULT_DUPLICATE_THRESHOLD, DEFAULT_TOP_K,
};

const CONFIG_DIR: &str = "revsim";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "REVSIM_CONFIG_DIR";

impl EngineConfig {
    /// Default config file location, honouring `REVSIM_CONFIG_DIR`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    RevsimError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Resolve the configuration for a run
    ///
    /// An explicit path must exist. The default location is optional and
    /// falls back to built-in defaults when absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(RevsimError::invalid_value(
                    "config path",
                    format!("{} does not exist", path.display()),
                ));
            }
            return Self::load(path);
        }

        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                debug!(error = %e, "no config directory, using defaults");
                return Ok(Self::default());
            }
        };

        if path.exists() {
            Self::load(&path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RevsimError::io_operation("read config", path.display(), e))?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| RevsimError::io_operation("create", parent.display(), e))?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RevsimError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| RevsimError::io_operation("write", path.display(), e))?;
        Ok(())
    }

    /// Reject values the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        let engine = &self.engine;

        if engine.top_k == 0 {
            bail_invalid!("engine.top_k", "0 (must be at least 1)");
        }
        if !(0.0..=1.0).contains(&engine.duplicate_threshold) {
            bail_invalid!(
                "engine.duplicate_threshold",
                format!("{} (must be within 0.0..=1.0)", engine.duplicate_threshold)
            );
        }
        if self.data.item_column.trim().is_empty() {
            bail_invalid!("data.item_column", "empty column name");
        }
        if self.data.text_column.trim().is_empty() {
            bail_invalid!("data.text_column", "empty column name");
        }

        Ok(())
    }

    /// Tokenizer matching the configured preprocessing
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new()
            .with_stop_words(self.engine.stop_words)
            .with_extra_stop_words(&self.engine.extra_stop_words)
            .with_stemming(self.engine.stemming)
    }

    /// Catalog path from config, if any
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.path.as_ref().map(PathBuf::from)
    }
}
