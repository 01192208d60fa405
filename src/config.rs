//! Runner configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! database = "governance.db"
//! foreign_keys = true
//! scripts = ["schema.sql", "seed.sql"]
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Path SQLite treats as a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Database file path, or `:memory:`.
    #[serde(default = "default_database")]
    pub database: String,

    /// Whether to run `PRAGMA foreign_keys = ON` after opening.
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,

    /// Scripts executed in order right after the connection is opened.
    #[serde(default)]
    pub scripts: Vec<PathBuf>,
}

fn default_database() -> String {
    IN_MEMORY.to_string()
}

fn default_foreign_keys() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            foreign_keys: default_foreign_keys(),
            scripts: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// Configuration for a file-backed database.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            database: path.into(),
            ..Self::default()
        }
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.scripts.push(script.into());
        self
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database.is_empty() || self.database == IN_MEMORY
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file. Relative database and script paths resolve against the
    /// file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let Some(base) = path.parent() {
            if !config.is_in_memory() && Path::new(&config.database).is_relative() {
                config.database = base.join(&config.database).display().to_string();
            }
            for script in &mut config.scripts {
                if script.is_relative() {
                    *script = base.join(script.as_path());
                }
            }
        }
        Ok(config)
    }
}
