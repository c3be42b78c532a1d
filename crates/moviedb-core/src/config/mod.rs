//! Configuration management with file persistence
//!
//! Paths used by the catalog live here and are handed to storage, import and
//! export at call time.

use crate::error::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the directory holding `config.toml`
pub const CONFIG_DIR_ENV: &str = "MOVIEDB_CONFIG_DIR";
/// Environment variable overriding `database.path`
pub const DATABASE_PATH_ENV: &str = "MOVIEDB_DATABASE_PATH";

const KEYS: [&str; 3] = ["database.path", "files.import_path", "files.export_path"];

/// moviedb configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseSection,
    pub files: FilesSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file holding the catalog
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    /// JSON file read by `import`
    pub import_path: PathBuf,
    /// JSON file written by `export`
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseSection {
                path: PathBuf::from("movies.db"),
            },
            files: FilesSection {
                import_path: PathBuf::from("movies.json"),
                export_path: PathBuf::from("exported.json"),
            },
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Config::default().database
    }
}

impl Default for FilesSection {
    fn default() -> Self {
        Config::default().files
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| Error::ConfigError("Could not determine config directory".into()))?
                .join("moviedb")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse config file {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DATABASE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            tracing::debug!(path = %path, "Database path overridden from environment");
            self.database.path = PathBuf::from(path);
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                Error::ConfigError(format!("Failed to create config directory {}: {e}", dir.display()))
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        fs::write(path, contents).map_err(|e| {
            Error::ConfigError(format!("Failed to write config file {}: {e}", path.display()))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for key in KEYS {
            if self.get(key)?.trim().is_empty() {
                return Err(Error::ConfigError(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Result<String> {
        let path = match key {
            "database.path" => &self.database.path,
            "files.import_path" => &self.files.import_path,
            "files.export_path" => &self.files.export_path,
            _ => return Err(unknown_key(key)),
        };
        Ok(path.display().to_string())
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::ConfigError(format!("{key} must not be empty")));
        }
        let slot = match key {
            "database.path" => &mut self.database.path,
            "files.import_path" => &mut self.files.import_path,
            "files.export_path" => &mut self.files.export_path,
            _ => return Err(unknown_key(key)),
        };
        *slot = PathBuf::from(value);
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        KEYS.into_iter()
            .map(|key| Ok((key.to_string(), self.get(key)?)))
            .collect()
    }

    /// Reset configuration to defaults by removing the config file at `path`
    pub fn reset(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                Error::ConfigError(format!("Failed to remove config file {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> Error {
    Error::ConfigError(format!(
        "Unknown configuration key: {key}. Use `moviedb config list` to see available keys."
    ))
}
