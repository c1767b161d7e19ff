//! Runtime configuration for the command-line tool.
//!
//! Loaded from `article-assess.toml` in the working directory, or from the
//! path given with `--config`. Every field is optional. Scoring weights are
//! not configurable here; see [`crate::weights`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "article-assess.toml";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Worker threads for batch assessment; 0 lets rayon decide.
    pub threads: usize,
    /// Keep going after a request fails instead of aborting the run.
    pub continue_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            pretty: true,
            threads: 0,
            continue_on_error: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`. A missing file is an error; use [`Config::discover`] for
    /// the optional default location.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `explicit` if given, otherwise `article-assess.toml` in `dir` when
    /// it exists, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply a command-line log level, held to the same check as the file.
    pub fn with_log_level(mut self, level: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(level) = level {
            self.log_level = level.to_string();
            self.validate()?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_log_level(&self.log_level)
    }
}

fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    let normalized = level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&normalized.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "log_level '{level}' is not one of {}",
            LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}
