use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the assessment engine.
///
/// Degraded input (empty text, no facts, no sources) is never an error; it
/// produces a complete report with low scores.
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("unknown style tag '{tag}' (expected one of: news, blog, social, newsletter)")]
    UnknownStyle { tag: String },

    #[error("malformed assessment request: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

/// Errors loading or validating runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AssessError {
    pub fn unknown_style(tag: impl Into<String>) -> Self {
        Self::UnknownStyle { tag: tag.into() }
    }
}
