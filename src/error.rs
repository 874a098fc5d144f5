//! Error types for the configuration surfaces.
//!
//! Gameplay itself never fails: blocked moves, skipped rooms and missing
//! door tiles are silent no-ops. Only loading and validating settings can
//! produce an error.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown difficulty preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid difficulty profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON write error: {0}")]
    RonWrite(#[from] ron::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
