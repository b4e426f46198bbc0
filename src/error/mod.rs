//! Error handling module for Cutframe

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Cutframe operations
#[derive(Error, Debug)]
pub enum CutframeError {
    /// Domain rule or codec failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CutframeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

/// Result type alias for Cutframe operations
pub type CutframeResult<T> = std::result::Result<T, CutframeError>;
