//! Error types for order construction, signing and request authentication.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Rounding overflow: {message}")]
    RoundingOverflow { message: String },

    #[error("Authentication unavailable: {message}")]
    AuthUnavailable { message: String },

    #[error("no match: {message}")]
    NoMatch { message: String },

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Error::Signing {
            message: message.into(),
        }
    }

    pub fn no_match(message: impl Into<String>) -> Self {
        Error::NoMatch {
            message: message.into(),
        }
    }

    /// Whether the error is a rejected input rather than an internal defect.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
