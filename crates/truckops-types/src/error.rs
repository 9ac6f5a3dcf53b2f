//! Error types for TruckOps

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Backend is not configured")]
    NotConfigured,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Top-level error with a tagged cause, so callers can branch on
/// what went wrong instead of matching on message text.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl Error {
    /// Generic text shown to the user for any remote failure.
    /// The tagged variant is still available for logging and tests.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Auth(_) => "Login failed: Invalid credentials.".to_string(),
            Error::Config(e) => e.to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
