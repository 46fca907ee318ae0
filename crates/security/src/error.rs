//! Policy error types.

use thiserror::Error;

/// Errors raised by policy construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Invalid directive name provided: {0}")]
    InvalidDirective(String),

    #[error("Invalid directive value provided: {0}")]
    InvalidValue(String),
}

pub type PolicyResult<T> = Result<T, PolicyError>;

impl PolicyError {
    pub fn invalid_directive(name: impl Into<String>) -> Self {
        Self::InvalidDirective(name.into())
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }
}

/// Errors raised while loading policy settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
