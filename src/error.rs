//! Unified error type for taskdeck.
//!
//! Built on `thiserror`; every error maps to exactly one HTTP status at the
//! API boundary (see `api::error`).

use thiserror::Error;

/// Taskdeck error type
#[derive(Debug, Error)]
pub enum TaskError {
    /// Request field failed shape validation (bad title/priority/deadline/status)
    #[error("{0}")]
    Validation(String),

    /// Protected mutation called without an authorization token
    #[error("{0}")]
    AuthRequired(String),

    /// Unknown task id
    #[error("{0}")]
    NotFound(String),

    /// Unexpected internal fault (e.g. poisoned store lock)
    #[error("{context}: {details}")]
    Internal { context: String, details: String },
}

/// Taskdeck Result alias
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn auth_required(msg: impl Into<String>) -> Self {
        Self::AuthRequired(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal {
            context: context.into(),
            details: details.into(),
        }
    }
}
