//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing required input; reported before any I/O happens
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    /// Non-success response from an upstream function or provider
    #[error("Upstream error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    /// Network failure reaching an upstream
    #[error("Transport error: {0}")]
    Transport(String),
}

impl DomainError {
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }
}
