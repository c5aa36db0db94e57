//! Error types for the Bibet betting backend
//!
//! One taxonomy shared by the ledger, the game evaluators and the
//! repositories. The API layer maps each variant to an HTTP status.

/// Root error type for all betting and game operations
#[derive(Debug, thiserror::Error)]
pub enum BetError {
    /// Malformed or out-of-range input (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Missing resource, or one the caller may not touch (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key, e.g. email already registered (HTTP 409)
    #[error("{0}")]
    Conflict(String),

    /// Balance is tracked and too low to cover the amount at risk (HTTP 400)
    #[error("Insufficient balance")]
    InsufficientFunds { required: f64, available: f64 },

    /// Invalid or expired identity token (HTTP 401)
    #[error("{0}")]
    Credential(String),

    /// Unexpected failure; message is logged but redacted on the wire (HTTP 500)
    #[error("{0}")]
    Internal(String),
}

impl BetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BetError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        BetError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        BetError::Conflict(msg.into())
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        BetError::Credential(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        BetError::Internal(msg.into())
    }
}

/// Convenience alias used throughout the crate
pub type BetResult<T> = Result<T, BetError>;
