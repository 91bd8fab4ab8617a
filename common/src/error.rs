//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<::config::ConfigError> for CommonError {
    fn from(err: ::config::ConfigError) -> Self {
        CommonError::Config(err.to_string())
    }
}

/// Error raised by a generator service or the version-reporting collaborator.
///
/// The `Display` form may contain backend URLs and other internal details.
/// It belongs in server logs, never in HTTP response bodies.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend rejected or failed the request
    #[error("Backend error: {0}")]
    Backend(String),

    /// HTTP transport error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// The backend answered with something that is not the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidResponse(err.to_string())
    }
}
