//! Error types for the surfsup application.
//!
//! A single error enum covers every failure the service can hit. The variants
//! fall into three groups that decide how a request fails:
//!
//! - caller mistakes (`InvalidArgument`) answer 400,
//! - an empty dataset (`DataUnavailable`) answers 404,
//! - everything else is a storage or server fault and answers 500.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsupError {
    /// SQLite driver errors
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The store is reachable but its contents are unusable
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed or inconsistent caller input
    #[error("Invalid argument: {param} - {message}")]
    InvalidArgument { param: String, message: String },

    /// The dataset has no rows to answer the query
    #[error("Data unavailable: {message}")]
    DataUnavailable { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsupError {
    /// HTTP status a request failing with this error should answer with
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurfsupError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            SurfsupError::DataUnavailable { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error was caused by the caller rather than the system
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, SurfsupError::InvalidArgument { .. })
    }

    /// Message safe to show in a response body.
    ///
    /// Storage and server faults are reduced to a generic message; their detail
    /// only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            SurfsupError::InvalidArgument { .. } | SurfsupError::DataUnavailable { .. } => {
                self.to_string()
            }
            _ => "Internal server error".to_string(),
        }
    }

    pub(crate) fn invalid_argument(param: &str, message: impl Into<String>) -> Self {
        SurfsupError::InvalidArgument {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with SurfsupError
pub type Result<T> = std::result::Result<T, SurfsupError>;
