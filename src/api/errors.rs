//! API error types
//!
//! API errors are pass-through: storage and schema errors keep their
//! original codes so the caller sees where a failure came from.

use std::fmt;

use crate::schema::SchemaError;
use crate::storage::StorageError;

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Invalid request format
    InvalidRequest,
    /// Unknown operation
    UnknownOperation,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidRequest => "LEDGER_INVALID_REQUEST",
            ApiErrorCode::UnknownOperation => "LEDGER_UNKNOWN_OPERATION",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with the originating code preserved
#[derive(Debug)]
pub struct ApiError {
    /// Error code string (from a subsystem or the API itself)
    code: String,
    /// Error message
    message: String,
}

impl ApiError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::InvalidRequest.code().to_string(),
            message: reason.into(),
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(op: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::UnknownOperation.code().to_string(),
            message: format!("Unknown operation: {}", op.into()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let message = match err.details() {
            Some(details) => format!("{} ({})", err.message(), details),
            None => err.message().to_string(),
        };
        Self {
            code: err.code().code().to_string(),
            message,
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
