//! Schema error types
//!
//! Error codes:
//! - LEDGER_UNKNOWN_ENTITY
//! - LEDGER_UNKNOWN_FIELD_MODE

use thiserror::Error;

/// Result type for schema lookups
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while resolving entity names and field modes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Unknown entity type: '{0}'. Expected 'account' or 'transaction'.")]
    UnknownEntity(String),

    #[error("Unknown field mode: '{0}'. Expected 'create' or 'update'.")]
    UnknownFieldMode(String),
}

impl SchemaError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownEntity(_) => "LEDGER_UNKNOWN_ENTITY",
            SchemaError::UnknownFieldMode(_) => "LEDGER_UNKNOWN_FIELD_MODE",
        }
    }
}
