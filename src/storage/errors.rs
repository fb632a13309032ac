//! Storage error types
//!
//! Error codes:
//! - LEDGER_STORAGE_NOT_FOUND: collection file does not exist
//! - LEDGER_STORAGE_IO_FAILURE: read, write, fsync or rename failed
//! - LEDGER_STORAGE_MALFORMED: file content is not readable CSV text

use std::fmt;
use std::io;
use std::path::Path;

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Collection file is absent
    NotFound,
    /// Underlying I/O failure
    IoFailure,
    /// File could not be parsed as CSV
    Malformed,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::NotFound => "LEDGER_STORAGE_NOT_FOUND",
            StorageErrorCode::IoFailure => "LEDGER_STORAGE_IO_FAILURE",
            StorageErrorCode::Malformed => "LEDGER_STORAGE_MALFORMED",
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with the file it concerns
#[derive(Debug)]
pub struct StorageError {
    /// Error code
    code: StorageErrorCode,
    /// Human-readable message
    message: String,
    /// Optional context (usually the file path)
    details: Option<String>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl StorageError {
    /// Collection file does not exist
    pub fn not_found(path: &Path) -> Self {
        Self {
            code: StorageErrorCode::NotFound,
            message: "Collection file not found".to_string(),
            details: Some(format!("path: {}", path.display())),
            source: None,
        }
    }

    /// I/O failure while touching `path`
    pub fn io_failure(message: impl Into<String>, path: &Path, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::IoFailure,
            message: message.into(),
            details: Some(format!("path: {}", path.display())),
            source: Some(source),
        }
    }

    /// Content of `path` is not valid CSV
    pub fn malformed(message: impl Into<String>, path: &Path) -> Self {
        Self {
            code: StorageErrorCode::Malformed,
            message: message.into(),
            details: Some(format!("path: {}", path.display())),
            source: None,
        }
    }

    /// Maps an `io::Error` raised while opening a file for reading.
    ///
    /// A missing file becomes `NotFound`; everything else is `IoFailure`.
    pub fn from_open(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::io_failure("Failed to open collection file", path, err)
        }
    }

    /// Maps a `csv::Error` raised while reading or writing `path`.
    pub fn from_csv(path: &Path, err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => Self::from_open(path, io_err),
            _ => Self::malformed(message, path),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether the collection file was missing
    pub fn is_not_found(&self) -> bool {
        self.code == StorageErrorCode::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StorageErrorCode::NotFound.code(), "LEDGER_STORAGE_NOT_FOUND");
        assert_eq!(StorageErrorCode::IoFailure.code(), "LEDGER_STORAGE_IO_FAILURE");
        assert_eq!(StorageErrorCode::Malformed.code(), "LEDGER_STORAGE_MALFORMED");
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let path = Path::new("/nowhere/accounts.csv");
        let err = StorageError::from_open(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.details(), Some("path: /nowhere/accounts.csv"));
    }

    #[test]
    fn test_permission_denied_maps_to_io_failure() {
        let path = Path::new("accounts.csv");
        let err = StorageError::from_open(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code(), StorageErrorCode::IoFailure);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_contains_code_and_path() {
        let err = StorageError::not_found(Path::new("transactions.csv"));
        let display = err.to_string();
        assert!(display.contains("LEDGER_STORAGE_NOT_FOUND"));
        assert!(display.contains("transactions.csv"));
    }
}
