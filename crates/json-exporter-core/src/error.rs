//! Shared error type across json-exporter crates.

use thiserror::Error;

/// Stable error codes, used as metric label values and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A configured path expression does not compile.
    PathSyntax,
    /// The scraped document is not valid JSON.
    InvalidDocument,
    /// Configuration is malformed or fails validation.
    BadConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// The target document could not be fetched.
    FetchFailed,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in labels and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::PathSyntax => "PATH_SYNTAX",
            ErrorCode::InvalidDocument => "INVALID_DOCUMENT",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::FetchFailed => "FETCH_FAILED",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, JsonExporterError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum JsonExporterError {
    #[error("failed to parse path <{expr}>: {reason}")]
    PathSyntax { expr: String, reason: String },
    #[error("invalid json document: {0}")]
    InvalidDocument(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl JsonExporterError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            JsonExporterError::PathSyntax { .. } => ErrorCode::PathSyntax,
            JsonExporterError::InvalidDocument(_) => ErrorCode::InvalidDocument,
            JsonExporterError::BadConfig(_) => ErrorCode::BadConfig,
            JsonExporterError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            JsonExporterError::Fetch(_) => ErrorCode::FetchFailed,
            JsonExporterError::Internal(_) => ErrorCode::Internal,
        }
    }
}
