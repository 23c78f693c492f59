//! Core error type.

use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlmError {
    /// Network level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success HTTP status returned by the provider
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Failure while consuming an event stream
    #[error("Stream error: {0}")]
    StreamError(String),

    /// A provider payload could not be interpreted
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    /// An attachment could not be read through the file collaborator
    #[error("Failed to read file {key}: {message}")]
    FileError { key: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The caller aborted the operation through an `AbortHandle`
    #[error("Operation aborted")]
    Aborted,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LlmError {
    /// Shorthand for an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Shorthand for a `FileError`.
    pub fn file_error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileError {
            key: key.into(),
            message: message.into(),
        }
    }

    /// HTTP status attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether repeating the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::StreamError(_) => true,
            Self::ApiError { code, .. } => *code == 408 || *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
