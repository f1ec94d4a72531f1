// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant says what went wrong and where.

use std::fmt;
use thiserror::Error;

/// Prismic API failure classes as a typed vocabulary.
///
/// Prismic reports failures through the HTTP status and, for most errors,
/// a JSON body carrying a `type` such as `api_notfound_error`. Both are
/// folded into this enum so callers never match on strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentErrorCode {
    /// The access token is missing, invalid or expired
    Unauthorized,
    /// The token does not grant access to this repository or release
    Forbidden,
    /// The ref, repository or document does not exist
    NotFound,
    /// The predicate query could not be parsed or validated
    InvalidQuery,
    /// Too many requests: back off
    RateLimited,
    /// Prismic is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
}

impl ContentErrorCode {
    /// Parses the `type` field of a Prismic error body.
    pub fn from_api_response(kind: &str) -> Option<Self> {
        match kind {
            "api_notfound_error" => Some(Self::NotFound),
            "api_security_error" => Some(Self::Unauthorized),
            "api_parsing_error" | "api_validation_error" => Some(Self::InvalidQuery),
            _ => None,
        }
    }

    /// Classifies an HTTP status when the body carries no usable type.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidQuery,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::ServiceUnavailable)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for ContentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidQuery => write!(f, "invalid_query"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Prismic API returned an error ({code}): {message}")]
    ContentService {
        code: ContentErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No '{doc_type}' document with UID '{uid}'")]
    DocumentNotFound { doc_type: String, uid: String },

    #[error("Repository has no master ref")]
    MissingMasterRef,

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error(transparent)]
    Fetch(#[from] crate::algebras::FetchError),

    #[error(transparent)]
    Pagination(#[from] crate::algebras::PaginationError),
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
