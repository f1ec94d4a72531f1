//! Error types for algebra traits.
//!
//! These errors are used by the algebra layer and are intentionally
//! domain-specific rather than generic.

use super::state::PaginationState;
use std::fmt;

/// Error that can occur during content retrieval operations.
///
/// This is the error type for [`ContentSource`](super::ContentSource)
/// operations. It represents failure modes that any content retrieval
/// implementation might encounter.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No document matched the requested UID.
    NotFound { id: String },

    /// The access token was rejected or does not grant access.
    Unauthorized { reason: String },

    /// The API rate limit was exceeded.
    RateLimited { retry_after_seconds: Option<u64> },

    /// The query was malformed or rejected.
    InvalidRequest { reason: String },

    /// Prismic returned an error.
    ApiError {
        code: String,
        message: String,
        status: u16,
    },

    /// Network or transport error.
    Transport { message: String },

    /// The response could not be parsed.
    MalformedResponse { reason: String },

    /// An operation timed out.
    Timeout { operation: String },

    /// Some other error occurred.
    Other { message: String },
}

impl FetchError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::Timeout { .. }
                | Self::Transport { .. }
                | Self::ApiError {
                    status: 408 | 429 | 500..=599,
                    ..
                }
        )
    }

    /// Returns `true` if this error means the resource doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Document not found: {}", id),
            Self::Unauthorized { reason } => write!(f, "Unauthorized: {}", reason),
            Self::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited")?;
                if let Some(seconds) = retry_after_seconds {
                    write!(f, " (retry after {}s)", seconds)?;
                }
                Ok(())
            }
            Self::InvalidRequest { reason } => write!(f, "Invalid request: {}", reason),
            Self::ApiError { code, message, .. } => {
                write!(f, "API error [{}]: {}", code, message)
            }
            Self::Transport { message } => write!(f, "Transport error: {}", message),
            Self::MalformedResponse { reason } => write!(f, "Malformed response: {}", reason),
            Self::Timeout { operation } => write!(f, "Timeout during: {}", operation),
            Self::Other { message } => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for FetchError {}

/// Error returned by [`PaginationTracker::advance`](crate::PaginationTracker::advance).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaginationError {
    /// The next page could not be fetched; tracker state is unchanged.
    #[error("Failed to fetch next page: {cause}")]
    Fetch { cause: FetchError },

    /// `advance` was called in a state that does not allow it.
    ///
    /// This is a caller bug: check `has_more()` first.
    #[error("Cannot advance pagination while {state}")]
    InvalidState { state: PaginationState },
}

impl PaginationError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch { cause } => cause.is_retryable(),
            Self::InvalidState { .. } => false,
        }
    }
}

impl From<FetchError> for PaginationError {
    fn from(cause: FetchError) -> Self {
        Self::Fetch { cause }
    }
}

// ==============================================================================
// Conversion from existing errors
// ==============================================================================

impl From<crate::error::AppError> for FetchError {
    fn from(err: crate::error::AppError) -> Self {
        use crate::error::{AppError, ContentErrorCode};

        match err {
            AppError::ContentService {
                ref code,
                ref message,
                status,
            } => match code {
                ContentErrorCode::Unauthorized | ContentErrorCode::Forbidden => {
                    Self::Unauthorized {
                        reason: message.clone(),
                    }
                }
                ContentErrorCode::RateLimited => Self::RateLimited {
                    retry_after_seconds: None,
                },
                ContentErrorCode::InvalidQuery => Self::InvalidRequest {
                    reason: message.clone(),
                },
                // A 404 from the API names a missing ref or endpoint, never a
                // missing document; an empty UID lookup is `DocumentNotFound`.
                ContentErrorCode::NotFound
                | ContentErrorCode::ServiceUnavailable
                | ContentErrorCode::HttpStatus(_) => {
                    Self::ApiError {
                        code: code.to_string(),
                        message: message.clone(),
                        status: status.as_u16(),
                    }
                }
            },
            AppError::DocumentNotFound { doc_type, uid } => Self::NotFound {
                id: format!("{}/{}", doc_type, uid),
            },
            AppError::NetworkFailure(ref source) if source.is_timeout() => Self::Timeout {
                operation: source
                    .url()
                    .map(|url| format!("GET {}", url))
                    .unwrap_or_else(|| "request".to_string()),
            },
            AppError::NetworkFailure(ref source) if source.is_decode() => {
                Self::MalformedResponse {
                    reason: err.to_string(),
                }
            }
            AppError::NetworkFailure(_) => Self::Transport {
                message: err.to_string(),
            },
            AppError::MalformedResponse(_) => Self::MalformedResponse {
                reason: err.to_string(),
            },
            AppError::Fetch(inner) => inner,
            _ => Self::Other {
                message: err.to_string(),
            },
        }
    }
}
