//! Errors reported by an access-management API client.
//!
//! These errors describe what went wrong on the far side of an [`AccessApi`]
//! call, independent of how the provider turns them into diagnostics. The one
//! distinction callers act on is [`ApiError::NotFound`], recognised through
//! [`ApiError::is_not_found`].
//!
//! [`AccessApi`]: crate::api::AccessApi

use thiserror::Error;

/// Errors that can occur while talking to the access-management API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The addressed object does not exist.
    #[error("{kind} with id '{id}' not found")]
    NotFound {
        /// Resource kind, e.g. "group"
        kind: String,
        /// Identifier that was looked up
        id: String,
    },

    /// The request was rejected as malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem
        message: String,
    },

    /// A continuation token was unknown, expired or replayed with a different query.
    #[error("Invalid page token '{token}'")]
    InvalidPageToken {
        /// The offending token
        token: String,
    },

    /// The request conflicts with existing state (e.g. duplicate name).
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflict
        message: String,
    },

    /// Any other non-success answer from the API.
    #[error("API responded with status {status}: {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body or summary
        message: String,
    },

    /// The request never produced an answer.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure
        message: String,
    },
}

impl ApiError {
    /// Create a NotFound error.
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create an InvalidRequest error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a Remote error.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a Transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns true if the addressed object does not exist.
    ///
    /// A remote 404 counts as not-found as well, for clients that do not map
    /// it to [`ApiError::NotFound`] themselves.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound { .. } | ApiError::Remote { status: 404, .. }
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::InvalidRequest {
            message: format!("malformed payload: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(ApiError::not_found("group", "g1").is_not_found());
        assert!(ApiError::remote(404, "gone").is_not_found());
        assert!(!ApiError::remote(500, "oops").is_not_found());
        assert!(!ApiError::transport("reset").is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::not_found("bundle", "b-1").to_string(),
            "bundle with id 'b-1' not found"
        );
        assert_eq!(
            ApiError::remote(502, "bad gateway").to_string(),
            "API responded with status 502: bad gateway"
        );
    }
}
