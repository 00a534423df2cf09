//! Error types for provider operations.
//!
//! Provider code never recovers from errors locally. Listing helpers and
//! lifecycle handlers propagate upward, attaching the operation and the
//! identifying parameter that was being worked on so the host can render a
//! useful diagnostic. The one exception is a resource read that hits
//! not-found, which the resource handlers turn into "remove from state".

use crate::api::ApiError;

/// Main error type for provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A call to the access-management API failed
    #[error("Failed to {operation} '{target}': {source}")]
    Api {
        /// What the provider was doing, e.g. "read group"
        operation: &'static str,
        /// The identifying parameter, e.g. a group id or a name filter
        target: String,
        #[source]
        source: ApiError,
    },

    /// A wire object could not be mapped into a state model
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// A planned resource is not acceptable before any call is made
    #[error("Invalid {resource_type} configuration: {message}")]
    InvalidPlan {
        resource_type: &'static str,
        message: String,
    },

    /// Provider configuration is missing or malformed
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        parameter: Option<String>,
    },
}

/// Errors raised while mapping wire DTOs into state models and back.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// An access target must carry exactly one of integration, bundle or access scope
    #[error("Access target must set exactly one of integration, bundle or access_scope, found {found}")]
    AccessTargetShape { found: usize },

    /// Unknown resource filter type
    #[error("Unknown resource filter type '{filter_type}'")]
    UnknownResourceFilter { filter_type: String },

    /// Tag filters need a key
    #[error("Resource filter of type 'tag' requires a key")]
    MissingFilterKey,

    /// Unknown access flow trigger
    #[error("Unknown access flow trigger '{trigger}'")]
    UnknownTrigger { trigger: String },

    /// Unknown grantee type
    #[error("Unknown grantee type '{grantee_type}'")]
    UnknownGranteeType { grantee_type: String },

    /// Unknown approval mode
    #[error("Unknown approval mode '{mode}'")]
    UnknownApprovalMode { mode: String },

    /// Value does not fit the state model's range
    #[error("Field '{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    /// JSON payload could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;

impl ProviderError {
    /// Wrap an API error with the operation and the parameter it concerned.
    pub fn api(operation: &'static str, target: impl Into<String>, source: ApiError) -> Self {
        Self::Api {
            operation,
            target: target.into(),
            source,
        }
    }

    /// Create an InvalidPlan error.
    pub fn invalid_plan(resource_type: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPlan {
            resource_type,
            message: message.into(),
        }
    }

    /// Create a Configuration error.
    pub fn configuration(message: impl Into<String>, parameter: Option<&str>) -> Self {
        Self::Configuration {
            message: message.into(),
            parameter: parameter.map(str::to_string),
        }
    }

    /// Returns true if this error originates from a not-found API answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::Api { source, .. } if source.is_not_found())
    }

    /// The underlying API error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ProviderError::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extension for attaching provider context to API results.
pub trait ApiResultExt<T> {
    /// Map an [`ApiError`] into [`ProviderError::Api`].
    fn context(self, operation: &'static str, target: &str) -> ProviderResult<T>;
}

impl<T> ApiResultExt<T> for Result<T, ApiError> {
    fn context(self, operation: &'static str, target: &str) -> ProviderResult<T> {
        self.map_err(|source| ProviderError::api(operation, target, source))
    }
}
