//! Provider configuration.
//!
//! Settings can be given explicitly through the builder-style setters or
//! picked up from the environment with [`ProviderConfig::from_env`]. The API
//! token is never printed: `Debug` output redacts it.

use crate::error::{ProviderError, ProviderResult};
use std::fmt;

/// Environment variable holding the API endpoint.
pub const ENDPOINT_ENV: &str = "ACCESS_PROVIDER_ENDPOINT";
/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "ACCESS_PROVIDER_TOKEN";
/// Environment variable holding the preferred page size.
pub const PAGE_SIZE_ENV: &str = "ACCESS_PROVIDER_PAGE_SIZE";

const DEFAULT_ENDPOINT: &str = "https://api.example.com";
const DEFAULT_PAGE_SIZE: usize = 100;
const MAX_PAGE_SIZE: usize = 1000;

/// Connection settings shared by every resource and data source.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the access-management API, without a trailing slash.
    pub endpoint: String,

    /// Bearer token used to authenticate API calls.
    pub token: String,

    /// User agent reported to the API.
    pub user_agent: String,

    /// Page size requested from list endpoints by clients that support it.
    pub page_size: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: String::new(),
            user_agent: format!("access-provider/{}", env!("CARGO_PKG_VERSION")),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &token)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build a configuration from the process environment.
    ///
    /// Unset variables keep their defaults. A page size that does not parse
    /// is an error rather than silently ignored.
    pub fn from_env() -> ProviderResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ProviderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        if let Some(token) = lookup(TOKEN_ENV) {
            config.token = token;
        }
        if let Some(raw) = lookup(PAGE_SIZE_ENV) {
            config.page_size = raw.trim().parse().map_err(|_| {
                ProviderError::configuration(
                    format!("page size '{}' is not a number", raw),
                    Some(PAGE_SIZE_ENV),
                )
            })?;
        }

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ProviderResult<()> {
        if self.endpoint.is_empty() {
            return Err(ProviderError::configuration(
                "endpoint cannot be empty",
                Some("endpoint"),
            ));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ProviderError::configuration(
                "endpoint must start with http:// or https://",
                Some("endpoint"),
            ));
        }

        if self.token.trim().is_empty() {
            return Err(ProviderError::configuration(
                "API token is required",
                Some("token"),
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ProviderError::configuration(
                format!("page size must be between 1 and {}", MAX_PAGE_SIZE),
                Some("page_size"),
            ));
        }

        Ok(())
    }

    /// Endpoint with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_need_a_token() {
        let config = ProviderConfig::default();
        assert_eq!(config.page_size, 100);
        assert!(config.user_agent.starts_with("access-provider/"));

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Configuration { parameter: Some(ref p), .. } if p == "token"
        ));
    }

    #[test]
    fn test_from_lookup_reads_variables() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENDPOINT_ENV, "https://access.internal/"),
            (TOKEN_ENV, "secret"),
            (PAGE_SIZE_ENV, "25"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "https://access.internal");
        assert_eq!(config.authorization_header(), "Bearer secret");
        assert_eq!(config.page_size, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_page_size_is_rejected() {
        let err = ProviderConfig::from_lookup(lookup(&[(PAGE_SIZE_ENV, "lots")])).unwrap_err();
        assert!(err.to_string().contains("lots"));

        let config = ProviderConfig::new().with_token("t").with_page_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_scheme_is_checked() {
        let config = ProviderConfig::new()
            .with_token("t")
            .with_endpoint("ftp://access.internal");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig::new().with_token("super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
