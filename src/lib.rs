//! Data layer of an infrastructure-as-code provider for an access-management
//! service.
//!
//! Provides type-safe, async-first lifecycle handlers and data sources for
//! groups, access scopes, bundles, integrations and access flows, on top of a
//! pluggable API client.
//!
//! # Core Components
//!
//! - [`pagination::fetch_all`] - Walks every page of a list endpoint and sorts the result
//! - [`AccessApi`] - Trait the API client implements
//! - [`AccessTarget`] - Access targets as a sum type
//! - [`Tristate`] - Optional fields that distinguish "absent" from "null"
//! - [`AccessProvider`] - Configured entry point handing out handlers
//!
//! # Quick Start
//!
//! ```rust
//! use access_provider::{AccessProvider, ProviderConfig};
//! use access_provider::api::InMemoryAccessApi;
//! use access_provider::resources::ManagedResource;
//! use access_provider::state::GroupModel;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = InMemoryAccessApi::new();
//! api.add_user("jane@example.com", Some("Jane"), Some("Doe")).await;
//!
//! let config = ProviderConfig::new().with_token("token");
//! let provider = AccessProvider::configure(config, api)?;
//!
//! let group = provider
//!     .groups()
//!     .create(&GroupModel::planned("on-call", vec!["jane@example.com".to_string()]))
//!     .await?;
//! assert_eq!(group.members, vec!["jane@example.com"]);
//!
//! let groups = provider.groups_data_source().read(Some("call")).await?;
//! assert_eq!(groups.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod models;
pub mod pagination;
pub mod provider;
pub mod resources;
pub mod state;
pub mod tristate;

// Re-export commonly used types for convenience
pub use api::{AccessApi, ApiError, InMemoryAccessApi};
pub use config::ProviderConfig;
pub use error::{ConversionError, ProviderError, ProviderResult};
pub use pagination::{CollectionQuery, Page, fetch_all};
pub use provider::AccessProvider;
pub use resources::ManagedResource;
pub use state::AccessTarget;
pub use tristate::Tristate;
