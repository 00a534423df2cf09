//! Lifecycle handlers for managed resources.
//!
//! Each handler maps the host's create/read/update/delete/import requests onto
//! [`AccessApi`](crate::api::AccessApi) calls and converts the answers into
//! state models. Handlers hold the API client behind an `Arc`, so any number of
//! them can share one client.
//!
//! # Not-found handling
//!
//! * `read` answers `Ok(None)` when the object is gone, which tells the host
//!   to drop it from state.
//! * `delete` treats an object that is already gone as deleted.
//! * `import` and `update` report not-found as an error.
//!
//! # Example Usage
//!
//! ```rust
//! use access_provider::api::InMemoryAccessApi;
//! use access_provider::resources::{AccessScopeResource, ManagedResource};
//! use access_provider::state::AccessScopeModel;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resource = AccessScopeResource::new(Arc::new(InMemoryAccessApi::new()));
//!
//! let created = resource
//!     .create(&AccessScopeModel::planned("prod buckets", "type = 'aws-s3-bucket'"))
//!     .await?;
//!
//! resource.delete(&created.id).await?;
//! assert!(resource.read(&created.id).await?.is_none());
//! # Ok(())
//! # }
//! ```

pub mod access_flow;
pub mod access_scope;
pub mod bundle;
pub mod group;
pub mod integration;

pub use access_flow::AccessFlowResource;
pub use access_scope::AccessScopeResource;
pub use bundle::BundleResource;
pub use group::GroupResource;
pub use integration::IntegrationResource;

use crate::error::{ProviderError, ProviderResult};
use crate::state::AccessTarget;
use log::{debug, warn};
use std::future::Future;

/// Lifecycle operations the host drives for one resource type.
pub trait ManagedResource: Send + Sync {
    /// Type name the host addresses this resource by.
    const TYPE_NAME: &'static str;

    /// State model persisted by the host.
    type Model: Send;

    /// Check a plan before any API call is made.
    fn validate(plan: &Self::Model) -> ProviderResult<()>;

    /// Create the object described by `plan` and return its state.
    fn create(&self, plan: &Self::Model)
    -> impl Future<Output = ProviderResult<Self::Model>> + Send;

    /// Fetch the current state of `id`. Not-found is an error.
    fn import(&self, id: &str) -> impl Future<Output = ProviderResult<Self::Model>> + Send;

    /// Replace the object `id` with `plan` and return its new state.
    fn update(
        &self,
        id: &str,
        plan: &Self::Model,
    ) -> impl Future<Output = ProviderResult<Self::Model>> + Send;

    /// Delete the object `id`. An object that is already gone counts as deleted.
    fn delete(&self, id: &str) -> impl Future<Output = ProviderResult<()>> + Send;

    /// Refresh the state of `id`, answering `None` when it no longer exists.
    fn read(&self, id: &str) -> impl Future<Output = ProviderResult<Option<Self::Model>>> + Send {
        async move {
            match self.import(id).await {
                Ok(model) => Ok(Some(model)),
                Err(e) if e.is_not_found() => {
                    warn!(
                        "{} '{}' no longer exists, removing it from state",
                        Self::TYPE_NAME,
                        id
                    );
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Turn a not-found answer to a delete call into success.
pub(crate) fn deleted(result: ProviderResult<()>, type_name: &str, id: &str) -> ProviderResult<()> {
    match result {
        Err(e) if e.is_not_found() => {
            debug!("{} '{}' was already deleted", type_name, id);
            Ok(())
        }
        other => other,
    }
}

pub(crate) fn require_name(resource_type: &'static str, name: &str) -> ProviderResult<()> {
    if name.trim().is_empty() {
        return Err(ProviderError::invalid_plan(resource_type, "name must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_targets(
    resource_type: &'static str,
    targets: &[AccessTarget],
) -> ProviderResult<()> {
    if targets.is_empty() {
        return Err(ProviderError::invalid_plan(
            resource_type,
            "at least one access target is required",
        ));
    }
    if let Some(target) = targets.iter().find(|t| t.referenced_id().is_empty()) {
        return Err(ProviderError::invalid_plan(
            resource_type,
            format!("{} target is missing its id", target.kind()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_deleted_swallows_not_found_only() {
        let gone = Err(ProviderError::api(
            "delete bundle",
            "b-1",
            ApiError::not_found("bundle", "b-1"),
        ));
        assert!(deleted(gone, "access_bundle", "b-1").is_ok());

        let failed = Err(ProviderError::api(
            "delete bundle",
            "b-1",
            ApiError::remote(500, "boom"),
        ));
        assert!(deleted(failed, "access_bundle", "b-1").is_err());
    }

    #[test]
    fn test_require_targets() {
        assert!(require_targets("access_bundle", &[]).is_err());
        assert!(require_targets("access_bundle", &[AccessTarget::bundle("")]).is_err());
        assert!(require_targets("access_bundle", &[AccessTarget::bundle("b-1")]).is_ok());
    }

    #[test]
    fn test_require_name() {
        let err = require_name("access_group", "  ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid access_group configuration: name must not be empty"
        );
    }
}
