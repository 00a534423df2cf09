//! Provider entry point.
//!
//! [`AccessProvider`] is what the host talks to after configuration: it owns
//! the validated [`ProviderConfig`] and the shared API client, and hands out
//! resource and data source handlers bound to that client.

use crate::api::AccessApi;
use crate::config::ProviderConfig;
use crate::data_sources::{
    AccessScopesDataSource, BundlesDataSource, GroupsDataSource, IntegrationsDataSource,
};
use crate::error::ProviderResult;
use crate::resources::{
    AccessFlowResource, AccessScopeResource, BundleResource, GroupResource, IntegrationResource,
    ManagedResource,
};
use log::info;
use std::sync::Arc;

/// A configured provider sharing one API client across all handlers.
pub struct AccessProvider<A> {
    config: ProviderConfig,
    api: Arc<A>,
}

impl<A: AccessApi> AccessProvider<A> {
    /// Validate `config` and bind the provider to `api`.
    pub fn configure(config: ProviderConfig, api: A) -> ProviderResult<Self> {
        Self::configure_shared(config, Arc::new(api))
    }

    /// Like [`configure`](Self::configure), for a client that is already shared.
    pub fn configure_shared(config: ProviderConfig, api: Arc<A>) -> ProviderResult<Self> {
        config.validate()?;
        info!(
            "Configured access provider for {} (page size {})",
            config.base_url(),
            config.page_size
        );
        Ok(Self { config, api })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Type names of every managed resource.
    pub fn resource_types() -> Vec<&'static str> {
        vec![
            GroupResource::<A>::TYPE_NAME,
            AccessScopeResource::<A>::TYPE_NAME,
            BundleResource::<A>::TYPE_NAME,
            IntegrationResource::<A>::TYPE_NAME,
            AccessFlowResource::<A>::TYPE_NAME,
        ]
    }

    /// Type names of every data source.
    pub fn data_source_types() -> Vec<&'static str> {
        vec![
            GroupsDataSource::<A>::TYPE_NAME,
            AccessScopesDataSource::<A>::TYPE_NAME,
            BundlesDataSource::<A>::TYPE_NAME,
            IntegrationsDataSource::<A>::TYPE_NAME,
        ]
    }

    pub fn groups(&self) -> GroupResource<A> {
        GroupResource::new(Arc::clone(&self.api))
    }

    pub fn access_scopes(&self) -> AccessScopeResource<A> {
        AccessScopeResource::new(Arc::clone(&self.api))
    }

    pub fn bundles(&self) -> BundleResource<A> {
        BundleResource::new(Arc::clone(&self.api))
    }

    pub fn integrations(&self) -> IntegrationResource<A> {
        IntegrationResource::new(Arc::clone(&self.api))
    }

    pub fn access_flows(&self) -> AccessFlowResource<A> {
        AccessFlowResource::new(Arc::clone(&self.api))
    }

    pub fn groups_data_source(&self) -> GroupsDataSource<A> {
        GroupsDataSource::new(Arc::clone(&self.api))
    }

    pub fn access_scopes_data_source(&self) -> AccessScopesDataSource<A> {
        AccessScopesDataSource::new(Arc::clone(&self.api))
    }

    pub fn bundles_data_source(&self) -> BundlesDataSource<A> {
        BundlesDataSource::new(Arc::clone(&self.api))
    }

    pub fn integrations_data_source(&self) -> IntegrationsDataSource<A> {
        IntegrationsDataSource::new(Arc::clone(&self.api))
    }
}
