use crate::api::AccessApi;
use crate::error::{ApiResultExt, ProviderError, ProviderResult};
use crate::resources::{ManagedResource, deleted, require_name};
use crate::state::AccessScopeModel;
use log::info;
use std::sync::Arc;

/// Lifecycle handler for `access_scope`.
pub struct AccessScopeResource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> AccessScopeResource<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: AccessApi> ManagedResource for AccessScopeResource<A> {
    const TYPE_NAME: &'static str = "access_scope";
    type Model = AccessScopeModel;

    fn validate(plan: &AccessScopeModel) -> ProviderResult<()> {
        require_name(Self::TYPE_NAME, &plan.name)?;
        if plan.query.trim().is_empty() {
            return Err(ProviderError::invalid_plan(
                Self::TYPE_NAME,
                "query must not be empty",
            ));
        }
        Ok(())
    }

    async fn create(&self, plan: &AccessScopeModel) -> ProviderResult<AccessScopeModel> {
        Self::validate(plan)?;
        info!("Creating access scope '{}'", plan.name);
        let scope = self
            .api
            .create_access_scope(plan.to_request())
            .await
            .context("create access scope", &plan.name)?;
        Ok(scope.into())
    }

    async fn import(&self, id: &str) -> ProviderResult<AccessScopeModel> {
        let scope = self
            .api
            .get_access_scope(id)
            .await
            .context("read access scope", id)?;
        Ok(scope.into())
    }

    async fn update(&self, id: &str, plan: &AccessScopeModel) -> ProviderResult<AccessScopeModel> {
        Self::validate(plan)?;
        info!("Updating access scope '{}' ({})", plan.name, id);
        let scope = self
            .api
            .update_access_scope(id, plan.to_request())
            .await
            .context("update access scope", id)?;
        Ok(scope.into())
    }

    async fn delete(&self, id: &str) -> ProviderResult<()> {
        info!("Deleting access scope {}", id);
        let result = self
            .api
            .delete_access_scope(id)
            .await
            .context("delete access scope", id);
        deleted(result, Self::TYPE_NAME, id)
    }
}
