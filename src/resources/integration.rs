use crate::api::AccessApi;
use crate::error::{ApiResultExt, ProviderError, ProviderResult};
use crate::resources::{ManagedResource, deleted, require_name};
use crate::state::IntegrationModel;
use log::info;
use std::sync::Arc;

/// Lifecycle handler for `access_integration`.
///
/// Updates send explicit nulls for optional attributes that were removed from
/// the plan, so the server forgets them instead of keeping the old value.
pub struct IntegrationResource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> IntegrationResource<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: AccessApi> ManagedResource for IntegrationResource<A> {
    const TYPE_NAME: &'static str = "access_integration";
    type Model = IntegrationModel;

    fn validate(plan: &IntegrationModel) -> ProviderResult<()> {
        require_name(Self::TYPE_NAME, &plan.name)?;
        if plan.integration_type.trim().is_empty() {
            return Err(ProviderError::invalid_plan(
                Self::TYPE_NAME,
                "integration type must not be empty",
            ));
        }
        Ok(())
    }

    async fn create(&self, plan: &IntegrationModel) -> ProviderResult<IntegrationModel> {
        Self::validate(plan)?;
        info!(
            "Creating {} integration '{}'",
            plan.integration_type, plan.name
        );
        let integration = self
            .api
            .create_integration(plan.to_create_request())
            .await
            .context("create integration", &plan.name)?;
        Ok(IntegrationModel::try_from(integration)?)
    }

    async fn import(&self, id: &str) -> ProviderResult<IntegrationModel> {
        let integration = self
            .api
            .get_integration(id)
            .await
            .context("read integration", id)?;
        Ok(IntegrationModel::try_from(integration)?)
    }

    async fn update(&self, id: &str, plan: &IntegrationModel) -> ProviderResult<IntegrationModel> {
        Self::validate(plan)?;
        info!("Updating integration '{}' ({})", plan.name, id);
        let integration = self
            .api
            .update_integration(id, plan.to_update_request())
            .await
            .context("update integration", id)?;
        Ok(IntegrationModel::try_from(integration)?)
    }

    async fn delete(&self, id: &str) -> ProviderResult<()> {
        info!("Deleting integration {}", id);
        let result = self
            .api
            .delete_integration(id)
            .await
            .context("delete integration", id);
        deleted(result, Self::TYPE_NAME, id)
    }
}
