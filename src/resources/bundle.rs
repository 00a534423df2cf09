use crate::api::AccessApi;
use crate::error::{ApiResultExt, ProviderResult};
use crate::resources::{ManagedResource, deleted, require_name, require_targets};
use crate::state::BundleModel;
use log::info;
use std::sync::Arc;

/// Lifecycle handler for `access_bundle`.
pub struct BundleResource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> BundleResource<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: AccessApi> ManagedResource for BundleResource<A> {
    const TYPE_NAME: &'static str = "access_bundle";
    type Model = BundleModel;

    fn validate(plan: &BundleModel) -> ProviderResult<()> {
        require_name(Self::TYPE_NAME, &plan.name)?;
        require_targets(Self::TYPE_NAME, &plan.access_targets)
    }

    async fn create(&self, plan: &BundleModel) -> ProviderResult<BundleModel> {
        Self::validate(plan)?;
        info!(
            "Creating bundle '{}' with {} target(s)",
            plan.name,
            plan.access_targets.len()
        );
        let bundle = self
            .api
            .create_bundle(plan.to_request())
            .await
            .context("create bundle", &plan.name)?;
        Ok(BundleModel::try_from(bundle)?)
    }

    async fn import(&self, id: &str) -> ProviderResult<BundleModel> {
        let bundle = self.api.get_bundle(id).await.context("read bundle", id)?;
        Ok(BundleModel::try_from(bundle)?)
    }

    async fn update(&self, id: &str, plan: &BundleModel) -> ProviderResult<BundleModel> {
        Self::validate(plan)?;
        info!("Updating bundle '{}' ({})", plan.name, id);
        let bundle = self
            .api
            .update_bundle(id, plan.to_request())
            .await
            .context("update bundle", id)?;
        Ok(BundleModel::try_from(bundle)?)
    }

    async fn delete(&self, id: &str) -> ProviderResult<()> {
        info!("Deleting bundle {}", id);
        let result = self.api.delete_bundle(id).await.context("delete bundle", id);
        deleted(result, Self::TYPE_NAME, id)
    }
}
