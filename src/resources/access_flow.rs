//! Access flow resource.
//!
//! Access flows are the only resource whose plan references other objects by
//! id on both sides: grantees (users and groups) and access targets. Neither
//! side may be empty.

use crate::api::AccessApi;
use crate::error::{ApiResultExt, ProviderError, ProviderResult};
use crate::resources::{ManagedResource, deleted, require_name, require_targets};
use crate::state::AccessFlowModel;
use log::info;
use std::sync::Arc;

/// Lifecycle handler for `access_flow`.
pub struct AccessFlowResource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> AccessFlowResource<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A: AccessApi> ManagedResource for AccessFlowResource<A> {
    const TYPE_NAME: &'static str = "access_flow";
    type Model = AccessFlowModel;

    fn validate(plan: &AccessFlowModel) -> ProviderResult<()> {
        require_name(Self::TYPE_NAME, &plan.name)?;
        if plan.grantees.is_empty() {
            return Err(ProviderError::invalid_plan(
                Self::TYPE_NAME,
                "at least one grantee is required",
            ));
        }
        if plan.grantees.iter().any(|g| g.id.is_empty()) {
            return Err(ProviderError::invalid_plan(
                Self::TYPE_NAME,
                "grantee is missing its id",
            ));
        }
        if plan
            .approver_policy
            .as_ref()
            .is_some_and(|policy| policy.approvers.is_empty())
        {
            return Err(ProviderError::invalid_plan(
                Self::TYPE_NAME,
                "approver policy needs at least one approver",
            ));
        }
        require_targets(Self::TYPE_NAME, &plan.access_targets)
    }

    async fn create(&self, plan: &AccessFlowModel) -> ProviderResult<AccessFlowModel> {
        Self::validate(plan)?;
        info!(
            "Creating {} access flow '{}' for {} grantee(s)",
            plan.trigger,
            plan.name,
            plan.grantees.len()
        );
        let flow = self
            .api
            .create_access_flow(plan.to_create_request())
            .await
            .context("create access flow", &plan.name)?;
        Ok(AccessFlowModel::try_from(flow)?)
    }

    async fn import(&self, id: &str) -> ProviderResult<AccessFlowModel> {
        let flow = self
            .api
            .get_access_flow(id)
            .await
            .context("read access flow", id)?;
        Ok(AccessFlowModel::try_from(flow)?)
    }

    async fn update(&self, id: &str, plan: &AccessFlowModel) -> ProviderResult<AccessFlowModel> {
        Self::validate(plan)?;
        info!("Updating access flow '{}' ({})", plan.name, id);
        let flow = self
            .api
            .update_access_flow(id, plan.to_update_request())
            .await
            .context("update access flow", id)?;
        Ok(AccessFlowModel::try_from(flow)?)
    }

    async fn delete(&self, id: &str) -> ProviderResult<()> {
        info!("Deleting access flow {}", id);
        let result = self
            .api
            .delete_access_flow(id)
            .await
            .context("delete access flow", id);
        deleted(result, Self::TYPE_NAME, id)
    }
}
