//! Group resource: a named group and its complete member list.

use crate::api::{AccessApi, listing};
use crate::error::{ApiResultExt, ProviderResult};
use crate::models::Group;
use crate::resources::{ManagedResource, deleted, require_name};
use crate::state::GroupModel;
use log::{debug, info};
use std::sync::Arc;

/// Lifecycle handler for `access_group`.
pub struct GroupResource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> GroupResource<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Members are listed separately, so every state refresh walks their pages.
    async fn with_members(&self, group: Group) -> ProviderResult<GroupModel> {
        let members = listing::list_group_members(self.api.as_ref(), &group.id).await?;
        debug!(
            "Group '{}' ({}) has {} member(s)",
            group.name,
            group.id,
            members.len()
        );
        Ok(GroupModel::from_wire(group, members))
    }
}

impl<A: AccessApi> ManagedResource for GroupResource<A> {
    const TYPE_NAME: &'static str = "access_group";
    type Model = GroupModel;

    fn validate(plan: &GroupModel) -> ProviderResult<()> {
        require_name(Self::TYPE_NAME, &plan.name)
    }

    async fn create(&self, plan: &GroupModel) -> ProviderResult<GroupModel> {
        Self::validate(plan)?;
        info!(
            "Creating group '{}' with {} member(s)",
            plan.name,
            plan.members.len()
        );
        let group = self
            .api
            .create_group(plan.to_request())
            .await
            .context("create group", &plan.name)?;
        self.with_members(group).await
    }

    async fn import(&self, id: &str) -> ProviderResult<GroupModel> {
        let group = self.api.get_group(id).await.context("read group", id)?;
        self.with_members(group).await
    }

    async fn update(&self, id: &str, plan: &GroupModel) -> ProviderResult<GroupModel> {
        Self::validate(plan)?;
        info!("Updating group '{}' ({})", plan.name, id);
        let group = self
            .api
            .update_group(id, plan.to_request())
            .await
            .context("update group", id)?;
        self.with_members(group).await
    }

    async fn delete(&self, id: &str) -> ProviderResult<()> {
        info!("Deleting group {}", id);
        let result = self.api.delete_group(id).await.context("delete group", id);
        deleted(result, Self::TYPE_NAME, id)
    }
}
