//! Read-only data sources.
//!
//! A data source answers with the complete, name-ordered collection matching
//! an optional name filter. The ordering comes from the listing helpers, so
//! repeated reads of an unchanged collection produce identical state.

use crate::api::{AccessApi, listing};
use crate::error::ProviderResult;
use crate::state::{
    AccessScopeModel, BundleModel, GroupMemberModel, GroupSummary, IntegrationModel,
};
use log::debug;
use std::sync::Arc;

/// `access_groups`: groups by name, plus the members of a single group.
pub struct GroupsDataSource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> GroupsDataSource<A> {
    pub const TYPE_NAME: &'static str = "access_groups";

    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn read(&self, name: Option<&str>) -> ProviderResult<Vec<GroupSummary>> {
        let groups = listing::list_groups(self.api.as_ref(), name).await?;
        Ok(groups.into_iter().map(GroupSummary::from).collect())
    }

    /// Members of `group_id`, ordered by email.
    pub async fn members(&self, group_id: &str) -> ProviderResult<Vec<GroupMemberModel>> {
        let members = listing::list_group_members(self.api.as_ref(), group_id).await?;
        Ok(members.into_iter().map(GroupMemberModel::from).collect())
    }
}

/// `access_scopes`
pub struct AccessScopesDataSource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> AccessScopesDataSource<A> {
    pub const TYPE_NAME: &'static str = "access_scopes";

    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn read(&self, name: Option<&str>) -> ProviderResult<Vec<AccessScopeModel>> {
        let scopes = listing::list_access_scopes(self.api.as_ref(), name).await?;
        Ok(scopes.into_iter().map(AccessScopeModel::from).collect())
    }
}

/// `access_bundles`
///
/// Fails as a whole when any bundle carries a malformed access target.
pub struct BundlesDataSource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> BundlesDataSource<A> {
    pub const TYPE_NAME: &'static str = "access_bundles";

    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn read(&self, name: Option<&str>) -> ProviderResult<Vec<BundleModel>> {
        let bundles = listing::list_bundles(self.api.as_ref(), name).await?;
        let models = bundles
            .into_iter()
            .map(BundleModel::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(models)
    }
}

/// Filters accepted by the integrations data source.
///
/// Only `name` is applied by the server; the rest narrow the fetched list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationsQuery {
    pub name: Option<String>,
    /// Keep integrations of this type only
    pub integration_type: Option<String>,
    /// Keep integrations connecting at least one of these resource types
    pub resource_types: Vec<String>,
}

impl IntegrationsQuery {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, integration_type: impl Into<String>) -> Self {
        self.integration_type = Some(integration_type.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_types.push(resource_type.into());
        self
    }

    fn matches(&self, integration: &IntegrationModel) -> bool {
        let type_matches = self
            .integration_type
            .as_deref()
            .is_none_or(|t| integration.integration_type == t);
        let resource_matches = self.resource_types.is_empty()
            || integration
                .connected_resource_types
                .iter()
                .any(|rt| self.resource_types.contains(rt));
        type_matches && resource_matches
    }
}

/// `access_integrations`
pub struct IntegrationsDataSource<A> {
    api: Arc<A>,
}

impl<A: AccessApi> IntegrationsDataSource<A> {
    pub const TYPE_NAME: &'static str = "access_integrations";

    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn read(&self, query: &IntegrationsQuery) -> ProviderResult<Vec<IntegrationModel>> {
        let integrations =
            listing::list_integrations(self.api.as_ref(), query.name.as_deref()).await?;
        let fetched = integrations.len();

        let mut models = Vec::with_capacity(fetched);
        for integration in integrations {
            let model = IntegrationModel::try_from(integration)?;
            if query.matches(&model) {
                models.push(model);
            }
        }

        debug!(
            "Kept {} of {} integration(s) (type: {:?}, resource types: {:?})",
            models.len(),
            fetched,
            query.integration_type,
            query.resource_types
        );
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration(integration_type: &str, resource_types: &[&str]) -> IntegrationModel {
        let mut model = IntegrationModel::planned("x", integration_type);
        model.connected_resource_types = resource_types.iter().map(|s| s.to_string()).collect();
        model
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = IntegrationsQuery::default();
        assert!(query.matches(&integration("aws", &[])));
    }

    #[test]
    fn test_type_and_resource_filters_combine() {
        let query = IntegrationsQuery::default()
            .with_type("aws")
            .with_resource_type("aws-s3-bucket");

        assert!(query.matches(&integration("aws", &["aws-iam-role", "aws-s3-bucket"])));
        assert!(!query.matches(&integration("aws", &["aws-iam-role"])));
        assert!(!query.matches(&integration("gcp", &["aws-s3-bucket"])));
    }
}
