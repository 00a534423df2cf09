//! Contract with the access-management API client.
//!
//! The provider does not own an HTTP stack. Whatever client the host wires in
//! implements [`AccessApi`]: one list call per resource kind answering a single
//! [`Page`], plus get/create/update/delete per kind. Everything above this
//! trait (pagination, conversion, lifecycle handling) is client-agnostic.
//!
//! # Architecture
//!
//! The API layer is responsible for:
//! - One request/response round trip per call
//! - Reporting missing objects as [`ApiError::NotFound`]
//! - Honouring the name filter and continuation token of a [`CollectionQuery`]
//!
//! The API layer is NOT responsible for:
//! - Walking pages ([`crate::pagination::fetch_all`] does that)
//! - Ordering results
//! - Validating access target shapes or tri-state semantics
//!
//! # Example Usage
//!
//! ```rust
//! use access_provider::api::{AccessApi, InMemoryAccessApi, listing};
//! use access_provider::models::UpsertGroup;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = InMemoryAccessApi::new().with_page_size(2);
//! api.add_user("jane@example.com", Some("Jane"), None).await;
//!
//! for name in ["ops", "dev", "admins"] {
//!     api.create_group(UpsertGroup {
//!         name: name.to_string(),
//!         members_emails: vec!["jane@example.com".to_string()],
//!     })
//!     .await?;
//! }
//!
//! let groups = listing::list_groups(&api, None).await?;
//! let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
//! assert_eq!(names, vec!["admins", "dev", "ops"]);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod listing;

pub use errors::ApiError;
pub use in_memory::{InMemoryAccessApi, RecordKind};

use crate::models::{
    AccessFlow, AccessScope, Bundle, Group, GroupMember, Integration, UpsertAccessFlow,
    UpsertAccessScope, UpsertBundle, UpsertGroup, UpsertIntegration,
};
use crate::pagination::{CollectionQuery, Page};
use std::future::Future;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Operations the provider expects from an access-management API client.
///
/// Each method is a single round trip. List methods answer one page for the
/// given query; implementations must apply the query's name filter on every
/// page, continuation token or not.
pub trait AccessApi: Send + Sync {
    // Groups

    /// List one page of groups.
    fn list_groups(
        &self,
        query: CollectionQuery,
    ) -> impl Future<Output = ApiResult<Page<Group>>> + Send;

    /// Fetch a group by id.
    fn get_group(&self, id: &str) -> impl Future<Output = ApiResult<Group>> + Send;

    /// Create a group with an initial member list.
    fn create_group(&self, request: UpsertGroup) -> impl Future<Output = ApiResult<Group>> + Send;

    /// Replace a group's name and member list.
    fn update_group(
        &self,
        id: &str,
        request: UpsertGroup,
    ) -> impl Future<Output = ApiResult<Group>> + Send;

    /// Delete a group.
    fn delete_group(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    /// List one page of a group's members. The name filter does not apply.
    fn list_group_members(
        &self,
        group_id: &str,
        query: CollectionQuery,
    ) -> impl Future<Output = ApiResult<Page<GroupMember>>> + Send;

    // Access scopes

    /// List one page of access scopes.
    fn list_access_scopes(
        &self,
        query: CollectionQuery,
    ) -> impl Future<Output = ApiResult<Page<AccessScope>>> + Send;

    /// Fetch an access scope by id.
    fn get_access_scope(&self, id: &str) -> impl Future<Output = ApiResult<AccessScope>> + Send;

    /// Create an access scope.
    fn create_access_scope(
        &self,
        request: UpsertAccessScope,
    ) -> impl Future<Output = ApiResult<AccessScope>> + Send;

    /// Replace an access scope.
    fn update_access_scope(
        &self,
        id: &str,
        request: UpsertAccessScope,
    ) -> impl Future<Output = ApiResult<AccessScope>> + Send;

    /// Delete an access scope.
    fn delete_access_scope(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    // Bundles

    /// List one page of bundles.
    fn list_bundles(
        &self,
        query: CollectionQuery,
    ) -> impl Future<Output = ApiResult<Page<Bundle>>> + Send;

    /// Fetch a bundle by id.
    fn get_bundle(&self, id: &str) -> impl Future<Output = ApiResult<Bundle>> + Send;

    /// Create a bundle.
    fn create_bundle(&self, request: UpsertBundle)
    -> impl Future<Output = ApiResult<Bundle>> + Send;

    /// Replace a bundle.
    fn update_bundle(
        &self,
        id: &str,
        request: UpsertBundle,
    ) -> impl Future<Output = ApiResult<Bundle>> + Send;

    /// Delete a bundle.
    fn delete_bundle(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    // Integrations

    /// List one page of integrations.
    fn list_integrations(
        &self,
        query: CollectionQuery,
    ) -> impl Future<Output = ApiResult<Page<Integration>>> + Send;

    /// Fetch an integration by id.
    fn get_integration(&self, id: &str) -> impl Future<Output = ApiResult<Integration>> + Send;

    /// Create an integration.
    fn create_integration(
        &self,
        request: UpsertIntegration,
    ) -> impl Future<Output = ApiResult<Integration>> + Send;

    /// Update an integration. Unset tri-state fields keep their current value.
    fn update_integration(
        &self,
        id: &str,
        request: UpsertIntegration,
    ) -> impl Future<Output = ApiResult<Integration>> + Send;

    /// Delete an integration.
    fn delete_integration(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;

    // Access flows

    /// Fetch an access flow by id.
    fn get_access_flow(&self, id: &str) -> impl Future<Output = ApiResult<AccessFlow>> + Send;

    /// Create an access flow.
    fn create_access_flow(
        &self,
        request: UpsertAccessFlow,
    ) -> impl Future<Output = ApiResult<AccessFlow>> + Send;

    /// Update an access flow. Unset tri-state fields keep their current value.
    fn update_access_flow(
        &self,
        id: &str,
        request: UpsertAccessFlow,
    ) -> impl Future<Output = ApiResult<AccessFlow>> + Send;

    /// Delete an access flow.
    fn delete_access_flow(&self, id: &str) -> impl Future<Output = ApiResult<()>> + Send;
}
