//! Fully materialised, deterministically ordered listings per resource kind.
//!
//! Each function is an instantiation of [`fetch_all`] that fixes the item type,
//! the list call and the sort key. Failures carry the name filter (or group id)
//! that was being listed.

use crate::api::AccessApi;
use crate::error::{ApiResultExt, ProviderResult};
use crate::models::{AccessScope, Bundle, Group, GroupMember, Integration};
use crate::pagination::fetch_all;

fn describe_filter(name: Option<&str>) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => format!("name={}", name),
        None => "all".to_string(),
    }
}

/// All access scopes matching `name`, ordered by name.
pub async fn list_access_scopes<A: AccessApi>(
    api: &A,
    name: Option<&str>,
) -> ProviderResult<Vec<AccessScope>> {
    fetch_all(name, |q| api.list_access_scopes(q), |s: &AccessScope| s.name.as_str())
        .await
        .context("list access scopes", &describe_filter(name))
}

/// All bundles matching `name`, ordered by name.
pub async fn list_bundles<A: AccessApi>(api: &A, name: Option<&str>) -> ProviderResult<Vec<Bundle>> {
    fetch_all(name, |q| api.list_bundles(q), |b: &Bundle| b.name.as_str())
        .await
        .context("list bundles", &describe_filter(name))
}

/// All groups matching `name`, ordered by name.
pub async fn list_groups<A: AccessApi>(api: &A, name: Option<&str>) -> ProviderResult<Vec<Group>> {
    fetch_all(name, |q| api.list_groups(q), |g: &Group| g.name.as_str())
        .await
        .context("list groups", &describe_filter(name))
}

/// All members of a group, ordered by email.
pub async fn list_group_members<A: AccessApi>(
    api: &A,
    group_id: &str,
) -> ProviderResult<Vec<GroupMember>> {
    fetch_all(
        None,
        |q| api.list_group_members(group_id, q),
        |m: &GroupMember| m.email.as_str(),
    )
    .await
    .context("list members of group", group_id)
}

/// All integrations matching `name`, ordered by name.
pub async fn list_integrations<A: AccessApi>(
    api: &A,
    name: Option<&str>,
) -> ProviderResult<Vec<Integration>> {
    fetch_all(name, |q| api.list_integrations(q), |i: &Integration| i.name.as_str())
        .await
        .context("list integrations", &describe_filter(name))
}
