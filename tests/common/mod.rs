//! Common test utilities for the provider test suites.
//!
//! Fixtures build an [`InMemoryAccessApi`] with a small page size so that even
//! modest collections span several pages.

#![allow(dead_code)]

use access_provider::api::{AccessApi, InMemoryAccessApi};
use access_provider::models::{Group, UpsertAccessScope, UpsertGroup, UpsertIntegration};
use access_provider::{ProviderConfig, Tristate};
use std::collections::BTreeMap;

pub mod fixtures;

/// Page size used by most fixtures.
pub const SMALL_PAGE: usize = 2;

/// Initialise logging once per test binary. Set `RUST_LOG` to see output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A configuration that passes validation.
pub fn test_config() -> ProviderConfig {
    ProviderConfig::new()
        .with_endpoint("https://access.test")
        .with_token("test-token")
        .with_page_size(SMALL_PAGE)
}

/// An empty API serving `page_size` items per page.
pub fn api(page_size: usize) -> InMemoryAccessApi {
    init_logging();
    InMemoryAccessApi::new().with_page_size(page_size)
}

/// Register users by email, returning their ids in the same order.
pub async fn add_users(api: &InMemoryAccessApi, emails: &[&str]) -> Vec<String> {
    let mut ids = Vec::with_capacity(emails.len());
    for email in emails {
        ids.push(api.add_user(email, None, None).await);
    }
    ids
}

/// Create one group per name, in the given order, with no members.
pub async fn seed_groups(api: &InMemoryAccessApi, names: &[&str]) -> Vec<Group> {
    let mut groups = Vec::with_capacity(names.len());
    for name in names {
        let group = api
            .create_group(UpsertGroup {
                name: name.to_string(),
                members_emails: Vec::new(),
            })
            .await
            .expect("Failed to seed group");
        groups.push(group);
    }
    groups
}

/// Create one access scope per name.
pub async fn seed_access_scopes(api: &InMemoryAccessApi, names: &[&str]) {
    for name in names {
        api.create_access_scope(UpsertAccessScope {
            name: name.to_string(),
            query: format!("name = '{}'", name),
        })
        .await
        .expect("Failed to seed access scope");
    }
}

/// Create an integration of `integration_type` connecting `resource_types`.
pub async fn seed_integration(
    api: &InMemoryAccessApi,
    name: &str,
    integration_type: &str,
    resource_types: &[&str],
) -> String {
    api.create_integration(UpsertIntegration {
        name: name.to_string(),
        integration_type: integration_type.to_string(),
        connector_id: Tristate::Unset,
        connected_resource_types: resource_types.iter().map(|s| s.to_string()).collect(),
        metadata: BTreeMap::new(),
        custom_access_details: Tristate::Unset,
        user_cleanup_period_in_days: Tristate::Unset,
    })
    .await
    .expect("Failed to seed integration")
    .id
}

/// Names of the given items, in order.
pub fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|item| name(item).to_string()).collect()
}
