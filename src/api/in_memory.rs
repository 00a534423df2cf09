//! In-memory implementation of the access-management API.
//!
//! This module provides a thread-safe, fully functional stand-in for the
//! remote API. It is what the test suites, benches and demos run against, and
//! a reference for how a real client is expected to behave.
//!
//! # Features
//!
//! * Thread-safe concurrent access with async RwLock
//! * Records stored as JSON, so every read goes through the wire DTOs
//! * Cursor pagination with opaque tokens bound to the query that issued them
//! * Case-insensitive substring name filtering
//! * Tri-state patch semantics on integration and access flow updates
//! * Scheduled failures and per-operation call counters for tests
//!
//! # Pagination
//!
//! Results are ordered by id, which is unrelated to names, so callers cannot
//! rely on server order. A continuation token encodes the offset of the next
//! page together with a digest of the collection and name filter. Replaying a
//! token with a different filter is rejected with
//! [`ApiError::InvalidPageToken`].

use crate::api::{AccessApi, ApiError, ApiResult};
use crate::models::{
    AccessFlow, AccessScope, Bundle, Group, GroupMember, Integration, UpsertAccessFlow,
    UpsertAccessScope, UpsertBundle, UpsertGroup, UpsertIntegration,
};
use crate::pagination::{CollectionQuery, Page};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Kinds of records held by the in-memory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Group,
    AccessScope,
    Bundle,
    Integration,
    AccessFlow,
}

impl RecordKind {
    /// Name used in error messages and page token scopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Group => "group",
            RecordKind::AccessScope => "access scope",
            RecordKind::Bundle => "bundle",
            RecordKind::Integration => "integration",
            RecordKind::AccessFlow => "access flow",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct ScheduledFailure {
    remaining_successes: usize,
    error: ApiError,
}

#[derive(Debug, Default)]
struct State {
    // kind -> id -> record
    records: HashMap<RecordKind, HashMap<String, Value>>,
    // group id -> member user ids
    memberships: HashMap<String, Vec<String>>,
    // user id -> user
    users: HashMap<String, GroupMember>,
    calls: HashMap<&'static str, usize>,
    failures: HashMap<&'static str, ScheduledFailure>,
}

impl State {
    fn records(&self, kind: RecordKind) -> impl Iterator<Item = (&String, &Value)> {
        self.records.get(&kind).into_iter().flat_map(|r| r.iter())
    }

    fn record(&self, kind: RecordKind, id: &str) -> ApiResult<&Value> {
        self.records
            .get(&kind)
            .and_then(|r| r.get(id))
            .ok_or_else(|| ApiError::not_found(kind.as_str(), id))
    }

    fn put(&mut self, kind: RecordKind, id: &str, record: Value) {
        self.records
            .entry(kind)
            .or_default()
            .insert(id.to_string(), record);
    }

    fn remove(&mut self, kind: RecordKind, id: &str) -> ApiResult<()> {
        self.records
            .get_mut(&kind)
            .and_then(|r| r.remove(id))
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found(kind.as_str(), id))
    }

    fn ensure_unique_name(&self, kind: RecordKind, name: &str, except: Option<&str>) -> ApiResult<()> {
        let taken = self
            .records(kind)
            .filter(|(id, _)| Some(id.as_str()) != except)
            .any(|(_, record)| record_name(record) == Some(name));
        if taken {
            return Err(ApiError::conflict(format!(
                "{} named '{}' already exists",
                kind, name
            )));
        }
        Ok(())
    }

    fn resolve_members(&self, emails: &[String]) -> ApiResult<Vec<String>> {
        let mut ids = Vec::with_capacity(emails.len());
        for email in emails {
            let user = self
                .users
                .values()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .ok_or_else(|| ApiError::invalid_request(format!("unknown user email '{}'", email)))?;
            if !ids.contains(&user.id) {
                ids.push(user.id.clone());
            }
        }
        Ok(ids)
    }
}

/// Thread-safe in-memory access-management API.
#[derive(Clone)]
pub struct InMemoryAccessApi {
    state: Arc<RwLock<State>>,
    page_size: usize,
}

impl InMemoryAccessApi {
    /// Create an empty API with the default page size.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the number of items per page (at least one).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Register a user that groups can reference by email. Returns the user id.
    pub async fn add_user(
        &self,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> String {
        let user = GroupMember {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
        };
        let id = user.id.clone();
        self.state.write().await.users.insert(id.clone(), user);
        id
    }

    /// Store a raw JSON record, bypassing request validation.
    ///
    /// Lets tests reproduce payloads a real server could send but a
    /// well-behaved create call would never produce.
    pub async fn insert_raw(&self, kind: RecordKind, id: &str, record: Value) {
        self.state.write().await.put(kind, id, record);
    }

    /// Remove a record behind the provider's back.
    pub async fn remove_raw(&self, kind: RecordKind, id: &str) -> bool {
        let mut state = self.state.write().await;
        state.memberships.remove(id);
        state.remove(kind, id).is_ok()
    }

    /// Make `operation` succeed `successes` more times, then fail once with `error`.
    ///
    /// Operation names are the [`AccessApi`] method names, e.g. `"list_groups"`.
    pub async fn fail_after(&self, operation: &'static str, successes: usize, error: ApiError) {
        self.state.write().await.failures.insert(
            operation,
            ScheduledFailure {
                remaining_successes: successes,
                error,
            },
        );
    }

    /// Number of times `operation` has been called.
    pub async fn call_count(&self, operation: &str) -> usize {
        self.state
            .read()
            .await
            .calls
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    /// Number of stored records of a kind.
    pub async fn record_count(&self, kind: RecordKind) -> usize {
        self.state.read().await.records(kind).count()
    }

    /// Drop all records, users, counters and scheduled failures.
    pub async fn clear(&self) {
        *self.state.write().await = State::default();
    }

    async fn begin(&self, operation: &'static str) -> ApiResult<()> {
        let mut state = self.state.write().await;
        *state.calls.entry(operation).or_insert(0) += 1;

        if let Some(failure) = state.failures.get_mut(operation) {
            if failure.remaining_successes == 0 {
                if let Some(failure) = state.failures.remove(operation) {
                    debug!("Injected failure for '{}': {}", operation, failure.error);
                    return Err(failure.error);
                }
            } else {
                failure.remaining_successes -= 1;
            }
        }
        Ok(())
    }

    async fn list_named<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        kind: RecordKind,
        query: CollectionQuery,
    ) -> ApiResult<Page<T>> {
        self.begin(operation).await?;
        let state = self.state.read().await;

        let filter = query.name.as_deref().map(str::to_lowercase);
        let mut matching: Vec<(&String, &Value)> = state
            .records(kind)
            .filter(|(_, record)| match (&filter, record_name(record)) {
                (None, _) => true,
                (Some(f), Some(name)) => name.to_lowercase().contains(f.as_str()),
                (Some(_), None) => false,
            })
            .collect();

        // Collect and sort keys for consistent ordering
        matching.sort_by(|a, b| a.0.cmp(b.0));

        let items = matching
            .into_iter()
            .map(|(_, record)| decode(kind, record))
            .collect::<ApiResult<Vec<T>>>()?;

        paginate(kind.as_str(), items, &query, self.page_size)
    }

    async fn get_record<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        kind: RecordKind,
        id: &str,
    ) -> ApiResult<T> {
        self.begin(operation).await?;
        let state = self.state.read().await;
        decode(kind, state.record(kind, id)?)
    }

    async fn delete_record(
        &self,
        operation: &'static str,
        kind: RecordKind,
        id: &str,
    ) -> ApiResult<()> {
        self.begin(operation).await?;
        let mut state = self.state.write().await;
        state.remove(kind, id)?;
        if kind == RecordKind::Group {
            state.memberships.remove(id);
        }
        debug!("Deleted {} '{}'", kind, id);
        Ok(())
    }
}

impl Default for InMemoryAccessApi {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessApi for InMemoryAccessApi {
    async fn list_groups(&self, query: CollectionQuery) -> ApiResult<Page<Group>> {
        self.list_named("list_groups", RecordKind::Group, query).await
    }

    async fn get_group(&self, id: &str) -> ApiResult<Group> {
        self.get_record("get_group", RecordKind::Group, id).await
    }

    async fn create_group(&self, request: UpsertGroup) -> ApiResult<Group> {
        self.begin("create_group").await?;
        require_non_empty("name", &request.name)?;

        let mut state = self.state.write().await;
        state.ensure_unique_name(RecordKind::Group, &request.name, None)?;
        let members = state.resolve_members(&request.members_emails)?;

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: request.name,
        };
        state.put(RecordKind::Group, &group.id, encode(&group)?);
        state.memberships.insert(group.id.clone(), members);

        debug!("Created group '{}' ({})", group.name, group.id);
        Ok(group)
    }

    async fn update_group(&self, id: &str, request: UpsertGroup) -> ApiResult<Group> {
        self.begin("update_group").await?;
        require_non_empty("name", &request.name)?;

        let mut state = self.state.write().await;
        state.record(RecordKind::Group, id)?;
        state.ensure_unique_name(RecordKind::Group, &request.name, Some(id))?;
        let members = state.resolve_members(&request.members_emails)?;

        let group = Group {
            id: id.to_string(),
            name: request.name,
        };
        state.put(RecordKind::Group, id, encode(&group)?);
        state.memberships.insert(id.to_string(), members);
        Ok(group)
    }

    async fn delete_group(&self, id: &str) -> ApiResult<()> {
        self.delete_record("delete_group", RecordKind::Group, id).await
    }

    async fn list_group_members(
        &self,
        group_id: &str,
        query: CollectionQuery,
    ) -> ApiResult<Page<GroupMember>> {
        self.begin("list_group_members").await?;
        let state = self.state.read().await;
        state.record(RecordKind::Group, group_id)?;

        let mut members: Vec<GroupMember> = state
            .memberships
            .get(group_id)
            .into_iter()
            .flatten()
            .filter_map(|user_id| state.users.get(user_id).cloned())
            .collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));

        // Members are not filtered by name.
        let scope = format!("group member/{}", group_id);
        let query = CollectionQuery {
            name: None,
            page_token: query.page_token,
        };
        paginate(&scope, members, &query, self.page_size)
    }

    async fn list_access_scopes(&self, query: CollectionQuery) -> ApiResult<Page<AccessScope>> {
        self.list_named("list_access_scopes", RecordKind::AccessScope, query)
            .await
    }

    async fn get_access_scope(&self, id: &str) -> ApiResult<AccessScope> {
        self.get_record("get_access_scope", RecordKind::AccessScope, id)
            .await
    }

    async fn create_access_scope(&self, request: UpsertAccessScope) -> ApiResult<AccessScope> {
        self.begin("create_access_scope").await?;
        require_non_empty("name", &request.name)?;
        require_non_empty("query", &request.query)?;

        let mut state = self.state.write().await;
        state.ensure_unique_name(RecordKind::AccessScope, &request.name, None)?;

        let now = Utc::now();
        let scope = AccessScope {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            query: request.query,
            creation_date: Some(now),
            update_date: Some(now),
        };
        state.put(RecordKind::AccessScope, &scope.id, encode(&scope)?);

        debug!("Created access scope '{}' ({})", scope.name, scope.id);
        Ok(scope)
    }

    async fn update_access_scope(
        &self,
        id: &str,
        request: UpsertAccessScope,
    ) -> ApiResult<AccessScope> {
        self.begin("update_access_scope").await?;
        require_non_empty("name", &request.name)?;
        require_non_empty("query", &request.query)?;

        let mut state = self.state.write().await;
        let existing: AccessScope = decode(
            RecordKind::AccessScope,
            state.record(RecordKind::AccessScope, id)?,
        )?;
        state.ensure_unique_name(RecordKind::AccessScope, &request.name, Some(id))?;

        let scope = AccessScope {
            id: id.to_string(),
            name: request.name,
            query: request.query,
            creation_date: existing.creation_date,
            update_date: Some(Utc::now()),
        };
        state.put(RecordKind::AccessScope, id, encode(&scope)?);
        Ok(scope)
    }

    async fn delete_access_scope(&self, id: &str) -> ApiResult<()> {
        self.delete_record("delete_access_scope", RecordKind::AccessScope, id)
            .await
    }

    async fn list_bundles(&self, query: CollectionQuery) -> ApiResult<Page<Bundle>> {
        self.list_named("list_bundles", RecordKind::Bundle, query).await
    }

    async fn get_bundle(&self, id: &str) -> ApiResult<Bundle> {
        self.get_record("get_bundle", RecordKind::Bundle, id).await
    }

    async fn create_bundle(&self, request: UpsertBundle) -> ApiResult<Bundle> {
        self.begin("create_bundle").await?;
        require_non_empty("name", &request.name)?;
        require_well_formed_targets(&request.access_targets)?;

        let mut state = self.state.write().await;
        state.ensure_unique_name(RecordKind::Bundle, &request.name, None)?;

        let bundle = Bundle {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            access_targets: request.access_targets,
        };
        state.put(RecordKind::Bundle, &bundle.id, encode(&bundle)?);

        debug!("Created bundle '{}' ({})", bundle.name, bundle.id);
        Ok(bundle)
    }

    async fn update_bundle(&self, id: &str, request: UpsertBundle) -> ApiResult<Bundle> {
        self.begin("update_bundle").await?;
        require_non_empty("name", &request.name)?;
        require_well_formed_targets(&request.access_targets)?;

        let mut state = self.state.write().await;
        state.record(RecordKind::Bundle, id)?;
        state.ensure_unique_name(RecordKind::Bundle, &request.name, Some(id))?;

        let bundle = Bundle {
            id: id.to_string(),
            name: request.name,
            access_targets: request.access_targets,
        };
        state.put(RecordKind::Bundle, id, encode(&bundle)?);
        Ok(bundle)
    }

    async fn delete_bundle(&self, id: &str) -> ApiResult<()> {
        self.delete_record("delete_bundle", RecordKind::Bundle, id)
            .await
    }

    async fn list_integrations(&self, query: CollectionQuery) -> ApiResult<Page<Integration>> {
        self.list_named("list_integrations", RecordKind::Integration, query)
            .await
    }

    async fn get_integration(&self, id: &str) -> ApiResult<Integration> {
        self.get_record("get_integration", RecordKind::Integration, id)
            .await
    }

    async fn create_integration(&self, request: UpsertIntegration) -> ApiResult<Integration> {
        self.begin("create_integration").await?;
        require_non_empty("name", &request.name)?;
        require_non_empty("type", &request.integration_type)?;

        let mut state = self.state.write().await;
        state.ensure_unique_name(RecordKind::Integration, &request.name, None)?;

        let integration = Integration {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            integration_type: request.integration_type,
            status: "Active".to_string(),
            connector_id: request.connector_id,
            connected_resource_types: request.connected_resource_types,
            metadata: request.metadata,
            custom_access_details: request.custom_access_details,
            user_cleanup_period_in_days: request.user_cleanup_period_in_days,
        };
        state.put(RecordKind::Integration, &integration.id, encode(&integration)?);

        debug!(
            "Created {} integration '{}' ({})",
            integration.integration_type, integration.name, integration.id
        );
        Ok(integration)
    }

    async fn update_integration(
        &self,
        id: &str,
        request: UpsertIntegration,
    ) -> ApiResult<Integration> {
        self.begin("update_integration").await?;
        require_non_empty("name", &request.name)?;

        let mut state = self.state.write().await;
        let existing: Integration = decode(
            RecordKind::Integration,
            state.record(RecordKind::Integration, id)?,
        )?;
        if existing.integration_type != request.integration_type {
            return Err(ApiError::invalid_request(
                "integration type cannot be changed",
            ));
        }
        state.ensure_unique_name(RecordKind::Integration, &request.name, Some(id))?;

        let integration = Integration {
            id: id.to_string(),
            name: request.name,
            integration_type: existing.integration_type,
            status: existing.status,
            connector_id: request.connector_id.apply_to(existing.connector_id),
            connected_resource_types: request.connected_resource_types,
            metadata: request.metadata,
            custom_access_details: request
                .custom_access_details
                .apply_to(existing.custom_access_details),
            user_cleanup_period_in_days: request
                .user_cleanup_period_in_days
                .apply_to(existing.user_cleanup_period_in_days),
        };
        state.put(RecordKind::Integration, id, encode(&integration)?);
        Ok(integration)
    }

    async fn delete_integration(&self, id: &str) -> ApiResult<()> {
        self.delete_record("delete_integration", RecordKind::Integration, id)
            .await
    }

    async fn get_access_flow(&self, id: &str) -> ApiResult<AccessFlow> {
        self.get_record("get_access_flow", RecordKind::AccessFlow, id)
            .await
    }

    async fn create_access_flow(&self, request: UpsertAccessFlow) -> ApiResult<AccessFlow> {
        self.begin("create_access_flow").await?;
        require_non_empty("name", &request.name)?;
        require_well_formed_targets(&request.access_targets)?;

        let flow = AccessFlow {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            active: request.active,
            trigger: request.trigger,
            grantees: request.grantees,
            access_targets: request.access_targets,
            approver_policy: request.approver_policy,
            grant_duration_in_min: request.grant_duration_in_min,
            justification_required: request.justification_required,
            creation_date: Some(Utc::now()),
        };

        let mut state = self.state.write().await;
        state.put(RecordKind::AccessFlow, &flow.id, encode(&flow)?);

        debug!("Created access flow '{}' ({})", flow.name, flow.id);
        Ok(flow)
    }

    async fn update_access_flow(
        &self,
        id: &str,
        request: UpsertAccessFlow,
    ) -> ApiResult<AccessFlow> {
        self.begin("update_access_flow").await?;
        require_non_empty("name", &request.name)?;
        require_well_formed_targets(&request.access_targets)?;

        let mut state = self.state.write().await;
        let existing: AccessFlow = decode(
            RecordKind::AccessFlow,
            state.record(RecordKind::AccessFlow, id)?,
        )?;

        let flow = AccessFlow {
            id: id.to_string(),
            name: request.name,
            active: request.active,
            trigger: request.trigger,
            grantees: request.grantees,
            access_targets: request.access_targets,
            approver_policy: request.approver_policy.apply_to(existing.approver_policy),
            grant_duration_in_min: request
                .grant_duration_in_min
                .apply_to(existing.grant_duration_in_min),
            justification_required: request.justification_required,
            creation_date: existing.creation_date,
        };
        state.put(RecordKind::AccessFlow, id, encode(&flow)?);
        Ok(flow)
    }

    async fn delete_access_flow(&self, id: &str) -> ApiResult<()> {
        self.delete_record("delete_access_flow", RecordKind::AccessFlow, id)
            .await
    }
}

fn record_name(record: &Value) -> Option<&str> {
    record.get("name").and_then(Value::as_str)
}

fn encode<T: Serialize>(value: &T) -> ApiResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn decode<T: DeserializeOwned>(kind: RecordKind, record: &Value) -> ApiResult<T> {
    T::deserialize(record)
        .map_err(|e| ApiError::transport(format!("failed to decode {} response: {}", kind, e)))
}

fn require_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_request(format!("'{}' must not be empty", field)));
    }
    Ok(())
}

fn require_well_formed_targets(targets: &[crate::models::AccessTargetWire]) -> ApiResult<()> {
    if let Some(position) = targets.iter().position(|t| t.populated() != 1) {
        return Err(ApiError::invalid_request(format!(
            "access_targets[{}] must set exactly one target",
            position
        )));
    }
    Ok(())
}

/// Slice one page out of the full, ordered result set.
fn paginate<T>(
    scope: &str,
    items: Vec<T>,
    query: &CollectionQuery,
    page_size: usize,
) -> ApiResult<Page<T>> {
    let filter = query.name.as_deref();
    let offset = match query.page_token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => decode_token(token, scope, filter)?,
        None => 0,
    };

    let total = items.len();
    if offset > total {
        return Err(ApiError::InvalidPageToken {
            token: query.page_token.clone().unwrap_or_default(),
        });
    }

    let end = offset.saturating_add(page_size).min(total);
    let next_page_token = (end < total).then(|| encode_token(end, scope, filter));

    trace!(
        "Serving {} items {}..{} of {} (filter: {:?})",
        scope, offset, end, total, filter
    );

    let page_items = items.into_iter().skip(offset).take(end - offset).collect();
    Ok(Page::new(page_items, next_page_token))
}

fn query_digest(scope: &str, filter: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(scope.as_bytes());
    hasher.update([0u8]);
    hasher.update(filter.unwrap_or_default().as_bytes());
    hasher
        .finalize()
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn encode_token(offset: usize, scope: &str, filter: Option<&str>) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}:{}", offset, query_digest(scope, filter)))
}

fn decode_token(token: &str, scope: &str, filter: Option<&str>) -> ApiResult<usize> {
    let invalid = || ApiError::InvalidPageToken {
        token: token.to_string(),
    };

    let raw = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
    let text = String::from_utf8(raw).map_err(|_| invalid())?;
    let (offset, digest) = text.split_once(':').ok_or_else(invalid)?;
    if digest != query_digest(scope, filter) {
        return Err(invalid());
    }
    offset.parse().map_err(|_| invalid())
}
