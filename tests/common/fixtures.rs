//! Raw wire payloads a real server could send.
//!
//! These bypass the in-memory API's request validation through
//! `insert_raw`, which is how tests reach the conversion error paths.

use serde_json::{Value, json};

/// A bundle whose only access target sets two members at once.
pub fn bundle_with_ambiguous_target(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "access_targets": [{
            "bundle": {"bundle_id": "b-other"},
            "access_scope": {"access_scope_id": "s-other"}
        }]
    })
}

/// A bundle targeting a single access scope.
pub fn bundle_with_scope_target(id: &str, name: &str, scope_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "access_targets": [{"access_scope": {"access_scope_id": scope_id}}]
    })
}

/// An access flow using a trigger this provider does not know.
pub fn access_flow_with_unknown_trigger(id: &str) -> Value {
    json!({
        "id": id,
        "name": "legacy flow",
        "active": true,
        "trigger": "ON_CALL_ROTATION",
        "grantees": [{"type": "user", "id": "u-1"}],
        "access_targets": [{"bundle": {"bundle_id": "b-1"}}]
    })
}
