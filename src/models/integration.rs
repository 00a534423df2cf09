//! Resource integration wire types.

use crate::tristate::Tristate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A connection between the platform and a resource provider (cloud
/// account, database, SaaS application).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub connector_id: Tristate<String>,
    #[serde(default)]
    pub connected_resource_types: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub custom_access_details: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub user_cleanup_period_in_days: Tristate<i64>,
}

/// Body of an integration create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertIntegration {
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub connector_id: Tristate<String>,
    #[serde(default)]
    pub connected_resource_types: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub custom_access_details: Tristate<String>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub user_cleanup_period_in_days: Tristate<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_body_distinguishes_cleared_fields() {
        let body = UpsertIntegration {
            name: "prod-db".to_string(),
            integration_type: "postgresql".to_string(),
            connector_id: Tristate::Value("conn-1".to_string()),
            connected_resource_types: vec!["postgresql-database".to_string()],
            metadata: BTreeMap::new(),
            custom_access_details: Tristate::Null,
            user_cleanup_period_in_days: Tristate::Unset,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["custom_access_details"], json!(null));
        assert!(value.get("user_cleanup_period_in_days").is_none());
        assert_eq!(value["type"], json!("postgresql"));
    }
}
