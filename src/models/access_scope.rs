//! Access scope wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named resource query that access flows and bundles can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScope {
    pub id: String,
    pub name: String,
    /// Query in the platform's resource query language
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_date: Option<DateTime<Utc>>,
}

/// Body of an access scope create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertAccessScope {
    pub name: String,
    pub query: String,
}
