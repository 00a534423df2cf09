//! Access flow wire types.

use crate::models::AccessTargetWire;
use crate::tristate::Tristate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rule granting grantees access to targets, optionally behind approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFlow {
    pub id: String,
    pub name: String,
    pub active: bool,
    /// "SELF_SERVE" or "AUTOMATIC"
    pub trigger: String,
    #[serde(default)]
    pub grantees: Vec<GranteeWire>,
    #[serde(default)]
    pub access_targets: Vec<AccessTargetWire>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub approver_policy: Tristate<ApproverPolicyWire>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub grant_duration_in_min: Tristate<i64>,
    #[serde(default)]
    pub justification_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// A user or group on either side of an access flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranteeWire {
    /// "user" or "group"
    #[serde(rename = "type")]
    pub grantee_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverPolicyWire {
    /// "ANY_OF" or "ALL_OF"
    pub approval_mode: String,
    #[serde(default)]
    pub approvers: Vec<GranteeWire>,
}

/// Body of an access flow create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertAccessFlow {
    pub name: String,
    pub active: bool,
    pub trigger: String,
    pub grantees: Vec<GranteeWire>,
    pub access_targets: Vec<AccessTargetWire>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub approver_policy: Tristate<ApproverPolicyWire>,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub grant_duration_in_min: Tristate<i64>,
    #[serde(default)]
    pub justification_required: bool,
}
