//! Access flow state model.
//!
//! The API speaks in upper-case strings for triggers and approval modes and in
//! lower-case strings for grantee types. State uses enums for all three and
//! rejects anything it does not know.

use crate::error::{ConversionError, ConversionResult};
use crate::models::{AccessFlow, ApproverPolicyWire, GranteeWire, UpsertAccessFlow};
use crate::state::integration::RequestKind;
use crate::state::target::{AccessTarget, targets_from_wire, targets_to_wire};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFlowModel {
    /// Server-assigned id; ignored on create
    pub id: String,
    pub name: String,
    pub active: bool,
    pub trigger: AccessFlowTrigger,
    pub grantees: Vec<Grantee>,
    pub access_targets: Vec<AccessTarget>,
    /// `None` grants without approval
    pub approver_policy: Option<ApproverPolicy>,
    /// `None` grants until revoked
    pub grant_duration_in_min: Option<u32>,
    pub justification_required: bool,
}

/// How an access request is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessFlowTrigger {
    /// Grantees request access themselves
    SelfServe,
    /// Access is granted as soon as a grantee matches
    Automatic,
}

impl AccessFlowTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessFlowTrigger::SelfServe => "SELF_SERVE",
            AccessFlowTrigger::Automatic => "AUTOMATIC",
        }
    }
}

impl fmt::Display for AccessFlowTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AccessFlowTrigger {
    type Error = ConversionError;

    fn try_from(value: &str) -> ConversionResult<Self> {
        match value {
            "SELF_SERVE" => Ok(AccessFlowTrigger::SelfServe),
            "AUTOMATIC" => Ok(AccessFlowTrigger::Automatic),
            other => Err(ConversionError::UnknownTrigger {
                trigger: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranteeKind {
    User,
    Group,
}

impl GranteeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GranteeKind::User => "user",
            GranteeKind::Group => "group",
        }
    }
}

/// A user or group that receives access or approves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grantee {
    pub kind: GranteeKind,
    pub id: String,
}

impl Grantee {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            kind: GranteeKind::User,
            id: id.into(),
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self {
            kind: GranteeKind::Group,
            id: id.into(),
        }
    }
}

impl TryFrom<GranteeWire> for Grantee {
    type Error = ConversionError;

    fn try_from(wire: GranteeWire) -> ConversionResult<Self> {
        let kind = match wire.grantee_type.as_str() {
            "user" => GranteeKind::User,
            "group" => GranteeKind::Group,
            _ => {
                return Err(ConversionError::UnknownGranteeType {
                    grantee_type: wire.grantee_type,
                });
            }
        };
        Ok(Self { kind, id: wire.id })
    }
}

impl From<&Grantee> for GranteeWire {
    fn from(grantee: &Grantee) -> Self {
        Self {
            grantee_type: grantee.kind.as_str().to_string(),
            id: grantee.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalMode {
    /// One approver is enough
    AnyOf,
    /// Every approver must approve
    AllOf,
}

impl ApprovalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalMode::AnyOf => "ANY_OF",
            ApprovalMode::AllOf => "ALL_OF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverPolicy {
    pub mode: ApprovalMode,
    pub approvers: Vec<Grantee>,
}

impl TryFrom<ApproverPolicyWire> for ApproverPolicy {
    type Error = ConversionError;

    fn try_from(wire: ApproverPolicyWire) -> ConversionResult<Self> {
        let mode = match wire.approval_mode.as_str() {
            "ANY_OF" => ApprovalMode::AnyOf,
            "ALL_OF" => ApprovalMode::AllOf,
            _ => {
                return Err(ConversionError::UnknownApprovalMode {
                    mode: wire.approval_mode,
                });
            }
        };
        Ok(Self {
            mode,
            approvers: grantees_from_wire(wire.approvers)?,
        })
    }
}

impl From<&ApproverPolicy> for ApproverPolicyWire {
    fn from(policy: &ApproverPolicy) -> Self {
        Self {
            approval_mode: policy.mode.as_str().to_string(),
            approvers: policy.approvers.iter().map(GranteeWire::from).collect(),
        }
    }
}

fn grantees_from_wire(grantees: Vec<GranteeWire>) -> ConversionResult<Vec<Grantee>> {
    grantees.into_iter().map(Grantee::try_from).collect()
}

impl AccessFlowModel {
    /// Create an active self-serve plan with no approval and no time limit.
    pub fn planned(
        name: impl Into<String>,
        grantees: Vec<Grantee>,
        access_targets: Vec<AccessTarget>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            active: true,
            trigger: AccessFlowTrigger::SelfServe,
            grantees,
            access_targets,
            approver_policy: None,
            grant_duration_in_min: None,
            justification_required: false,
        }
    }

    /// Request body for create: no policy and no duration are left off.
    pub fn to_create_request(&self) -> UpsertAccessFlow {
        self.to_request(RequestKind::Create)
    }

    /// Request body for update: no policy and no duration are sent as null.
    pub fn to_update_request(&self) -> UpsertAccessFlow {
        self.to_request(RequestKind::Update)
    }

    fn to_request(&self, kind: RequestKind) -> UpsertAccessFlow {
        UpsertAccessFlow {
            name: self.name.clone(),
            active: self.active,
            trigger: self.trigger.as_str().to_string(),
            grantees: self.grantees.iter().map(GranteeWire::from).collect(),
            access_targets: targets_to_wire(&self.access_targets),
            approver_policy: kind.encode(self.approver_policy.as_ref().map(ApproverPolicyWire::from)),
            grant_duration_in_min: kind.encode(self.grant_duration_in_min.map(i64::from)),
            justification_required: self.justification_required,
        }
    }
}

impl TryFrom<AccessFlow> for AccessFlowModel {
    type Error = ConversionError;

    fn try_from(flow: AccessFlow) -> ConversionResult<Self> {
        let trigger = AccessFlowTrigger::try_from(flow.trigger.as_str())?;
        let approver_policy = flow
            .approver_policy
            .try_map(ApproverPolicy::try_from)?
            .into_option();
        let grant_duration_in_min = flow
            .grant_duration_in_min
            .try_map(|minutes| {
                u32::try_from(minutes).map_err(|_| ConversionError::OutOfRange {
                    field: "grant_duration_in_min",
                    value: minutes,
                })
            })?
            .into_option();

        Ok(Self {
            id: flow.id,
            name: flow.name,
            active: flow.active,
            trigger,
            grantees: grantees_from_wire(flow.grantees)?,
            access_targets: targets_from_wire(flow.access_targets)?,
            approver_policy,
            grant_duration_in_min,
            justification_required: flow.justification_required,
        })
    }
}
