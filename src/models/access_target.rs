//! Wire shape of access targets.
//!
//! On the wire an access target is an object with three optional members,
//! exactly one of which is expected to be set. The shape is kept verbatim here;
//! validation into a proper sum type happens once, in
//! [`crate::state::AccessTarget`].

use crate::tristate::Tristate;
use serde::{Deserialize, Serialize};

/// An access target as sent and received by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTargetWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<IntegrationTargetWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleTargetWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_scope: Option<AccessScopeTargetWire>,
}

impl AccessTargetWire {
    /// Number of members that are set. A well-formed target has exactly one.
    pub fn populated(&self) -> usize {
        usize::from(self.integration.is_some())
            + usize::from(self.bundle.is_some())
            + usize::from(self.access_scope.is_some())
    }
}

/// Resources of one type within one integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationTargetWire {
    pub integration_id: String,
    pub resource_type: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// `Null` or absent means every resource of the type.
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub resources_scopes: Tristate<Vec<ResourceFilterWire>>,
}

/// Narrows an integration target to a subset of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFilterWire {
    /// One of "id", "name", "tag"
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default, skip_serializing_if = "Tristate::is_unset")]
    pub key: Tristate<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleTargetWire {
    pub bundle_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScopeTargetWire {
    pub access_scope_id: String,
}
