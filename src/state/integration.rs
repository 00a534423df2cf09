//! Integration state model and its tri-state mapping.
//!
//! Optional attributes live in state as `Option`. On the way out they are
//! encoded differently per operation: a create leaves unconfigured attributes
//! off the wire, an update sends them as explicit `null` so the server clears
//! whatever was there before.

use crate::error::{ConversionError, ConversionResult};
use crate::models::{Integration, UpsertIntegration};
use crate::tristate::Tristate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationModel {
    /// Server-assigned id; ignored on create
    pub id: String,
    pub name: String,
    pub integration_type: String,
    pub connector_id: Option<String>,
    pub connected_resource_types: Vec<String>,
    pub metadata: BTreeMap<String, String>,
    pub custom_access_details: Option<String>,
    pub user_cleanup_period_in_days: Option<u32>,
    /// Computed by the server
    pub status: String,
}

impl IntegrationModel {
    /// Create a plan for a new integration with no optional attributes set.
    pub fn planned(name: impl Into<String>, integration_type: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            integration_type: integration_type.into(),
            connector_id: None,
            connected_resource_types: Vec::new(),
            metadata: BTreeMap::new(),
            custom_access_details: None,
            user_cleanup_period_in_days: None,
            status: String::new(),
        }
    }

    /// Request body for create: unconfigured attributes are not sent.
    pub fn to_create_request(&self) -> UpsertIntegration {
        self.to_request(RequestKind::Create)
    }

    /// Request body for update: unconfigured attributes are sent as null.
    pub fn to_update_request(&self) -> UpsertIntegration {
        self.to_request(RequestKind::Update)
    }

    fn to_request(&self, kind: RequestKind) -> UpsertIntegration {
        UpsertIntegration {
            name: self.name.clone(),
            integration_type: self.integration_type.clone(),
            connector_id: kind.encode(self.connector_id.clone()),
            connected_resource_types: self.connected_resource_types.clone(),
            metadata: self.metadata.clone(),
            custom_access_details: kind.encode(self.custom_access_details.clone()),
            user_cleanup_period_in_days: kind.encode(self.user_cleanup_period_in_days.map(i64::from)),
        }
    }
}

/// Which request an optional attribute is being encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestKind {
    Create,
    Update,
}

impl RequestKind {
    pub(crate) fn encode<T>(self, value: Option<T>) -> Tristate<T> {
        match self {
            RequestKind::Create => Tristate::from_optional_create(value),
            RequestKind::Update => Tristate::from_optional_update(value),
        }
    }
}

impl TryFrom<Integration> for IntegrationModel {
    type Error = ConversionError;

    fn try_from(integration: Integration) -> ConversionResult<Self> {
        let user_cleanup_period_in_days = integration
            .user_cleanup_period_in_days
            .try_map(|days| {
                u32::try_from(days).map_err(|_| ConversionError::OutOfRange {
                    field: "user_cleanup_period_in_days",
                    value: days,
                })
            })?
            .into_option();

        Ok(Self {
            id: integration.id,
            name: integration.name,
            integration_type: integration.integration_type,
            connector_id: integration.connector_id.into_option(),
            connected_resource_types: integration.connected_resource_types,
            metadata: integration.metadata,
            custom_access_details: integration.custom_access_details.into_option(),
            user_cleanup_period_in_days,
            status: integration.status,
        })
    }
}
