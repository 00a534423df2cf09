//! Access targets as a proper sum type.
//!
//! The wire format allows any combination of its three members; this module is
//! the single place where "exactly one" is enforced. Everything downstream
//! matches on [`AccessTarget`] instead of counting optional fields.

use crate::error::{ConversionError, ConversionResult};
use crate::models::{
    AccessScopeTargetWire, AccessTargetWire, BundleTargetWire, IntegrationTargetWire,
    ResourceFilterWire,
};
use crate::tristate::Tristate;
use serde::{Deserialize, Serialize};

/// What an access grant applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessTarget {
    /// Resources of one type within an integration
    Integration(IntegrationTarget),
    /// Every target of a bundle
    Bundle(BundleTarget),
    /// Every resource matched by an access scope
    AccessScope(AccessScopeTarget),
}

impl AccessTarget {
    /// Target an integration's resources of `resource_type`.
    pub fn integration(
        integration_id: impl Into<String>,
        resource_type: impl Into<String>,
        permissions: Vec<String>,
    ) -> Self {
        AccessTarget::Integration(IntegrationTarget {
            integration_id: integration_id.into(),
            resource_type: resource_type.into(),
            permissions,
            resources_scopes: None,
        })
    }

    /// Target a bundle.
    pub fn bundle(bundle_id: impl Into<String>) -> Self {
        AccessTarget::Bundle(BundleTarget {
            bundle_id: bundle_id.into(),
        })
    }

    /// Target an access scope.
    pub fn access_scope(access_scope_id: impl Into<String>) -> Self {
        AccessTarget::AccessScope(AccessScopeTarget {
            access_scope_id: access_scope_id.into(),
        })
    }

    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            AccessTarget::Integration(_) => "integration",
            AccessTarget::Bundle(_) => "bundle",
            AccessTarget::AccessScope(_) => "access_scope",
        }
    }

    /// Id of the referenced object.
    pub fn referenced_id(&self) -> &str {
        match self {
            AccessTarget::Integration(t) => &t.integration_id,
            AccessTarget::Bundle(t) => &t.bundle_id,
            AccessTarget::AccessScope(t) => &t.access_scope_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationTarget {
    pub integration_id: String,
    pub resource_type: String,
    pub permissions: Vec<String>,
    /// `None` targets every resource of the type.
    pub resources_scopes: Option<Vec<ResourceFilter>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleTarget {
    pub bundle_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScopeTarget {
    pub access_scope_id: String,
}

/// Narrows an integration target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceFilter {
    ById { values: Vec<String> },
    ByName { values: Vec<String> },
    ByTag { key: String, values: Vec<String> },
}

impl TryFrom<ResourceFilterWire> for ResourceFilter {
    type Error = ConversionError;

    fn try_from(wire: ResourceFilterWire) -> ConversionResult<Self> {
        match wire.filter_type.as_str() {
            "id" => Ok(ResourceFilter::ById {
                values: wire.values,
            }),
            "name" => Ok(ResourceFilter::ByName {
                values: wire.values,
            }),
            "tag" => {
                let key = wire
                    .key
                    .into_option()
                    .filter(|k| !k.is_empty())
                    .ok_or(ConversionError::MissingFilterKey)?;
                Ok(ResourceFilter::ByTag {
                    key,
                    values: wire.values,
                })
            }
            _ => Err(ConversionError::UnknownResourceFilter {
                filter_type: wire.filter_type,
            }),
        }
    }
}

impl From<ResourceFilter> for ResourceFilterWire {
    fn from(filter: ResourceFilter) -> Self {
        match filter {
            ResourceFilter::ById { values } => ResourceFilterWire {
                filter_type: "id".to_string(),
                key: Tristate::Unset,
                values,
            },
            ResourceFilter::ByName { values } => ResourceFilterWire {
                filter_type: "name".to_string(),
                key: Tristate::Unset,
                values,
            },
            ResourceFilter::ByTag { key, values } => ResourceFilterWire {
                filter_type: "tag".to_string(),
                key: Tristate::Value(key),
                values,
            },
        }
    }
}

impl TryFrom<AccessTargetWire> for AccessTarget {
    type Error = ConversionError;

    fn try_from(wire: AccessTargetWire) -> ConversionResult<Self> {
        let found = wire.populated();
        match (wire.integration, wire.bundle, wire.access_scope) {
            (Some(integration), None, None) => {
                let resources_scopes = integration
                    .resources_scopes
                    .try_map(|filters| {
                        filters
                            .into_iter()
                            .map(ResourceFilter::try_from)
                            .collect::<ConversionResult<Vec<_>>>()
                    })?
                    .into_option();
                Ok(AccessTarget::Integration(IntegrationTarget {
                    integration_id: integration.integration_id,
                    resource_type: integration.resource_type,
                    permissions: integration.permissions,
                    resources_scopes,
                }))
            }
            (None, Some(bundle), None) => Ok(AccessTarget::Bundle(BundleTarget {
                bundle_id: bundle.bundle_id,
            })),
            (None, None, Some(scope)) => Ok(AccessTarget::AccessScope(AccessScopeTarget {
                access_scope_id: scope.access_scope_id,
            })),
            _ => Err(ConversionError::AccessTargetShape { found }),
        }
    }
}

impl From<AccessTarget> for AccessTargetWire {
    fn from(target: AccessTarget) -> Self {
        match target {
            AccessTarget::Integration(t) => AccessTargetWire {
                integration: Some(IntegrationTargetWire {
                    integration_id: t.integration_id,
                    resource_type: t.resource_type,
                    permissions: t.permissions,
                    resources_scopes: Tristate::from(
                        t.resources_scopes
                            .map(|filters| filters.into_iter().map(Into::into).collect()),
                    ),
                }),
                ..Default::default()
            },
            AccessTarget::Bundle(t) => AccessTargetWire {
                bundle: Some(BundleTargetWire {
                    bundle_id: t.bundle_id,
                }),
                ..Default::default()
            },
            AccessTarget::AccessScope(t) => AccessTargetWire {
                access_scope: Some(AccessScopeTargetWire {
                    access_scope_id: t.access_scope_id,
                }),
                ..Default::default()
            },
        }
    }
}

/// Convert a wire target list, failing on the first malformed entry.
pub fn targets_from_wire(targets: Vec<AccessTargetWire>) -> ConversionResult<Vec<AccessTarget>> {
    targets.into_iter().map(AccessTarget::try_from).collect()
}

/// Convert a target list back to its wire shape.
pub fn targets_to_wire(targets: &[AccessTarget]) -> Vec<AccessTargetWire> {
    targets.iter().cloned().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: serde_json::Value) -> AccessTargetWire {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_member_converts() {
        let target = AccessTarget::try_from(wire(json!({"bundle": {"bundle_id": "b-1"}}))).unwrap();
        assert_eq!(target, AccessTarget::bundle("b-1"));
        assert_eq!(target.kind(), "bundle");
        assert_eq!(target.referenced_id(), "b-1");
    }

    #[test]
    fn test_empty_target_is_rejected() {
        let err = AccessTarget::try_from(wire(json!({}))).unwrap_err();
        assert!(matches!(err, ConversionError::AccessTargetShape { found: 0 }));
    }

    #[test]
    fn test_two_members_are_rejected() {
        let err = AccessTarget::try_from(wire(json!({
            "bundle": {"bundle_id": "b-1"},
            "access_scope": {"access_scope_id": "s-1"}
        })))
        .unwrap_err();
        assert!(matches!(err, ConversionError::AccessTargetShape { found: 2 }));
    }

    #[test]
    fn test_integration_target_with_filters() {
        let target = AccessTarget::try_from(wire(json!({
            "integration": {
                "integration_id": "i-1",
                "resource_type": "aws-s3-bucket",
                "permissions": ["read"],
                "resources_scopes": [
                    {"type": "tag", "key": "env", "values": ["prod"]},
                    {"type": "name", "values": ["logs"]}
                ]
            }
        })))
        .unwrap();

        let AccessTarget::Integration(integration) = &target else {
            panic!("expected integration target");
        };
        assert_eq!(
            integration.resources_scopes,
            Some(vec![
                ResourceFilter::ByTag {
                    key: "env".to_string(),
                    values: vec!["prod".to_string()]
                },
                ResourceFilter::ByName {
                    values: vec!["logs".to_string()]
                },
            ])
        );

        let back = AccessTargetWire::from(target);
        let filters = back.integration.unwrap().resources_scopes.into_option().unwrap();
        assert_eq!(filters[0].key, Tristate::Value("env".to_string()));
        assert!(filters[1].key.is_unset());
    }

    #[test]
    fn test_all_resources_round_trip_as_null() {
        let target = AccessTarget::integration("i-1", "postgresql-database", vec!["admin".to_string()]);
        let back = AccessTargetWire::from(target);
        assert!(back.integration.unwrap().resources_scopes.is_null());
    }

    #[test]
    fn test_tag_filter_without_key_is_rejected() {
        let err = AccessTarget::try_from(wire(json!({
            "integration": {
                "integration_id": "i-1",
                "resource_type": "aws-s3-bucket",
                "resources_scopes": [{"type": "tag", "values": ["prod"]}]
            }
        })))
        .unwrap_err();
        assert!(matches!(err, ConversionError::MissingFilterKey));
    }

    #[test]
    fn test_unknown_filter_type_is_rejected() {
        let err = ResourceFilter::try_from(ResourceFilterWire {
            filter_type: "regex".to_string(),
            key: Tristate::Unset,
            values: Vec::new(),
        })
        .unwrap_err();
        assert!(matches!(err, ConversionError::UnknownResourceFilter { .. }));
    }

    #[test]
    fn test_target_list_fails_on_first_malformed_entry() {
        let targets = vec![
            AccessTargetWire::from(AccessTarget::bundle("b-1")),
            AccessTargetWire::default(),
        ];
        assert!(targets_from_wire(targets).is_err());
    }
}
