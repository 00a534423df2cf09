//! Bundle wire types.

use crate::models::AccessTargetWire;
use serde::{Deserialize, Serialize};

/// A reusable, named set of access targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub access_targets: Vec<AccessTargetWire>,
}

/// Body of a bundle create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertBundle {
    pub name: String,
    pub access_targets: Vec<AccessTargetWire>,
}
