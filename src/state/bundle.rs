//! Bundle state model.

use crate::error::{ConversionError, ConversionResult};
use crate::models::{Bundle, UpsertBundle};
use crate::state::target::{AccessTarget, targets_from_wire, targets_to_wire};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleModel {
    /// Server-assigned id; ignored on create
    pub id: String,
    pub name: String,
    pub access_targets: Vec<AccessTarget>,
}

impl BundleModel {
    /// Create a plan for a new bundle.
    pub fn planned(name: impl Into<String>, access_targets: Vec<AccessTarget>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            access_targets,
        }
    }

    pub fn to_request(&self) -> UpsertBundle {
        UpsertBundle {
            name: self.name.clone(),
            access_targets: targets_to_wire(&self.access_targets),
        }
    }
}

impl TryFrom<Bundle> for BundleModel {
    type Error = ConversionError;

    fn try_from(bundle: Bundle) -> ConversionResult<Self> {
        Ok(Self {
            id: bundle.id,
            name: bundle.name,
            access_targets: targets_from_wire(bundle.access_targets)?,
        })
    }
}
