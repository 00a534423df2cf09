//! Access scope state model.

use crate::models::{AccessScope, UpsertAccessScope};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScopeModel {
    /// Server-assigned id; ignored on create
    pub id: String,
    pub name: String,
    pub query: String,
}

impl AccessScopeModel {
    /// Create a plan for a new access scope.
    pub fn planned(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            query: query.into(),
        }
    }

    pub fn to_request(&self) -> UpsertAccessScope {
        UpsertAccessScope {
            name: self.name.clone(),
            query: self.query.clone(),
        }
    }
}

// Timestamps are server bookkeeping and stay out of state.
impl From<AccessScope> for AccessScopeModel {
    fn from(scope: AccessScope) -> Self {
        Self {
            id: scope.id,
            name: scope.name,
            query: scope.query,
        }
    }
}
