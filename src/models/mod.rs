//! Wire DTOs for the access-management REST API.
//!
//! These types mirror the API's JSON shapes one to one, including the
//! loosely-typed parts (string enums, the three-member access target, tri-state
//! optional fields). State models in [`crate::state`] are the typed view of the
//! same data.

pub mod access_flow;
pub mod access_scope;
pub mod access_target;
pub mod bundle;
pub mod group;
pub mod integration;

pub use access_flow::{AccessFlow, ApproverPolicyWire, GranteeWire, UpsertAccessFlow};
pub use access_scope::{AccessScope, UpsertAccessScope};
pub use access_target::{
    AccessScopeTargetWire, AccessTargetWire, BundleTargetWire, IntegrationTargetWire,
    ResourceFilterWire,
};
pub use bundle::{Bundle, UpsertBundle};
pub use group::{Group, GroupMember, UpsertGroup};
pub use integration::{Integration, UpsertIntegration};
