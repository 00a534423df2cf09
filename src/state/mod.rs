//! Typed state models.
//!
//! Each managed object has a state model that the host persists between runs.
//! State models are stricter than the wire DTOs in [`crate::models`]: string
//! enums become Rust enums, access targets become a sum type, and tri-state
//! fields collapse into `Option`. Conversion from the wire fails with a
//! [`ConversionError`](crate::error::ConversionError) when the server returns
//! something the model cannot represent.

pub mod access_flow;
pub mod access_scope;
pub mod bundle;
pub mod group;
pub mod integration;
pub mod target;

pub use access_flow::{
    AccessFlowModel, AccessFlowTrigger, ApprovalMode, ApproverPolicy, Grantee, GranteeKind,
};
pub use access_scope::AccessScopeModel;
pub use bundle::BundleModel;
pub use group::{GroupMemberModel, GroupModel, GroupSummary};
pub use integration::IntegrationModel;
pub use target::{
    AccessScopeTarget, AccessTarget, BundleTarget, IntegrationTarget, ResourceFilter,
    targets_from_wire, targets_to_wire,
};
