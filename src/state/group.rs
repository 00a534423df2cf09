//! Group state models.

use crate::models::{Group, GroupMember, UpsertGroup};
use serde::{Deserialize, Serialize};

/// Managed group: name plus the complete member list, by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupModel {
    /// Server-assigned id; ignored on create
    pub id: String,
    pub name: String,
    /// Member emails in ascending order
    pub members: Vec<String>,
}

impl GroupModel {
    /// Create a plan for a new group.
    pub fn planned(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            members,
        }
    }

    /// Build state from the group and its fully listed members.
    ///
    /// `members` is expected in listing order (by email), which keeps the
    /// member list stable between reads.
    pub fn from_wire(group: Group, members: Vec<GroupMember>) -> Self {
        Self {
            id: group.id,
            name: group.name,
            members: members.into_iter().map(|m| m.email).collect(),
        }
    }

    /// Request body for create and update.
    pub fn to_request(&self) -> UpsertGroup {
        UpsertGroup {
            name: self.name.clone(),
            members_emails: self.members.clone(),
        }
    }
}

/// A group as exposed by the groups data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
}

impl From<Group> for GroupSummary {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}

/// A member as exposed by the group data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberModel {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<GroupMember> for GroupMemberModel {
    fn from(member: GroupMember) -> Self {
        Self {
            name: member.display_name(),
            id: member.id,
            email: member.email,
        }
    }
}
