//! Group and group membership wire types.

use serde::{Deserialize, Serialize};

/// A group as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
}

/// A member of a group.
///
/// Members are users; the email is what configuration refers to them by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl GroupMember {
    /// Display name, falling back to the email when no name is known.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Body of a group create or update request.
///
/// Updates replace the member list wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertGroup {
    pub name: String,
    #[serde(default)]
    pub members_emails: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        let mut member = GroupMember {
            id: "u-1".to_string(),
            email: "jane@example.com".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
        };
        assert_eq!(member.display_name(), "Jane Doe");

        member.last_name = None;
        assert_eq!(member.display_name(), "Jane");

        member.first_name = None;
        assert_eq!(member.display_name(), "jane@example.com");
    }
}
