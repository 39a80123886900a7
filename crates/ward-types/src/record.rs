//! Actor and role records as loaded from the directories.

use crate::grants::Grants;
use serde::{Deserialize, Serialize};

/// A person with system access.
///
/// The role may be referenced through `role_id` (current records) or the
/// legacy `role` field, and either may hold a role id or a role name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    #[serde(default, rename = "name")]
    pub display_name: String,
    #[serde(default, alias = "roleId", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Actor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role_id: None,
            role: None,
            active: true,
        }
    }

    pub fn with_role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// The value naming this actor's role: `role_id` when populated,
    /// otherwise the legacy `role` field. Blank values count as unpopulated.
    pub fn role_reference(&self) -> Option<&str> {
        [self.role_id.as_deref(), self.role.as_deref()]
            .into_iter()
            .flatten()
            .find(|reference| !reference.trim().is_empty())
    }
}

/// A named bundle of permission grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub grants: Grants,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>, grants: Grants) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            grants,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
