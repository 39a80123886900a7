//! Normalized names for resource categories and actions.
//!
//! Both kinds of name are compared after trimming and lowercasing, so
//! `"  Patient "` and `"patient"` are the same category. A name that is empty
//! after normalization cannot be constructed.

use crate::error::EmptyName;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Well-known resource categories. The set is open; these are the ones the
/// front office ships with.
pub mod categories {
    pub const PATIENT: &str = "patient";
    pub const APPOINTMENT: &str = "appointment";
    pub const EXAM: &str = "exam";
    pub const PHARMACY: &str = "pharmacy";
    pub const DONATION: &str = "donation";
    pub const ACCOUNT: &str = "account";
    pub const ROLE_MANAGEMENT: &str = "role-management";
}

/// Well-known actions.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const VIEW: &str = "view";
    pub const EDIT: &str = "edit";
    pub const DELETE: &str = "delete";
    pub const MANAGE: &str = "manage";

    /// The full record-level action set.
    pub const CRUD: [&str; 4] = [CREATE, VIEW, EDIT, DELETE];
}

/// Canonical comparable form of a name: trimmed and lowercased.
/// Returns `None` when nothing is left.
pub fn normalize(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// A class of protected resource, e.g. `patient`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceCategory(String);

impl ResourceCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        normalize(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceCategory {
    type Error = EmptyName;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(EmptyName { kind: "category" })
    }
}

impl From<ResourceCategory> for String {
    fn from(category: ResourceCategory) -> Self {
        category.0
    }
}

impl Borrow<str> for ResourceCategory {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An operation requested on a resource category, e.g. `delete`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionKind(String);

impl ActionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        normalize(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActionKind {
    type Error = EmptyName;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(EmptyName { kind: "action" })
    }
}

impl From<ActionKind> for String {
    fn from(action: ActionKind) -> Self {
        action.0
    }
}

impl Borrow<str> for ActionKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
