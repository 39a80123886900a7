//! Core types for the permission evaluator.

use std::fmt;
use ward_types::{Actor, Role};

/// How the session's role was obtained.
///
/// Synthetic variants are produced when the actor's role reference matches
/// no role record; they carry the role fabricated for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolution {
    /// A role record from the directory.
    Found(Role),
    /// Full access for bootstrap/ops accounts with no role record yet.
    SyntheticElevated(Role),
    /// View-only access for everyone else with a dangling reference.
    SyntheticMinimal(Role),
}

impl RoleResolution {
    pub fn role(&self) -> &Role {
        match self {
            Self::Found(role) | Self::SyntheticElevated(role) | Self::SyntheticMinimal(role) => {
                role
            }
        }
    }

    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Self::Found(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::SyntheticElevated(_) => "synthetic-elevated",
            Self::SyntheticMinimal(_) => "synthetic-minimal",
        }
    }
}

/// The evaluator's per-session state: who is logged in and under which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub actor: Actor,
    pub resolution: RoleResolution,
}

impl ResolvedSession {
    pub fn role(&self) -> &Role {
        self.resolution.role()
    }
}

/// Why a permission query was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session has been initialized.
    NoSession,
    /// Category or action was blank.
    InvalidArguments,
    /// The role has no entry for the category.
    CategoryAbsent,
    /// The category's grant set does not contain the action.
    ActionAbsent,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSession => "no session",
            Self::InvalidArguments => "invalid arguments",
            Self::CategoryAbsent => "category not granted",
            Self::ActionAbsent => "action not granted",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of a permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Permit,
    Deny { reason: DenyReason },
}

impl PermissionDecision {
    pub fn is_permit(&self) -> bool {
        matches!(self, Self::Permit)
    }
}

/// What UI chrome should do with a control gated on a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub visible: bool,
    pub enabled: bool,
    /// Tooltip explaining a disabled control.
    pub hint: Option<String>,
}
