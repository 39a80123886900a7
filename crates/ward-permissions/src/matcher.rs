//! Grant matcher — evaluates a permission query against a role's grants.

use crate::types::{DenyReason, PermissionDecision};
use ward_types::{ActionKind, Grants, ResourceCategory};

/// Matches normalized category/action queries against a grant map.
pub struct GrantMatcher;

impl GrantMatcher {
    /// Evaluate a raw query. Both names are trimmed and lowercased first;
    /// a blank name is denied as invalid.
    pub fn evaluate(grants: &Grants, category: &str, action: &str) -> PermissionDecision {
        let (Some(category), Some(action)) =
            (ResourceCategory::parse(category), ActionKind::parse(action))
        else {
            return PermissionDecision::Deny {
                reason: DenyReason::InvalidArguments,
            };
        };

        match grants.actions(&category) {
            None => PermissionDecision::Deny {
                reason: DenyReason::CategoryAbsent,
            },
            Some(actions) if actions.contains(&action) => PermissionDecision::Permit,
            Some(_) => PermissionDecision::Deny {
                reason: DenyReason::ActionAbsent,
            },
        }
    }
}
