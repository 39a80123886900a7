//! Permission evaluator — the entry point for session setup and permission checks.

use crate::matcher::GrantMatcher;
use crate::policy::FallbackPolicy;
use crate::resolver::{find_actor, resolve_role};
use crate::types::*;
use ward_types::{Actor, Grants, PermissionError, Role};

static NO_GRANTS: Grants = Grants::new();

/// Holds the resolved session and answers permission queries against it.
///
/// Starts uninitialized, where every query is denied. Each call to
/// [`initialize`](Self::initialize) fully replaces the previous session.
#[derive(Debug, Default)]
pub struct PermissionEvaluator {
    policy: FallbackPolicy,
    session: Option<ResolvedSession>,
}

impl PermissionEvaluator {
    /// Create an uninitialized evaluator using the given fallback policy.
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            session: None,
        }
    }

    pub fn policy(&self) -> &FallbackPolicy {
        &self.policy
    }

    /// Resolve `actor_id` to an actor and its role.
    ///
    /// Returns `false` only when no actor has that id, in which case any
    /// previous session is cleared. Once the actor is found a role is always
    /// resolved, synthetically if the directory has no match.
    pub fn initialize(&mut self, actor_id: &str, actors: &[Actor], roles: &[Role]) -> bool {
        self.session = None;

        let Some(actor) = find_actor(actors, actor_id) else {
            tracing::warn!(
                actor = actor_id,
                known_actors = actors.len(),
                "Actor not found"
            );
            return false;
        };

        let resolution = resolve_role(actor, roles, &self.policy);
        tracing::info!(
            actor = %actor.id,
            name = %actor.display_name,
            role = %resolution.role().name,
            resolution = resolution.as_str(),
            "Permissions initialized"
        );

        self.session = Some(ResolvedSession {
            actor: actor.clone(),
            resolution,
        });
        true
    }

    /// Evaluate a query, keeping the reason for a denial.
    pub fn check(&self, category: &str, action: &str) -> PermissionDecision {
        let decision = match &self.session {
            Some(session) => GrantMatcher::evaluate(&session.role().grants, category, action),
            None => PermissionDecision::Deny {
                reason: DenyReason::NoSession,
            },
        };
        if let PermissionDecision::Deny { reason } = decision {
            tracing::debug!(category, action, %reason, "Permission denied");
        }
        decision
    }

    /// Whether the session may perform `action` on `category`. Never panics;
    /// anything unmatched is a deny.
    pub fn has_permission(&self, category: &str, action: &str) -> bool {
        self.check(category, action).is_permit()
    }

    /// Alias of [`has_permission`](Self::has_permission) for call sites that
    /// abort on `false`.
    pub fn require_permission(&self, category: &str, action: &str) -> bool {
        self.has_permission(category, action)
    }

    /// Like [`has_permission`](Self::has_permission), with the denial as an error.
    pub fn ensure(&self, category: &str, action: &str) -> Result<(), PermissionError> {
        if self.has_permission(category, action) {
            Ok(())
        } else {
            Err(denied(category, action))
        }
    }

    /// Run `f` only when permitted.
    pub fn run_with_permission<T>(
        &self,
        category: &str,
        action: &str,
        f: impl FnOnce() -> T,
    ) -> Option<T> {
        self.has_permission(category, action).then(f)
    }

    /// Show/enable decision for a control gated on `category.action`.
    pub fn gate(&self, category: &str, action: &str) -> Gate {
        let permitted = self.has_permission(category, action);
        Gate {
            visible: permitted,
            enabled: permitted,
            hint: (!permitted).then(|| denied(category, action).to_string()),
        }
    }

    pub fn current_actor(&self) -> Option<&Actor> {
        self.session.as_ref().map(|session| &session.actor)
    }

    pub fn current_role(&self) -> Option<&Role> {
        self.session.as_ref().map(ResolvedSession::role)
    }

    pub fn resolution(&self) -> Option<&RoleResolution> {
        self.session.as_ref().map(|session| &session.resolution)
    }

    /// The resolved role's grants, or an empty map with no session.
    pub fn current_grants(&self) -> &Grants {
        self.current_role()
            .map(|role| &role.grants)
            .unwrap_or(&NO_GRANTS)
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }
}

fn denied(category: &str, action: &str) -> PermissionError {
    PermissionError::Denied {
        category: category.trim().to_lowercase(),
        action: action.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nurse() -> Role {
        Role::new(
            "r1",
            "Nurse",
            serde_json::from_value(json!({"patient": ["view", "create"], "exam": ["view"]}))
                .unwrap(),
        )
    }

    fn initialized() -> PermissionEvaluator {
        let mut e = PermissionEvaluator::default();
        let actors = vec![Actor::new("u1", "Ana").with_role_id("r1")];
        assert!(e.initialize("u1", &actors, &[nurse()]));
        e
    }

    #[test]
    fn test_uninitialized_denies() {
        let e = PermissionEvaluator::default();
        assert!(!e.is_initialized());
        assert_eq!(
            e.check("patient", "view"),
            PermissionDecision::Deny {
                reason: DenyReason::NoSession
            }
        );
        assert!(e.current_actor().is_none());
        assert!(e.current_role().is_none());
        assert!(e.current_grants().is_empty());
    }

    #[test]
    fn test_initialized_checks_grants() {
        let e = initialized();
        assert!(e.has_permission("patient", "create"));
        assert!(!e.has_permission("patient", "delete"));
        assert!(e.require_permission("exam", "view"));
        assert_eq!(e.current_actor().unwrap().id, "u1");
        assert_eq!(e.current_role().unwrap().name, "Nurse");
        assert_eq!(e.current_grants().len(), 2);
    }

    #[test]
    fn test_failed_initialize_clears_session() {
        let mut e = initialized();
        assert!(!e.initialize("missing", &[], &[nurse()]));
        assert!(!e.has_permission("patient", "view"));
        assert!(e.current_actor().is_none());
    }

    #[test]
    fn test_ensure_reports_denial() {
        let e = initialized();
        assert!(e.ensure("patient", "view").is_ok());
        let err = e.ensure(" Patient ", "Delete").unwrap_err();
        assert_eq!(err.to_string(), "You do not have permission to delete patient");
    }

    #[test]
    fn test_run_with_permission() {
        let e = initialized();
        assert_eq!(e.run_with_permission("patient", "create", || 7), Some(7));
        let mut ran = false;
        assert!(e.run_with_permission("exam", "delete", || ran = true).is_none());
        assert!(!ran);
    }

    #[test]
    fn test_gate() {
        let e = initialized();
        let open = e.gate("patient", "view");
        assert!(open.visible && open.enabled && open.hint.is_none());

        let closed = e.gate("pharmacy", "view");
        assert!(!closed.visible && !closed.enabled);
        assert_eq!(
            closed.hint.as_deref(),
            Some("You do not have permission to view pharmacy")
        );
    }

    #[test]
    fn test_resolution_exposed() {
        let mut e = PermissionEvaluator::default();
        let actors = vec![Actor::new("2003", "Dev").with_role("DEV")];
        assert!(e.initialize("2003", &actors, &[]));
        let resolution = e.resolution().unwrap();
        assert!(resolution.is_synthetic());
        assert!(matches!(resolution, RoleResolution::SyntheticElevated(_)));
    }
}
