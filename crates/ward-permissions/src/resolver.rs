//! Identity and role resolution.

use crate::policy::FallbackPolicy;
use crate::types::RoleResolution;
use ward_types::{Actor, Role};

const SYNTHETIC_ELEVATED_ID: &str = "synthetic-elevated";
const SYNTHETIC_MINIMAL_ID: &str = "synthetic-minimal";
const DEFAULT_ROLE_NAME: &str = "Default";

/// Find an actor by exact, case-sensitive id. A blank id never matches.
pub fn find_actor<'a>(actors: &'a [Actor], actor_id: &str) -> Option<&'a Actor> {
    if actor_id.is_empty() {
        return None;
    }
    actors.iter().find(|actor| actor.id == actor_id)
}

/// Find the role a reference names.
///
/// An id match anywhere in the directory wins over a name match, so a role
/// whose name happens to equal another role's id cannot shadow it. Among
/// name matches the first in directory order wins.
pub fn find_role<'a>(roles: &'a [Role], reference: &str) -> Option<&'a Role> {
    roles
        .iter()
        .find(|role| role.id == reference)
        .or_else(|| roles.iter().find(|role| role.name == reference))
}

/// Resolve an actor's role, synthesizing one when no record matches.
pub fn resolve_role(actor: &Actor, roles: &[Role], policy: &FallbackPolicy) -> RoleResolution {
    let reference = actor.role_reference();

    if let Some(role) = reference.and_then(|r| find_role(roles, r)) {
        return RoleResolution::Found(role.clone());
    }

    tracing::warn!(
        actor = %actor.id,
        reference = reference.unwrap_or(""),
        known_roles = roles.len(),
        "Role not found for actor"
    );

    let resolution = match reference {
        Some(r) if policy.is_elevated(r) => RoleResolution::SyntheticElevated(Role::new(
            SYNTHETIC_ELEVATED_ID,
            r,
            policy.elevated_grants(),
        )),
        _ => RoleResolution::SyntheticMinimal(Role::new(
            SYNTHETIC_MINIMAL_ID,
            reference.unwrap_or(DEFAULT_ROLE_NAME),
            policy.minimal_grants(),
        )),
    };
    tracing::info!(
        actor = %actor.id,
        resolution = resolution.as_str(),
        "Using synthetic role"
    );
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_types::Grants;

    fn role(id: &str, name: &str) -> Role {
        Role::new(id, name, Grants::new())
    }

    #[test]
    fn test_find_actor_exact_match() {
        let actors = vec![Actor::new("u1", "Ana"), Actor::new("U1", "Bia")];
        assert_eq!(find_actor(&actors, "U1").unwrap().display_name, "Bia");
        assert!(find_actor(&actors, "u2").is_none());
    }

    #[test]
    fn test_find_actor_blank_id() {
        let actors = vec![Actor::new("", "Ghost")];
        assert!(find_actor(&actors, "").is_none());
    }

    #[test]
    fn test_find_role_by_id_or_name() {
        let roles = vec![role("r1", "Nurse"), role("r2", "Doctor")];
        assert_eq!(find_role(&roles, "r2").unwrap().name, "Doctor");
        assert_eq!(find_role(&roles, "Nurse").unwrap().id, "r1");
        assert!(find_role(&roles, "nurse").is_none());
    }

    #[test]
    fn test_id_match_beats_earlier_name_match() {
        // "r2" is both the name of the first role and the id of the second.
        let roles = vec![role("r1", "r2"), role("r2", "Doctor")];
        assert_eq!(find_role(&roles, "r2").unwrap().id, "r2");
    }

    #[test]
    fn test_resolve_found() {
        let roles = vec![role("r1", "Nurse")];
        let actor = Actor::new("u1", "Ana").with_role("Nurse");
        let resolution = resolve_role(&actor, &roles, &FallbackPolicy::default());
        assert!(matches!(resolution, RoleResolution::Found(ref r) if r.id == "r1"));
        assert!(!resolution.is_synthetic());
    }

    #[test]
    fn test_resolve_elevated_fallback() {
        let actor = Actor::new("2003", "Dev").with_role("DEV");
        let resolution = resolve_role(&actor, &[], &FallbackPolicy::default());
        assert!(matches!(resolution, RoleResolution::SyntheticElevated(_)));
        assert_eq!(resolution.role().id, "synthetic-elevated");
        assert_eq!(resolution.role().name, "DEV");
    }

    #[test]
    fn test_resolve_minimal_fallback() {
        let actor = Actor::new("u9", "Caio").with_role_id("SomeUnknownRole");
        let resolution = resolve_role(&actor, &[role("r1", "Nurse")], &FallbackPolicy::default());
        assert!(matches!(resolution, RoleResolution::SyntheticMinimal(_)));
        assert_eq!(resolution.role().name, "SomeUnknownRole");
    }

    #[test]
    fn test_resolve_without_reference_is_minimal() {
        let actor = Actor::new("u9", "Caio");
        let resolution = resolve_role(&actor, &[], &FallbackPolicy::default());
        assert!(matches!(resolution, RoleResolution::SyntheticMinimal(_)));
        assert_eq!(resolution.role().name, "Default");
    }
}
