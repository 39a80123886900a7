//! Plain-text rendering of evaluator state for the terminal.

use ward_permissions::{PermissionDecision, PermissionEvaluator};
use ward_types::Grants;

pub fn decision(decision: &PermissionDecision) -> String {
    match decision {
        PermissionDecision::Permit => "permit".to_string(),
        PermissionDecision::Deny { reason } => format!("deny ({reason})"),
    }
}

pub fn whoami(evaluator: &PermissionEvaluator) -> String {
    let (Some(actor), Some(resolution)) = (evaluator.current_actor(), evaluator.resolution())
    else {
        return "not signed in".to_string();
    };
    let role = resolution.role();
    let mut out = format!("actor: {} ({})\n", actor.display_name, actor.id);
    out.push_str(&format!("role: {} ({})\n", role.name, role.id));
    out.push_str(&format!("resolution: {}", resolution.as_str()));
    if !actor.active {
        out.push_str("\nnote: actor is inactive");
    }
    out
}

pub fn grants(grants: &Grants) -> String {
    if grants.is_empty() {
        return "no grants".to_string();
    }
    grants
        .iter()
        .map(|(category, actions)| {
            let actions: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
            if actions.is_empty() {
                format!("{category}: -")
            } else {
                format!("{category}: {}", actions.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
