//! Built-in role records used to bootstrap an empty role directory.

use crate::policy::FallbackPolicy;
use ward_types::Role;

/// A role record shipped with Ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleTemplate {
    Developer,
    Director,
}

impl RoleTemplate {
    pub const ALL: [RoleTemplate; 2] = [RoleTemplate::Developer, RoleTemplate::Director];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Developer => "role_dev",
            Self::Director => "role_director",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Developer => "DEV",
            Self::Director => "Director",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Developer => "Developer - full system access",
            Self::Director => "Director - full access",
        }
    }

    /// Build the role record. Both templates carry the elevated grant set.
    pub fn build(&self, policy: &FallbackPolicy) -> Role {
        Role::new(self.id(), self.name(), policy.elevated_grants())
            .with_description(self.description())
    }
}
