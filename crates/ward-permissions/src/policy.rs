//! Fallback-role policy: what a session gets when its role record is missing.

use serde::{Deserialize, Serialize};
use ward_types::{
    ActionKind, ConfigError, GrantSet, Grants, ResourceCategory, actions, categories,
};

/// Controls fallback-role synthesis.
///
/// Category lists are normalized when grants are built; blank entries are
/// rejected by [`FallbackPolicy::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    /// Role references (matched case-sensitively) that get the elevated role.
    pub elevated_tokens: Vec<String>,
    /// Every category the synthetic roles cover.
    pub known_categories: Vec<String>,
    /// Known categories where the elevated role also gets `manage`.
    pub manage_categories: Vec<String>,
    /// Categories the minimal role lists with no actions.
    pub withheld_categories: Vec<String>,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            elevated_tokens: vec!["Developer".into(), "DEV".into(), "Admin".into()],
            known_categories: [
                categories::PATIENT,
                categories::APPOINTMENT,
                categories::EXAM,
                categories::PHARMACY,
                categories::DONATION,
                categories::ACCOUNT,
                categories::ROLE_MANAGEMENT,
            ]
            .map(String::from)
            .to_vec(),
            manage_categories: [
                categories::DONATION,
                categories::ACCOUNT,
                categories::ROLE_MANAGEMENT,
            ]
            .map(String::from)
            .to_vec(),
            withheld_categories: vec![categories::ROLE_MANAGEMENT.into()],
        }
    }
}

impl FallbackPolicy {
    pub fn is_elevated(&self, reference: &str) -> bool {
        self.elevated_tokens.iter().any(|token| token == reference)
    }

    /// Full create/view/edit/delete on every known category, plus `manage`
    /// on the manage categories.
    pub fn elevated_grants(&self) -> Grants {
        let manage: Vec<ResourceCategory> = parse_all(&self.manage_categories).collect();
        let mut grants = Grants::new();
        for category in parse_all(&self.known_categories) {
            let mut set: GrantSet = actions::CRUD
                .iter()
                .filter_map(|verb| ActionKind::parse(verb))
                .collect();
            if manage.contains(&category) {
                set.extend(ActionKind::parse(actions::MANAGE));
            }
            grants.insert(category, set);
        }
        grants
    }

    /// `view` on every known category, nothing on the withheld ones.
    pub fn minimal_grants(&self) -> Grants {
        let view: GrantSet = ActionKind::parse(actions::VIEW).into_iter().collect();
        let mut grants: Grants = parse_all(&self.known_categories)
            .map(|category| (category, view.clone()))
            .collect();
        for category in parse_all(&self.withheld_categories) {
            grants.insert(category, GrantSet::new());
        }
        grants
    }

    /// Reject blank entries so a typo in config can't silently drop a category.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("fallback.elevated_tokens", &self.elevated_tokens),
            ("fallback.known_categories", &self.known_categories),
            ("fallback.manage_categories", &self.manage_categories),
            ("fallback.withheld_categories", &self.withheld_categories),
        ];
        for (key, list) in lists {
            if list.iter().any(|entry| entry.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "entries must not be blank".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_all(names: &[String]) -> impl Iterator<Item = ResourceCategory> + '_ {
    names.iter().filter_map(|name| ResourceCategory::parse(name))
}
