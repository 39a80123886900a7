//! Typed grant maps: resource category -> permitted actions.

use crate::name::{ActionKind, ResourceCategory};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The actions permitted on one resource category.
pub type GrantSet = BTreeSet<ActionKind>;

/// A role's full grant map.
///
/// A category with no entry grants nothing. An entry with an empty set also
/// grants nothing, but records that the category was considered. Keys that
/// normalize to the same category are merged when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grants(BTreeMap<ResourceCategory, GrantSet>);

impl Grants {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add actions to a category, creating the entry if needed.
    pub fn grant(
        &mut self,
        category: ResourceCategory,
        actions: impl IntoIterator<Item = ActionKind>,
    ) {
        self.0.entry(category).or_default().extend(actions);
    }

    /// Replace a category's grant set, returning the previous one.
    pub fn insert(&mut self, category: ResourceCategory, actions: GrantSet) -> Option<GrantSet> {
        self.0.insert(category, actions)
    }

    /// The grant set for a category, if the category has an entry.
    pub fn actions(&self, category: &ResourceCategory) -> Option<&GrantSet> {
        self.0.get(category)
    }

    pub fn allows(&self, category: &ResourceCategory, action: &ActionKind) -> bool {
        self.actions(category)
            .is_some_and(|actions| actions.contains(action))
    }

    pub fn categories(&self) -> impl Iterator<Item = &ResourceCategory> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceCategory, &GrantSet)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ResourceCategory, GrantSet)> for Grants {
    fn from_iter<I: IntoIterator<Item = (ResourceCategory, GrantSet)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Grants {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GrantsVisitor;

        impl<'de> Visitor<'de> for GrantsVisitor {
            type Value = Grants;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category to actions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Grants, A::Error> {
                let mut grants = Grants::new();
                while let Some((category, actions)) =
                    map.next_entry::<ResourceCategory, GrantSet>()?
                {
                    grants.grant(category, actions);
                }
                Ok(grants)
            }
        }

        deserializer.deserialize_map(GrantsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> ResourceCategory {
        ResourceCategory::parse(name).unwrap()
    }

    fn action(name: &str) -> ActionKind {
        ActionKind::parse(name).unwrap()
    }

    #[test]
    fn test_absent_category_denies() {
        let mut grants = Grants::new();
        grants.grant(category("patient"), [action("view")]);
        assert!(grants.allows(&category("patient"), &action("view")));
        assert!(!grants.allows(&category("appointment"), &action("view")));
    }

    #[test]
    fn test_empty_set_denies() {
        let mut grants = Grants::new();
        grants.insert(category("role-management"), GrantSet::new());
        assert!(grants.actions(&category("role-management")).is_some());
        assert!(!grants.allows(&category("role-management"), &action("view")));
    }

    #[test]
    fn test_grant_extends_existing_entry() {
        let mut grants = Grants::new();
        grants.grant(category("exam"), [action("view")]);
        grants.grant(category("exam"), [action("create")]);
        assert_eq!(grants.actions(&category("exam")).unwrap().len(), 2);
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn test_deserialize_merges_duplicate_categories() {
        let grants: Grants =
            serde_json::from_str(r#"{"Patient": ["view"], "patient": ["create"]}"#).unwrap();
        assert_eq!(grants.len(), 1);
        assert!(grants.allows(&category("patient"), &action("view")));
        assert!(grants.allows(&category("patient"), &action("create")));
    }

    #[test]
    fn test_deserialize_normalizes_keys_and_values() {
        let grants: Grants =
            serde_json::from_str(r#"{" Patient ": ["VIEW", "create"]}"#).unwrap();
        assert!(grants.allows(&category("patient"), &action("view")));
        assert!(grants.allows(&category("patient"), &action("create")));
    }
}
