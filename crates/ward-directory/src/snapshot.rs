//! Parsing and validation of directory snapshots.
//!
//! A snapshot is either an array of records or an object keyed by record id.
//! Records that can't be used are skipped with a warning rather than failing
//! the whole load; only a snapshot of the wrong overall shape is an error.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use ward_types::{ActionKind, Actor, DirectoryError, GrantSet, Grants, ResourceCategory, Role};

/// Parse an actor snapshot. Actors without an id are skipped.
pub fn parse_actors(path: &Path, snapshot: Value) -> Result<Vec<Actor>, DirectoryError> {
    let mut actors = Vec::new();
    for record in records(path, snapshot)? {
        match serde_json::from_value::<Actor>(Value::Object(record)) {
            Ok(actor) if actor.id.is_empty() => {
                tracing::warn!("Skipping actor with empty id in {}", path.display());
            }
            Ok(actor) => actors.push(actor),
            Err(e) => {
                tracing::warn!("Skipping malformed actor in {}: {}", path.display(), e);
            }
        }
    }
    Ok(actors)
}

/// Raw role record before grant validation.
#[derive(Debug, Deserialize)]
struct RoleRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "permissions")]
    grants: Value,
}

/// Parse a role snapshot, validating each role's grant map.
pub fn parse_roles(path: &Path, snapshot: Value) -> Result<Vec<Role>, DirectoryError> {
    let mut roles = Vec::new();
    for record in records(path, snapshot)? {
        let record = match serde_json::from_value::<RoleRecord>(Value::Object(record)) {
            Ok(record) if record.id.is_empty() => {
                tracing::warn!("Skipping role with empty id in {}", path.display());
                continue;
            }
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping malformed role in {}: {}", path.display(), e);
                continue;
            }
        };
        let grants = validate_grants(&record.id, record.grants);
        let mut role = Role::new(record.id, record.name, grants);
        role.description = record.description;
        roles.push(role);
    }
    Ok(roles)
}

/// Convert an untyped grant map into [`Grants`].
///
/// A category whose value is not an array of strings is dropped, which makes
/// it deny exactly like an absent category. Blank action strings are ignored.
fn validate_grants(role_id: &str, raw: Value) -> Grants {
    let entries = match raw {
        Value::Null => return Grants::new(),
        Value::Object(entries) => entries,
        other => {
            tracing::warn!(role = role_id, "Grants are not an object: {}", other);
            return Grants::new();
        }
    };

    let mut grants = Grants::new();
    for (name, value) in entries {
        let Some(category) = ResourceCategory::parse(&name) else {
            tracing::warn!(role = role_id, "Skipping blank grant category");
            continue;
        };
        match action_set(&value) {
            Some(actions) => {
                grants.grant(category, actions);
            }
            None => {
                tracing::warn!(
                    role = role_id,
                    category = %category,
                    "Malformed grant, treating category as absent"
                );
            }
        }
    }
    grants
}

fn action_set(value: &Value) -> Option<GrantSet> {
    let items = value.as_array()?;
    let mut actions = GrantSet::new();
    for item in items {
        actions.extend(ActionKind::parse(item.as_str()?));
    }
    Some(actions)
}

/// Flatten a snapshot into its record objects, filling `id` from the key
/// for keyed snapshots.
fn records(path: &Path, snapshot: Value) -> Result<Vec<Map<String, Value>>, DirectoryError> {
    match snapshot {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                other => {
                    tracing::warn!(
                        "Skipping non-object record in {}: {}",
                        path.display(),
                        other
                    );
                    None
                }
            })
            .collect()),
        Value::Object(entries) => Ok(entries
            .into_iter()
            .filter_map(|(key, item)| match item {
                Value::Object(mut record) => {
                    if !record.get("id").is_some_and(Value::is_string) {
                        record.insert("id".to_string(), Value::String(key));
                    }
                    Some(record)
                }
                other => {
                    tracing::warn!(
                        "Skipping non-object record '{}' in {}: {}",
                        key,
                        path.display(),
                        other
                    );
                    None
                }
            })
            .collect()),
        other => Err(DirectoryError::Shape {
            path: path.display().to_string(),
            message: format!("expected an array or object, found {}", kind(&other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
