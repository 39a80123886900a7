//! Directory snapshots backed by JSON files.

use crate::snapshot::{parse_actors, parse_roles};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use ward_types::{Actor, DirectoryError, Role};

const ACTORS_FILE: &str = "actors.json";
const ROLES_FILE: &str = "roles.json";

/// Fully loaded actor and role directories.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub actors: Vec<Actor>,
    pub roles: Vec<Role>,
}

/// File-based directory store: `actors.json` and `roles.json` in `dir`.
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn actors_path(&self) -> PathBuf {
        self.dir.join(ACTORS_FILE)
    }

    pub fn roles_path(&self) -> PathBuf {
        self.dir.join(ROLES_FILE)
    }

    /// Load the actor directory. A missing file is an empty directory.
    pub async fn load_actors(&self) -> Result<Vec<Actor>, DirectoryError> {
        let path = self.actors_path();
        match read_snapshot(&path).await? {
            Some(snapshot) => parse_actors(&path, snapshot),
            None => Ok(Vec::new()),
        }
    }

    /// Load the role directory. A missing file is an empty directory.
    pub async fn load_roles(&self) -> Result<Vec<Role>, DirectoryError> {
        let path = self.roles_path();
        match read_snapshot(&path).await? {
            Some(snapshot) => parse_roles(&path, snapshot),
            None => Ok(Vec::new()),
        }
    }

    /// Load both directories.
    pub async fn load(&self) -> Result<Directory, DirectoryError> {
        let actors = self.load_actors().await?;
        let roles = self.load_roles().await?;
        tracing::debug!(
            actors = actors.len(),
            roles = roles.len(),
            "Loaded directory from {}",
            self.dir.display()
        );
        Ok(Directory { actors, roles })
    }

    /// Replace the role snapshot (atomic write: .tmp → rename).
    pub async fn save_roles(&self, roles: &[Role]) -> Result<(), DirectoryError> {
        self.write_snapshot(&self.roles_path(), roles).await
    }

    /// Insert roles, replacing existing records with the same id.
    /// Returns the number of records that were replaced.
    ///
    /// Works on the raw snapshot: records other than the replaced ones are
    /// written back untouched, including fields and grants the loader would
    /// not accept, and a keyed snapshot stays keyed.
    pub async fn upsert_roles(&self, incoming: Vec<Role>) -> Result<usize, DirectoryError> {
        let path = self.roles_path();
        let mut snapshot = match read_snapshot(&path).await? {
            None | Some(Value::Null) => Value::Array(Vec::new()),
            Some(snapshot) => snapshot,
        };
        let mut replaced = 0;

        for role in incoming {
            let record = serde_json::to_value(&role).map_err(|e| serialize_error(&path, e))?;
            match &mut snapshot {
                Value::Array(items) => match items
                    .iter_mut()
                    .find(|item| record_id(item) == Some(role.id.as_str()))
                {
                    Some(existing) => {
                        *existing = record;
                        replaced += 1;
                    }
                    None => items.push(record),
                },
                Value::Object(entries) => {
                    let key = entries
                        .iter()
                        .find(|(key, item)| record_id(item).unwrap_or(key.as_str()) == role.id)
                        .map(|(key, _)| key.clone());
                    match key {
                        Some(key) => {
                            entries.insert(key, record);
                            replaced += 1;
                        }
                        None => {
                            entries.insert(role.id.clone(), record);
                        }
                    }
                }
                _ => {
                    return Err(DirectoryError::Shape {
                        path: path.display().to_string(),
                        message: "expected an array or object".to_string(),
                    });
                }
            }
        }

        self.write_snapshot(&path, &snapshot).await?;
        Ok(replaced)
    }

    async fn write_snapshot<T: Serialize + ?Sized>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), DirectoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let tmp_path = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(value).map_err(|e| serialize_error(path, e))?;
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

/// The string `id` field of a raw record, if it has one.
fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn serialize_error(path: &Path, e: serde_json::Error) -> DirectoryError {
    DirectoryError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

async fn read_snapshot(path: &Path) -> Result<Option<Value>, DirectoryError> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|e| DirectoryError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
