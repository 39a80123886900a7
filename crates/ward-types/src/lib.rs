//! Shared types and error hierarchy for Ward.

pub mod error;
pub mod grants;
pub mod name;
pub mod record;

pub use error::{ConfigError, DirectoryError, EmptyName, PermissionError, WardError};
pub use grants::{GrantSet, Grants};
pub use name::{ActionKind, ResourceCategory, actions, categories, normalize};
pub use record::{Actor, Role};
