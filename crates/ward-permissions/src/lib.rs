//! Role resolution and permission evaluation for Ward.
//!
//! A session resolves an actor id to an actor and role (found / synthetic
//! elevated / synthetic minimal), then answers deny-by-default queries of the
//! form "may this session perform `action` on `category`?".

pub mod engine;
pub mod matcher;
pub mod policy;
pub mod resolver;
pub mod templates;
pub mod types;

pub use engine::PermissionEvaluator;
pub use matcher::GrantMatcher;
pub use policy::FallbackPolicy;
pub use resolver::{find_actor, find_role, resolve_role};
pub use templates::RoleTemplate;
pub use types::*;
