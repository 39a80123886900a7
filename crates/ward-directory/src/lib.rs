//! Actor and role directory snapshots for Ward.
//!
//! This is the boundary where untyped JSON snapshots become typed
//! [`Actor`](ward_types::Actor) and [`Role`](ward_types::Role) records.

pub mod snapshot;
pub mod store;

pub use snapshot::{parse_actors, parse_roles};
pub use store::{Directory, DirectoryStore};
