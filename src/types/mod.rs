//! Data model for parsed access-control configuration.
//!
//! Canonical text forms:
//! - User: `alice`
//! - Group: `@admins`, defined as `@admins = alice @leads`
//! - Repository: `repo team/project`
//! - Permission: `RW+ refs/heads/ = alice @admins`
//!
//! Entities are owned by the tables of [`crate::Config`]; member and
//! principal lists refer to them by name.

mod group;
mod permission;
mod principal;
mod registry;
mod repository;
mod user;

pub use group::{Group, Groups, Members};
pub use permission::{Permission, PermissionKind};
pub use principal::Principal;
pub use registry::{Named, Registry};
pub use repository::{Repositories, Repository};
pub use user::User;

/// All users of a config, in order of first appearance.
pub type Users = Registry<User>;
