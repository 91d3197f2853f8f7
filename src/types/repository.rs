//! Repositories and their permission lists.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::permission::Permission;
use super::registry::{Named, Registry};

/// A repository block target, e.g. `gitolite-admin` or `team/project`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Repository {
    name: String,
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl Repository {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Repository {
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    /// Full name, `prefix/suffix` or just the suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The part before the first `/`, if there is one.
    pub fn prefix(&self) -> Option<&str> {
        self.name
            .split_once('/')
            .map(|(prefix, _)| prefix)
            .filter(|prefix| !prefix.is_empty())
    }

    /// The part after the first `/`, or the whole name.
    pub fn suffix(&self) -> &str {
        self.name
            .split_once('/')
            .map_or(self.name.as_str(), |(_, suffix)| suffix)
    }

    /// Permissions in the order they were declared.
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn add_permission(&mut self, permission: Permission) {
        self.permissions.push(permission);
    }
}

impl Named for Repository {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Renders the canonical repository block, terminated by a blank line.
impl Display for Repository {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "repo {}", self.name)?;
        for permission in &self.permissions {
            writeln!(f, "  {permission}")?;
        }
        writeln!(f)
    }
}

/// All repositories of a config, in order of first appearance.
pub type Repositories = Registry<Repository>;
