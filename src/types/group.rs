//! Group entities and their member lists.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ConfigError;

use super::principal::Principal;
use super::registry::{Named, Registry};

/// Members of a group, keyed by member name, in insertion order.
pub type Members = Registry<Principal>;

/// A named group (`@admins`).
///
/// Nesting is structural: a member may itself be a group, and it is kept
/// as a group reference rather than flattened.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Group {
    name: String,
    #[schema(value_type = Vec<Principal>)]
    members: Members,
}

impl Group {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Group {
            name: name.into(),
            members: Members::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Direct membership test by member name.
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Add `member`, failing if a member of the same name is already present.
    ///
    /// The group is left untouched on error.
    pub fn add_member(&mut self, member: Principal) -> Result<(), ConfigError> {
        if self.members.contains(member.name()) {
            return Err(ConfigError::DuplicateMember {
                group: self.name.clone(),
                member: member.name().to_string(),
            });
        }
        self.members.insert(member);
        Ok(())
    }

    /// Add `member` unless a member of the same name exists. Used while
    /// parsing, where repeated names on a group line collapse silently.
    pub(crate) fn create_or_find_member(&mut self, member: Principal) -> &Principal {
        let name = member.name().to_string();
        self.members.get_or_insert_with(&name, || member)
    }

    pub fn remove_member(&mut self, name: &str) -> Option<Principal> {
        self.members.remove(name)
    }
}

impl Named for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Renders the canonical group line: `@name` or `@name = a @b`.
impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "@{}", self.name)?;
        if !self.members.is_empty() {
            write!(f, " = {}", self.members.iter().join(" "))?;
        }
        Ok(())
    }
}

/// All groups of a config, in order of first appearance.
pub type Groups = Registry<Group>;
