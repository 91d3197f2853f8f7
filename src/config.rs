//! The parsed configuration and everything you can do with it.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::generator;
use crate::parser::Parser;
use crate::resolver::{self, Grant};
use crate::store::{ConfigSink, ConfigSource, FileStore};
use crate::types::{Group, Groups, Permission, Principal, Repositories, Repository, User, Users};

/// Root of a parsed access-control configuration.
///
/// Owns the global tables of groups, repositories and users. Every user or
/// group mentioned anywhere in the text has exactly one entry here, and
/// member and permission lists refer to those entries by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    groups: Groups,
    #[serde(default)]
    repositories: Repositories,
    #[serde(default)]
    users: Users,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// Parse a full configuration text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        Parser::new(&mut config).parse_text(text)?;
        info!(
            event = "Parse",
            phase = "Done",
            groups = config.groups.len(),
            repositories = config.repositories.len(),
            users = config.users.len()
        );
        Ok(config)
    }

    /// Read the text from `source` and parse it.
    pub fn load<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let text = source.read()?;
        Config::parse(&text)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::load(&FileStore::new(path.as_ref()))
    }

    /// Write the canonical text to `sink`.
    pub fn save<S: ConfigSink + ?Sized>(&self, sink: &mut S) -> Result<(), ConfigError> {
        let text = self.generate();
        sink.write(&text)?;
        info!(event = "Save", phase = "Done", bytes = text.len());
        Ok(())
    }

    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.save(&mut FileStore::new(path.as_ref()))
    }

    /// Canonical text form. Parsing it yields an equal config.
    pub fn generate(&self) -> String {
        generator::generate(self)
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    pub fn find_repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    pub fn repository_mut(&mut self, name: &str) -> Option<&mut Repository> {
        self.repositories.get_mut(name)
    }

    pub fn create_or_find_group(&mut self, name: &str) -> &mut Group {
        self.groups.get_or_insert_with(name, || Group::new(name))
    }

    pub fn create_or_find_user(&mut self, name: &str) -> &User {
        self.users.get_or_insert_with(name, || User::new(name))
    }

    pub fn create_or_find_repository(&mut self, name: &str) -> &mut Repository {
        self.repositories
            .get_or_insert_with(name, || Repository::new(name))
    }

    /// Remove the repository called `name`. Returns whether it existed.
    pub fn delete_repository(&mut self, name: &str) -> bool {
        self.repositories.remove(name).is_some()
    }

    /// Make sure the user or group `principal` refers to has a table entry.
    pub(crate) fn register_principal(&mut self, principal: &Principal) {
        match principal {
            Principal::User(name) => {
                self.create_or_find_user(name);
            }
            Principal::Group(name) => {
                self.create_or_find_group(name);
            }
        }
    }

    /// Add user `user` to `group`, creating either if needed.
    ///
    /// Fails with [`ConfigError::DuplicateMember`] if `group` already has a
    /// member of that name; nothing is created in that case.
    pub fn add_user_to_group(&mut self, group: &str, user: &str) -> Result<(), ConfigError> {
        self.add_member(group, Principal::user(user))
    }

    /// Add group `member` to `group`, creating either if needed.
    pub fn add_group_to_group(&mut self, group: &str, member: &str) -> Result<(), ConfigError> {
        self.add_member(group, Principal::group(member))
    }

    fn add_member(&mut self, group: &str, member: Principal) -> Result<(), ConfigError> {
        if self.group(group).is_some_and(|g| g.contains(member.name())) {
            return Err(ConfigError::DuplicateMember {
                group: group.to_string(),
                member: member.name().to_string(),
            });
        }
        self.create_or_find_group(group);
        self.register_principal(&member);
        self.create_or_find_group(group).add_member(member)
    }

    /// Remove the member called `member` from `group`. Returns whether it was
    /// there. The member's own table entry is kept.
    pub fn remove_member(&mut self, group: &str, member: &str) -> bool {
        self.groups
            .get_mut(group)
            .and_then(|g| g.remove_member(member))
            .is_some()
    }

    /// Append `permission` to `repository`, creating the repository and
    /// registering its principals as needed.
    pub fn add_permission(&mut self, repository: &str, permission: Permission) {
        for principal in permission.principals() {
            self.register_principal(principal);
        }
        self.create_or_find_repository(repository)
            .add_permission(permission);
    }

    /// Whether `user` has access to `repository`. Unknown repositories deny.
    pub fn has_access(&self, user: &str, repository: &str) -> bool {
        self.find_grant(user, repository).is_some()
    }

    /// The permission entry that gives `user` access to `repository`.
    pub fn find_grant(&self, user: &str, repository: &str) -> Option<Grant<'_>> {
        let repository = self.find_repository(repository)?;
        resolver::find_grant(user, repository, &self.groups)
    }

    /// Repositories `user` has access to, in config order.
    pub fn repositories_for_user(&self, user: &str) -> Vec<&Repository> {
        self.repositories
            .iter()
            .filter(|repo| resolver::has_access(user, repo, &self.groups))
            .collect()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Config::parse(s)
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.generate())
    }
}

#[cfg(test)]
mod tests;
