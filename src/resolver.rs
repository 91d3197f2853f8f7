//! Repository access resolution.
//!
//! A user has access to a repository when any permission of that
//! repository names the user directly, or names a group the user is a
//! direct member of. The kind of the matching permission is not
//! consulted, so a `-` rule naming the user still counts as a match. Rule
//! order carries no precedence; a match anywhere in the list grants.
//! Membership is not followed through nested groups.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{Groups, Permission, Principal, Repository};

/// The permission entry that made [`find_grant`] succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant<'a> {
    /// Position of the permission within the repository's list.
    pub index: usize,
    pub permission: &'a Permission,
    /// The principal entry of that permission that matched.
    pub via: &'a Principal,
}

/// Names of the groups whose member list has an entry called `user`.
///
/// The lookup is by name only, so a group member `@alice` counts for user
/// `alice` too.
pub fn direct_groups<'g>(user: &str, groups: &'g Groups) -> HashSet<&'g str> {
    groups
        .iter()
        .filter(|group| group.contains(user))
        .map(|group| group.name())
        .collect()
}

/// The first permission entry of `repository` that matches `user`.
pub fn find_grant<'r>(user: &str, repository: &'r Repository, groups: &Groups) -> Option<Grant<'r>> {
    let memberships = direct_groups(user, groups);

    debug!(
        event = "Access",
        phase = "Memberships",
        user = user,
        repository = repository.name(),
        groups = memberships.len()
    );

    for (index, permission) in repository.permissions().iter().enumerate() {
        for principal in permission.principals() {
            let matched = match principal {
                Principal::User(name) => name == user,
                Principal::Group(name) => memberships.contains(name.as_str()),
            };
            if matched {
                debug!(
                    event = "Access",
                    phase = "Match",
                    user = user,
                    repository = repository.name(),
                    permission = %permission,
                    via = %principal
                );
                return Some(Grant {
                    index,
                    permission,
                    via: principal,
                });
            }
        }
    }

    debug!(
        event = "Access",
        phase = "NoMatch",
        user = user,
        repository = repository.name()
    );
    None
}

/// Whether `user` has access to `repository`.
pub fn has_access(user: &str, repository: &Repository, groups: &Groups) -> bool {
    find_grant(user, repository, groups).is_some()
}
