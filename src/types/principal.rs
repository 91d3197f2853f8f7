//! Principal type that can be either a User or a Group.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::registry::Named;

/// A user or group reference, as it appears in a group's member list or a
/// permission's principal list.
///
/// Principals refer to entities by name; the entities themselves live in the
/// global tables of [`crate::Config`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    User(String),
    Group(String),
}

impl Principal {
    pub fn user<T: Into<String>>(name: T) -> Self {
        Principal::User(name.into())
    }

    pub fn group<T: Into<String>>(name: T) -> Self {
        Principal::Group(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Principal::User(name) | Principal::Group(name) => name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Principal::Group(_))
    }
}

impl Named for Principal {
    fn name(&self) -> &str {
        Principal::name(self)
    }
}

/// Renders the config-file form: `alice` or `@admins`.
impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Principal::User(name) => write!(f, "{name}"),
            Principal::Group(name) => write!(f, "@{name}"),
        }
    }
}
