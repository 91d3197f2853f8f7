//! User principals.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ConfigError;
use crate::keys::KeyOracle;

use super::registry::Named;

/// A user, identified by name alone.
///
/// Two `User` values with the same name are the same logical user; the
/// canonical instance lives in [`crate::Config::users`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct User {
    name: String,
}

impl User {
    pub fn new<T: Into<String>>(name: T) -> Self {
        User { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ask `keys` whether this user has at least one public key.
    pub fn has_key<K: KeyOracle + ?Sized>(&self, keys: &K) -> bool {
        keys.has_key(&self.name)
    }

    /// Ask `keys` whether key slot `index` of this user holds a usable key.
    pub fn validate_key<K: KeyOracle + ?Sized>(
        &self,
        keys: &K,
        index: usize,
    ) -> Result<bool, ConfigError> {
        keys.validate_key(&self.name, index)
    }
}

impl Named for User {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}
