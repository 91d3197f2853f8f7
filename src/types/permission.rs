//! Permission rules attached to repositories.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};
use utoipa::ToSchema;

use super::principal::Principal;

/// The access a permission line grants (or, for `-`, names).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    StrumDisplay,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionKind {
    #[strum(serialize = "-")]
    Deny,
    #[strum(serialize = "R")]
    Read,
    #[strum(serialize = "RW")]
    ReadWrite,
    #[strum(serialize = "RW+")]
    ReadWritePlus,
}

/// One permission line: a kind, an optional ref pattern, and the principals
/// it names, in source order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Permission {
    kind: PermissionKind,
    /// Ref pattern the rule is narrowed to; empty applies to all refs.
    #[serde(default)]
    refex: String,
    principals: Vec<Principal>,
}

impl Permission {
    pub fn new<S: Into<String>>(kind: PermissionKind, refex: S) -> Self {
        Permission {
            kind,
            refex: refex.into(),
            principals: Vec::new(),
        }
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principals.push(principal);
        self
    }

    pub fn kind(&self) -> PermissionKind {
        self.kind
    }

    pub fn refex(&self) -> &str {
        &self.refex
    }

    pub fn principals(&self) -> &[Principal] {
        &self.principals
    }

    pub(crate) fn push_principal(&mut self, principal: Principal) {
        self.principals.push(principal);
    }
}

/// Renders the canonical permission line body, e.g. `RW+ master = alice @devs`.
///
/// Empty parts are dropped so a missing ref leaves no double space.
impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let principals = self.principals.iter().join(" ");
        let line = [self.kind.as_ref(), self.refex.as_str(), "=", principals.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .join(" ");
        write!(f, "{line}")
    }
}
