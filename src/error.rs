use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(
    name(ErrorKind),
    derive(Display, EnumString, Hash, Serialize, Deserialize),
    strum(serialize_all = "snake_case"),
    serde(rename_all = "snake_case")
)]
pub enum ConfigError {
    #[error("gitolite config {path} does not exist")]
    NotFound { path: String },

    #[error("gitolite config {path} is not readable")]
    NotReadable { path: String },

    #[error("gitolite config {path} could not be opened: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("gitolite config {path} is not writable")]
    NotWritable { path: String },

    #[error("could not parse group in line #{line}: {text}")]
    MalformedGroup { line: usize, text: String },

    #[error("could not parse permission in line #{line}: {text}")]
    MalformedPermissionLine { line: usize, text: String },

    #[error("could not parse permission type in line #{line}: {text}")]
    MalformedPermissionType { line: usize, text: String },

    #[error("unknown permission type in line #{line}: {token}")]
    UnknownPermissionType { line: usize, token: String },

    #[error("user {user} has no key with index {index}")]
    UnknownKeyIndex { user: String, index: usize },

    #[error("group {group} already contains a member named {member}")]
    DuplicateMember { group: String, member: String },

    #[error("key file {path} does not exist")]
    KeyFileNotFound { path: String },

    #[error("key file {path} could not be copied: {reason}")]
    KeyFileNotCopyable { path: String, reason: String },
}

impl ConfigError {
    /// The stable, fieldless kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.into()
    }

    /// Numeric code, stable across releases.
    pub fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 100,
            ErrorKind::NotReadable => 110,
            ErrorKind::OpenFailed => 130,
            ErrorKind::NotWritable => 140,
            ErrorKind::MalformedGroup => 200,
            ErrorKind::MalformedPermissionLine => 210,
            ErrorKind::MalformedPermissionType => 215,
            ErrorKind::UnknownPermissionType => 218,
            ErrorKind::UnknownKeyIndex => 300,
            ErrorKind::DuplicateMember => 400,
            ErrorKind::KeyFileNotFound => 410,
            ErrorKind::KeyFileNotCopyable => 420,
        }
    }
}
