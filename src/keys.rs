//! Public-key presence for users.
//!
//! The parser never looks at keys. Callers that care whether a user can
//! actually log in build a [`KeyIndex`] for one keydir and pass it to
//! [`crate::User::has_key`] / [`crate::User::validate_key`]. Nothing is
//! cached globally, so configs backed by different keydirs can live side by
//! side.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Key types accepted in the first field of a public-key line.
const KEY_TYPES: &[&str] = &[
    "ssh-rsa",
    "ssh-dss",
    "ssh-ed25519",
    "ecdsa-sha2-nistp256",
    "ecdsa-sha2-nistp384",
    "ecdsa-sha2-nistp521",
    "sk-ssh-ed25519@openssh.com",
    "sk-ecdsa-sha2-nistp256@openssh.com",
];

/// Answers key questions about users by name.
pub trait KeyOracle {
    /// Whether `user` has at least one key.
    fn has_key(&self, user: &str) -> bool;

    /// Whether key slot `index` of `user` holds a well-formed public key.
    ///
    /// Fails with [`ConfigError::UnknownKeyIndex`] if the slot does not exist.
    fn validate_key(&self, user: &str, index: usize) -> Result<bool, ConfigError>;
}

/// Key files of one keydir, grouped by user name.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    dir: Option<PathBuf>,
    keys: HashMap<String, Vec<PathBuf>>,
}

impl KeyIndex {
    /// Index every `*.pub` file below `dir`.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ConfigError::NotFound {
                path: dir.display().to_string(),
            });
        }

        let pattern = dir.join("**").join("*.pub");
        let paths = glob::glob(&pattern.to_string_lossy()).map_err(|e| {
            ConfigError::OpenFailed {
                path: dir.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut index = KeyIndex {
            dir: Some(dir.to_path_buf()),
            keys: HashMap::new(),
        };
        for entry in paths {
            match entry {
                Ok(path) => index.add(path),
                Err(e) => warn!(event = "Keys", phase = "Scan", error = %e),
            }
        }
        for paths in index.keys.values_mut() {
            paths.sort();
        }

        info!(
            event = "Keys",
            phase = "Scan",
            dir = %dir.display(),
            users = index.keys.len()
        );
        Ok(index)
    }

    /// Build an index from explicit `(user, key path)` pairs, with no keydir.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PathBuf)>,
        S: Into<String>,
    {
        let mut index = KeyIndex::default();
        for (user, path) in entries {
            index.keys.entry(user.into()).or_default().push(path);
        }
        index
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Key files of `user`, in slot order.
    pub fn keys(&self, user: &str) -> &[PathBuf] {
        self.keys.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all users with at least one key.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Copy the key file at `source` into the keydir for `user`.
    ///
    /// The first key becomes `<user>.pub`, later ones `<user>@<n>.pub`.
    /// Returns the path of the copy.
    pub fn import_key<P: AsRef<Path>>(
        &mut self,
        user: &str,
        source: P,
    ) -> Result<PathBuf, ConfigError> {
        let source = source.as_ref();
        if !source.is_file() {
            return Err(ConfigError::KeyFileNotFound {
                path: source.display().to_string(),
            });
        }

        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| ConfigError::KeyFileNotCopyable {
                path: source.display().to_string(),
                reason: "key index has no keydir".to_string(),
            })?;

        let slot = self.keys(user).len();
        let file_name = if slot == 0 {
            format!("{user}.pub")
        } else {
            format!("{user}@{slot}.pub")
        };
        let target = dir.join(file_name);

        fs::copy(source, &target).map_err(|e| ConfigError::KeyFileNotCopyable {
            path: source.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(
            event = "Keys",
            phase = "Import",
            user = user,
            target = %target.display()
        );
        self.keys
            .entry(user.to_string())
            .or_default()
            .push(target.clone());
        Ok(target)
    }

    fn add(&mut self, path: PathBuf) {
        let Some(user) = user_from_key_path(&path) else {
            warn!(event = "Keys", phase = "Scan", path = %path.display(), "unusable key file name");
            return;
        };
        self.keys.entry(user).or_default().push(path);
    }
}

impl KeyOracle for KeyIndex {
    fn has_key(&self, user: &str) -> bool {
        !self.keys(user).is_empty()
    }

    fn validate_key(&self, user: &str, index: usize) -> Result<bool, ConfigError> {
        let path = self
            .keys(user)
            .get(index)
            .ok_or_else(|| ConfigError::UnknownKeyIndex {
                user: user.to_string(),
                index,
            })?;

        match fs::read_to_string(path) {
            Ok(text) => Ok(is_public_key(&text)),
            Err(e) => {
                warn!(event = "Keys", phase = "Validate", path = %path.display(), error = %e);
                Ok(false)
            }
        }
    }
}

/// The user a key file belongs to: the file stem, minus a trailing
/// `@suffix` unless the suffix looks like a mail domain.
pub fn user_from_key_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let user = match stem.rsplit_once('@') {
        Some((user, suffix)) if !suffix.contains('.') => user,
        _ => stem,
    };
    (!user.is_empty()).then(|| user.to_string())
}

/// Structural check of a single public-key line: known type, base64 body.
pub fn is_public_key(text: &str) -> bool {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let (Some(line), None) = (lines.next(), lines.next()) else {
        return false;
    };

    let mut fields = line.split_whitespace();
    let (Some(kind), Some(body)) = (fields.next(), fields.next()) else {
        return false;
    };

    KEY_TYPES.contains(&kind)
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}
