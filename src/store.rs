//! Where configuration text comes from and where generated text goes.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

/// Supplies the full configuration text.
pub trait ConfigSource {
    fn read(&self) -> Result<String, ConfigError>;
}

/// Accepts generated configuration text.
pub trait ConfigSink {
    fn write(&mut self, text: &str) -> Result<(), ConfigError>;
}

impl ConfigSource for str {
    fn read(&self) -> Result<String, ConfigError> {
        Ok(self.to_string())
    }
}

impl ConfigSource for String {
    fn read(&self) -> Result<String, ConfigError> {
        Ok(self.clone())
    }
}

/// An in-memory sink; each write replaces the previous contents.
impl ConfigSink for String {
    fn write(&mut self, text: &str) -> Result<(), ConfigError> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

/// A config file on disk, usable as both source and sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

impl ConfigSource for FileStore {
    fn read(&self) -> Result<String, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound {
                path: self.display(),
            });
        }

        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            IoErrorKind::PermissionDenied => ConfigError::NotReadable {
                path: self.display(),
            },
            _ => ConfigError::OpenFailed {
                path: self.display(),
                reason: e.to_string(),
            },
        })?;

        debug!(event = "Store", phase = "Read", path = %self.path.display(), bytes = text.len());
        Ok(text)
    }
}

impl ConfigSink for FileStore {
    fn write(&mut self, text: &str) -> Result<(), ConfigError> {
        let read_only = fs::metadata(&self.path)
            .map(|m| m.permissions().readonly())
            .unwrap_or(false);
        if read_only {
            return Err(ConfigError::NotWritable {
                path: self.display(),
            });
        }

        fs::write(&self.path, text).map_err(|_| ConfigError::NotWritable {
            path: self.display(),
        })?;

        debug!(event = "Store", phase = "Write", path = %self.path.display(), bytes = text.len());
        Ok(())
    }
}
