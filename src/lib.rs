// src/lib.rs
pub use classifier::classify;
pub use config::Config;
pub use error::{ConfigError, ErrorKind};
pub use generator::generate;
pub use keys::{KeyIndex, KeyOracle};
pub use parser::{LineKind, ParseState, Parser};
pub use resolver::{Grant, find_grant, has_access};
pub use store::{ConfigSink, ConfigSource, FileStore};
pub use types::{
    Group, Groups, Members, Named, Permission, PermissionKind, Principal, Registry, Repositories,
    Repository, User, Users,
};

pub mod classifier;
mod config;
mod error;
mod generator;
pub mod keys;
pub mod parser;
mod resolver;
mod store;
pub mod types;
