//! Line-oriented parser for gitolite-style access control configuration.
//!
//! The grammar is fixed and line based:
//!
//! ```text
//! @admins = alice bob     # group definition
//! repo foo bar            # opens a repo block for foo and bar
//!   RW+ = @admins         # permission, applies to every repo of the block
//!   R   master = carol
//! ```
//!
//! The only state carried from one line to the next is [`ParseState`]: the
//! set of repositories the following permission lines apply to.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::classifier;
use crate::config::Config;
use crate::error::ConfigError;
use crate::types::{Permission, PermissionKind, Principal};

static GROUP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@([A-Za-z0-9_-]+)\s*(?:=\s*(.*))?$").expect("group line pattern is valid")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\n|\r").expect("line break pattern is valid"));

/// Characters that may make up a permission kind token.
fn is_kind_char(c: char) -> bool {
    matches!(c, '-' | '+' | 'R' | 'W' | 'r' | 'w')
}

/// Where the parser stands between two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParseState {
    /// Outside any repo block; only group and repo lines mean anything.
    #[default]
    Top,
    /// Inside the block opened by the most recent `repo` line.
    InRepoBlock(Vec<String>),
}

impl ParseState {
    /// Repositories the next permission line applies to.
    pub fn active_repositories(&self) -> &[String] {
        match self {
            ParseState::Top => &[],
            ParseState::InRepoBlock(repos) => repos,
        }
    }

    fn from_repositories(repos: Vec<String>) -> Self {
        if repos.is_empty() {
            ParseState::Top
        } else {
            ParseState::InRepoBlock(repos)
        }
    }
}

/// How a single line was understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty, whitespace-only or comment-only.
    Blank,
    Group,
    Repo,
    Permission,
    /// Not a group or repo line and no repo block is open. Accepted and
    /// skipped.
    Ignored,
}

/// Feeds lines into a [`Config`], one at a time.
pub struct Parser<'a> {
    config: &'a mut Config,
    state: ParseState,
}

impl<'a> Parser<'a> {
    pub fn new(config: &'a mut Config) -> Self {
        Parser {
            config,
            state: ParseState::Top,
        }
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// Parse a whole text. Stops at the first error.
    pub fn parse_text(&mut self, text: &str) -> Result<(), ConfigError> {
        for (i, line) in split_lines(text).enumerate() {
            self.parse_line(i + 1, line)?;
        }
        Ok(())
    }

    /// Parse one line; `number` is 1-based and only used for error reporting.
    ///
    /// Group and repo lines are only recognized in the first column; an
    /// indented line inside a repo block is always a permission line.
    pub fn parse_line(&mut self, number: usize, raw: &str) -> Result<LineKind, ConfigError> {
        let line = strip_comment(raw);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(LineKind::Blank);
        }

        if line.starts_with('@') {
            self.state = ParseState::Top;
            self.parse_group(number, raw, trimmed)?;
            return Ok(LineKind::Group);
        }

        if let Some(list) = repo_list(line) {
            self.parse_repositories(number, list);
            return Ok(LineKind::Repo);
        }

        if let ParseState::InRepoBlock(repos) = &self.state {
            let permission = parse_permission(number, raw, trimmed)?;
            for principal in permission.principals() {
                self.config.register_principal(principal);
            }
            for repo in repos {
                self.config
                    .create_or_find_repository(repo)
                    .add_permission(permission.clone());
            }
            debug!(
                event = "Parse",
                phase = "Permission",
                line = number,
                kind = %permission.kind(),
                refex = permission.refex(),
                repositories = repos.len()
            );
            return Ok(LineKind::Permission);
        }

        warn!(event = "Parse", phase = "Ignored", line = number, text = raw);
        Ok(LineKind::Ignored)
    }

    fn parse_group(&mut self, number: usize, raw: &str, line: &str) -> Result<(), ConfigError> {
        let captures = GROUP_LINE
            .captures(line)
            .ok_or_else(|| ConfigError::MalformedGroup {
                line: number,
                text: raw.to_string(),
            })?;

        let name = captures[1].to_string();
        let members = classifier::classify(captures.get(2).map_or("", |m| m.as_str()));
        if !has_valid_group_names(&members) {
            return Err(ConfigError::MalformedGroup {
                line: number,
                text: raw.to_string(),
            });
        }

        self.config.create_or_find_group(&name);
        for member in &members {
            self.config.register_principal(member);
            self.config
                .create_or_find_group(&name)
                .create_or_find_member(member.clone());
        }

        debug!(
            event = "Parse",
            phase = "Group",
            line = number,
            group = name.as_str(),
            members = members.len()
        );
        Ok(())
    }

    fn parse_repositories(&mut self, number: usize, list: &str) {
        let repos: Vec<String> = list.split_whitespace().map(str::to_string).collect();
        for repo in &repos {
            self.config.create_or_find_repository(repo);
        }
        debug!(
            event = "Parse",
            phase = "Repo",
            line = number,
            repositories = repos.len()
        );
        self.state = ParseState::from_repositories(repos);
    }
}

/// The repository list of a `repo` line, or `None` if `line` is not one.
fn repo_list(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("repo")?;
    match rest.chars().next() {
        None => Some(""),
        Some(c) if c.is_whitespace() => Some(rest.trim()),
        Some(_) => None,
    }
}

/// Parse the body of a permission line such as `RW+ master = alice @devs`.
///
/// `raw` is only used for error messages. The returned permission carries
/// classified principals that are not yet registered anywhere.
pub fn parse_permission(number: usize, raw: &str, line: &str) -> Result<Permission, ConfigError> {
    let (left, principals) =
        line.split_once('=')
            .ok_or_else(|| ConfigError::MalformedPermissionLine {
                line: number,
                text: raw.to_string(),
            })?;

    let left = left.trim();
    if left.is_empty() {
        return Err(ConfigError::MalformedPermissionType {
            line: number,
            text: raw.to_string(),
        });
    }

    let run = left.find(|c: char| !is_kind_char(c)).unwrap_or(left.len());
    let token = if run == 0 {
        left.split_whitespace().next().unwrap_or(left)
    } else {
        &left[..run]
    };
    let kind = PermissionKind::from_str(&token.to_uppercase()).map_err(|_| {
        ConfigError::UnknownPermissionType {
            line: number,
            token: token.to_string(),
        }
    })?;

    let principals = classifier::classify(principals);
    if !has_valid_group_names(&principals) {
        return Err(ConfigError::MalformedPermissionLine {
            line: number,
            text: raw.to_string(),
        });
    }

    let mut permission = Permission::new(kind, left[run..].trim());
    for principal in principals {
        permission.push_principal(principal);
    }
    Ok(permission)
}

/// Group references must be writable back as group lines.
fn has_valid_group_names(principals: &[Principal]) -> bool {
    principals.iter().all(|p| match p {
        Principal::Group(name) => classifier::is_group_name(name),
        Principal::User(_) => true,
    })
}

/// Cut `line` at the first `#` that is not escaped with a backslash.
pub fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '#' if !escaped => return &line[..i],
            _ => escaped = false,
        }
    }
    line
}

/// Split on `\n`, `\r\n` or a lone `\r`.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    LINE_BREAK.split(text)
}
