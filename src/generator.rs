//! Canonical text output.
//!
//! All group lines first, in table order, then a blank line if there were
//! any, then one block per repository. Comments and source spacing are
//! not preserved.

use std::fmt::Write;

use tracing::debug;

use crate::config::Config;

pub fn generate(config: &Config) -> String {
    let mut out = String::new();

    for group in config.groups() {
        let _ = writeln!(out, "{group}");
    }
    if !config.groups().is_empty() {
        out.push('\n');
    }

    for repository in config.repositories() {
        let _ = write!(out, "{repository}");
    }

    debug!(
        event = "Generate",
        groups = config.groups().len(),
        repositories = config.repositories().len(),
        bytes = out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Permission, PermissionKind, Principal};
    use insta::assert_snapshot;

    #[test]
    fn test_generate_empty() {
        assert_eq!(generate(&Config::new()), "");
    }

    #[test]
    fn test_generate_groups_only() {
        let mut config = Config::new();
        config.add_user_to_group("admins", "alice").unwrap();
        config.create_or_find_group("empty");
        assert_eq!(generate(&config), "@admins = alice\n@empty\n\n");
    }

    #[test]
    fn test_generate_normalizes_layout() {
        let config = Config::parse(
            "# header\n@admins   =  alice   bob\n\nrepo  foo bar  # two at once\n    rw+   =   @admins\n  R master = carol\n",
        )
        .unwrap();
        assert_snapshot!(generate(&config), @r"
@admins = alice bob

repo foo
  RW+ = @admins
  R master = carol

repo bar
  RW+ = @admins
  R master = carol
");
    }

    #[test]
    fn test_generate_built_config() {
        let mut config = Config::new();
        config.add_group_to_group("staff", "admins").unwrap();
        config.add_user_to_group("admins", "alice").unwrap();
        config.add_permission(
            "team/tools",
            Permission::new(PermissionKind::ReadWritePlus, "refs/heads/")
                .with_principal(Principal::group("staff"))
                .with_principal(Principal::user("bob")),
        );
        config.add_permission("team/tools", Permission::new(PermissionKind::Deny, "master"));
        config.create_or_find_repository("empty");
        assert_snapshot!(generate(&config), @r"
@staff = @admins
@admins = alice

repo team/tools
  RW+ refs/heads/ = @staff bob
  - master =

repo empty
");
    }
}
