use super::*;
use crate::types::PermissionKind;
use crate::ErrorKind;
use yare::parameterized;

mod store;

const SAMPLE: &str = "\
@admins = alice
@devs = bob @admins

repo gitolite-admin
  RW+ = @admins

repo team/tools team/docs
  RW+ = @devs
  R = carol
  - master = bob
";

fn sample() -> Config {
    Config::parse(SAMPLE).unwrap()
}

fn names<'a, I: IntoIterator<Item = &'a Repository>>(repos: I) -> Vec<&'a str> {
    repos.into_iter().map(|r| r.name()).collect()
}

#[test]
fn test_parse_tables() {
    let config = sample();
    assert_eq!(config.groups().names().collect::<Vec<_>>(), vec!["admins", "devs"]);
    assert_eq!(
        names(config.repositories()),
        vec!["gitolite-admin", "team/tools", "team/docs"]
    );
    assert_eq!(
        config.users().names().collect::<Vec<_>>(),
        vec!["alice", "bob", "carol"]
    );
}

#[test]
fn test_from_str_matches_parse() {
    let config: Config = SAMPLE.parse().unwrap();
    assert_eq!(config, sample());
}

#[test]
fn test_round_trip() {
    let config = sample();
    let text = config.generate();
    let reparsed = Config::parse(&text).unwrap();
    assert_eq!(reparsed, config);
    assert_eq!(reparsed.generate(), text);
}

#[test]
fn test_round_trip_with_empty_group_and_repo() {
    let mut config = Config::new();
    config.create_or_find_group("empty");
    config.create_or_find_repository("bare");
    let reparsed = Config::parse(&config.to_string()).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn test_display_is_generate() {
    let config = sample();
    assert_eq!(config.to_string(), config.generate());
}

#[test]
fn test_parse_error_is_propagated() {
    let err = Config::parse("repo foo\n  RW+ alice\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedPermissionLine);
    assert_eq!(err.code(), 210);
}

#[test]
fn test_crlf_input() {
    let unix = sample();
    let windows = Config::parse(&SAMPLE.replace('\n', "\r\n")).unwrap();
    assert_eq!(unix, windows);
}

#[parameterized(
    admin_via_group = { "alice", "gitolite-admin", true },
    dev_not_admin = { "bob", "gitolite-admin", false },
    dev_via_group = { "bob", "team/tools", true },
    reader = { "carol", "team/docs", true },
    stranger = { "mallory", "team/tools", false },
    unknown_repo = { "alice", "nope", false },
)]
fn test_has_access(user: &str, repo: &str, expected: bool) {
    assert_eq!(sample().has_access(user, repo), expected);
}

#[test]
fn test_nested_group_does_not_grant() {
    // alice is in @admins, which is in @devs; @devs alone is not enough.
    let config = sample();
    assert!(!config.has_access("alice", "team/tools"));
}

#[test]
fn test_find_grant_reports_first_match() {
    let config = sample();
    let grant = config.find_grant("bob", "team/tools").unwrap();
    assert_eq!(grant.index, 0);
    assert_eq!(grant.permission.kind(), PermissionKind::ReadWritePlus);
    assert_eq!(grant.via, &Principal::group("devs"));
}

#[test]
fn test_deny_line_grants_access() {
    let config = Config::parse("repo secret\n  - = eve\n").unwrap();
    assert!(config.has_access("eve", "secret"));
    let grant = config.find_grant("eve", "secret").unwrap();
    assert_eq!(grant.permission.kind(), PermissionKind::Deny);
}

#[test]
fn test_repositories_for_user() {
    let config = sample();
    assert_eq!(
        names(config.repositories_for_user("bob")),
        vec!["team/tools", "team/docs"]
    );
    assert_eq!(names(config.repositories_for_user("alice")), vec!["gitolite-admin"]);
    assert!(config.repositories_for_user("mallory").is_empty());
}

#[test]
fn test_add_user_to_group_creates_entities() {
    let mut config = Config::new();
    config.add_user_to_group("ops", "dave").unwrap();
    assert!(config.user("dave").is_some());
    assert!(config.group("ops").unwrap().contains("dave"));
}

#[test]
fn test_add_duplicate_member_leaves_config_unchanged() {
    let mut config = sample();
    let before = config.clone();

    let err = config.add_user_to_group("admins", "alice").unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateMember {
            group: "admins".into(),
            member: "alice".into()
        }
    );

    // A group member with the same name also counts as a duplicate.
    let err = config.add_group_to_group("devs", "bob").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateMember);
    assert_eq!(config, before);
}

#[test]
fn test_add_group_to_group() {
    let mut config = sample();
    config.add_group_to_group("admins", "auditors").unwrap();
    assert!(config.group("auditors").unwrap().is_empty());
    assert_eq!(
        config.group("admins").unwrap().to_string(),
        "@admins = alice @auditors"
    );
}

#[test]
fn test_remove_member() {
    let mut config = sample();
    assert!(config.remove_member("devs", "bob"));
    assert!(!config.remove_member("devs", "bob"));
    assert!(!config.remove_member("nope", "bob"));
    assert!(config.user("bob").is_some());

    // Still matched directly by the `-` rule further down.
    let grant = config.find_grant("bob", "team/tools").unwrap();
    assert_eq!(grant.index, 2);
}

#[test]
fn test_delete_repository() {
    let mut config = sample();
    assert!(config.delete_repository("team/tools"));
    assert!(!config.delete_repository("team/tools"));
    assert!(config.find_repository("team/tools").is_none());
    assert_eq!(names(config.repositories()), vec!["gitolite-admin", "team/docs"]);
    assert!(config.find_repository("team/docs").is_some());
}

#[test]
fn test_add_permission_registers_principals() {
    let mut config = Config::new();
    config.add_permission(
        "new/repo",
        Permission::new(PermissionKind::Read, "")
            .with_principal(Principal::user("zoe"))
            .with_principal(Principal::group("readers")),
    );
    assert!(config.user("zoe").is_some());
    assert!(config.group("readers").is_some());
    assert!(config.has_access("zoe", "new/repo"));
    assert_eq!(config.find_repository("new/repo").unwrap().prefix(), Some("new"));
}

#[test]
fn test_repository_mut() {
    let mut config = sample();
    config
        .repository_mut("gitolite-admin")
        .unwrap()
        .add_permission(Permission::new(PermissionKind::Read, "").with_principal(Principal::user("alice")));
    assert_eq!(config.find_repository("gitolite-admin").unwrap().permissions().len(), 2);
    assert!(config.repository_mut("nope").is_none());
}

#[test]
fn test_create_or_find_is_idempotent() {
    let mut config = sample();
    config.create_or_find_group("admins");
    config.create_or_find_user("alice");
    config.create_or_find_repository("gitolite-admin");
    assert_eq!(config, sample());
}

#[test]
fn test_serialization() {
    let config = Config::parse("@g = a\nrepo r\n  RW+ = @g\n").unwrap();
    insta::assert_json_snapshot!(config, @r#"
{
  "groups": [
    {
      "name": "g",
      "members": [
        {
          "user": "a"
        }
      ]
    }
  ],
  "repositories": [
    {
      "name": "r",
      "permissions": [
        {
          "kind": "READ_WRITE_PLUS",
          "refex": "",
          "principals": [
            {
              "group": "g"
            }
          ]
        }
      ]
    }
  ],
  "users": [
    {
      "name": "a"
    }
  ]
}
"#);
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
