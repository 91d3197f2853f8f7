use super::*;
use std::fs;

#[test]
fn test_load_from_str_source() {
    let config = Config::load(SAMPLE).unwrap();
    assert_eq!(config, sample());
}

#[test]
fn test_save_to_string_sink() {
    let mut out = String::from("stale");
    sample().save(&mut out).unwrap();
    assert_eq!(out, sample().generate());
}

#[test]
fn test_save_as_then_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitolite.conf");

    sample().save_as(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), sample().generate());
    assert_eq!(Config::load_file(&path).unwrap(), sample());
}

#[test]
fn test_save_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitolite.conf");
    fs::write(&path, "repo old\n  R = x\n").unwrap();

    let mut config = Config::load_file(&path).unwrap();
    config.delete_repository("old");
    config.create_or_find_repository("new");
    config.save_as(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "repo new\n\n");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_file(dir.path().join("absent.conf")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), 100);
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = sample()
        .save_as(dir.path().join("missing").join("gitolite.conf"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotWritable);
}
