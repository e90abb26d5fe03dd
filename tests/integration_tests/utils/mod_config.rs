use phonecom_sdk::{QueryDefaults, SdkConfig, SdkError};
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

#[test]
fn explicit_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phonecom-sdk.toml");
    fs::write(&path, "[query]\npage_size = 20\nsequence = \"uuid\"\n\n[log]\nlevel = \"debug\"\n").unwrap();
    let cfg = SdkConfig::from_file(&path).unwrap();
    assert_eq!(cfg.query.page_size, 20);
    assert_eq!(cfg.query.sequence, "uuid");
    assert_eq!(cfg.query.chunk_size, QueryDefaults::default().chunk_size);
    assert_eq!(cfg.log.level, "debug");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = SdkConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SdkError::Io(_)));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(SdkConfig::from_toml_str("[query]\nchunk_size = 0\n"), Err(SdkError::Config(_))));
    assert!(matches!(SdkConfig::from_toml_str("[query\n"), Err(SdkError::Toml(_))));
}

#[test]
fn environment_overrides_file_values() {
    let mut cfg = SdkConfig::from_toml_str("[query]\nper_page = 30\n").unwrap();
    let env: HashMap<&str, &str> =
        [("PHONECOM_SDK_PER_PAGE", "40"), ("PHONECOM_SDK_LOG_DIR", "/tmp/phonecom-logs")].into();
    cfg.apply_env_overrides(|k| env.get(k).map(|v| (*v).to_string())).unwrap();
    assert_eq!(cfg.query.per_page, 40);
    assert_eq!(cfg.log.dir.as_deref(), Some(std::path::Path::new("/tmp/phonecom-logs")));

    let bad: HashMap<&str, &str> = [("PHONECOM_SDK_PAGE_SIZE", "lots")].into();
    assert!(cfg.apply_env_overrides(|k| bad.get(k).map(|v| (*v).to_string())).is_err());
}

#[test]
fn search_paths_put_explicit_first() {
    let dir = tempdir().unwrap();
    let explicit = dir.path().join("mine.toml");
    let paths = SdkConfig::search_paths(Some(&explicit));
    assert_eq!(paths.first(), Some(&explicit));
    assert!(paths.iter().skip(1).all(|p| p.ends_with("phonecom-sdk.toml") || p.is_absolute()));
}
