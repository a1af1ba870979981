use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use shared::domain::UserType;

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        r#"
store_url = "https://bills.example.test/v1"
session_file = "/tmp/user.json"
request_timeout_seconds = "3"
"#,
    );

    assert_eq!(settings.store_url, "https://bills.example.test/v1");
    assert_eq!(settings.session_file, "/tmp/user.json");
    assert_eq!(settings.request_timeout(), Duration::from_secs(3));
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_settings_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "store_url = [1, 2");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let mut settings = Settings::default();
    apply_env_settings(&mut settings, |key| match key {
        "BILLED_STORE_URL" => Some("none".into()),
        "APP__STORE_URL" => Some("http://127.0.0.1:5678".into()),
        "APP__REQUEST_TIMEOUT_SECONDS" => Some("not-a-number".into()),
        "APP__LOG_FILTER" => Some("debug".into()),
        _ => None,
    });

    assert_eq!(settings.store_url, "http://127.0.0.1:5678");
    assert_eq!(settings.request_timeout_seconds, 10);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn parses_store_targets() {
    assert_eq!(parse_store_target("memory").expect("memory"), StoreTarget::Memory);
    assert_eq!(parse_store_target("").expect("empty"), StoreTarget::Memory);
    assert_eq!(parse_store_target("NONE").expect("none"), StoreTarget::Disabled);
    assert_eq!(
        parse_store_target("http://localhost:5678").expect("http"),
        StoreTarget::Http("http://localhost:5678".into())
    );
    assert!(parse_store_target("ftp://localhost").is_err());
}

#[test]
fn loads_persisted_session_record() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("billed_session_test_{suffix}.json"));
    fs::write(&path, r#"{"type":"Admin","email":"admin@test.tld"}"#).expect("write session");

    let session = load_session(&path).expect("session");

    assert_eq!(session.user_type, UserType::Admin);
    assert_eq!(session.email, "admin@test.tld");
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_session_file_names_the_path() {
    let err = load_session(Path::new("/definitely/missing/session.json"))
        .expect_err("must fail");
    assert!(err.to_string().contains("/definitely/missing/session.json"));
}
