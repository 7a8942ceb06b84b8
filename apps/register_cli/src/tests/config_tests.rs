use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
server_url = "https://api.example.com/v1"
request_timeout_secs = 5
"#,
    )
    .expect("parse");

    assert_eq!(settings.server_url, "https://api.example.com/v1");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.event_queue_capacity, 64);
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = \"soon\"").is_err());
}

#[test]
fn app_prefixed_env_wins_and_bad_numbers_are_ignored() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("REGISTER_SERVER_URL", "http://legacy:8000"),
        ("APP__SERVER_URL", "http://app:9000"),
        ("APP__REQUEST_TIMEOUT_SECS", "never"),
        ("APP__EVENT_QUEUE_CAPACITY", "0"),
    ]);
    let mut settings = Settings::default();

    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://app:9000");
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.event_queue_capacity, 1);
}

#[test]
fn zero_timeout_and_capacity_are_raised_to_one() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "request_timeout_secs = 0\nevent_queue_capacity = 0\n",
    )
    .expect("parse");
    assert_eq!(settings.request_timeout_secs, 1);
    assert_eq!(settings.event_queue_capacity, 1);
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| {
        (key == "APP__REQUEST_TIMEOUT_SECS").then(|| "0".to_string())
    });
    assert_eq!(settings.request_timeout_secs, 1);
}

#[test]
fn server_url_must_be_http() {
    let mut settings = Settings::default();
    assert_eq!(
        settings.server_url().expect("default url").as_str(),
        "http://127.0.0.1:8000/"
    );

    settings.server_url = "ftp://files.example.com".into();
    assert!(settings.server_url().is_err());

    settings.server_url = "not a url".into();
    assert!(settings.server_url().is_err());
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("register_cli_missing_{suffix}.toml"));

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.request_timeout_secs, Settings::default().request_timeout_secs);
}

#[test]
fn settings_file_is_read_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("register_cli_settings_{suffix}.toml"));
    std::fs::write(&path, "event_queue_capacity = 8\n").expect("write");

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.event_queue_capacity, 8);

    std::fs::remove_file(path).expect("cleanup");
}
