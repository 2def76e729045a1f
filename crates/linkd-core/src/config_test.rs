use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("LINKD_API_URL", "https://api.linkd.example/");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LINKD_ENV"));
}

#[test]
fn build_app_config_fails_without_api_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LINKD_API_URL"),
        "expected MissingEnvVar(LINKD_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_api_url_without_scheme() {
    let mut map = full_env();
    map.insert("LINKD_API_URL", "api.linkd.example");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LINKD_API_URL"),
        "expected InvalidEnvVar(LINKD_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.api_url, "https://api.linkd.example");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "linkd/0.1 (alumni-search)");
    assert_eq!(cfg.annotation_window, 6);
    assert!(cfg.user_email.is_none());
}

#[test]
fn build_app_config_upgrades_remote_http_url() {
    let mut map = full_env();
    map.insert("LINKD_API_URL", "http://api.linkd.example/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_url, "https://api.linkd.example");
}

#[test]
fn build_app_config_keeps_local_http_url() {
    let mut map = full_env();
    map.insert("LINKD_API_URL", "http://localhost:8000/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_url, "http://localhost:8000");
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("LINKD_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("LINKD_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LINKD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LINKD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = full_env();
    map.insert("LINKD_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn annotation_window_override() {
    let mut map = full_env();
    map.insert("LINKD_ANNOTATION_WINDOW", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.annotation_window, 0);
}

#[test]
fn annotation_window_invalid() {
    let mut map = full_env();
    map.insert("LINKD_ANNOTATION_WINDOW", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LINKD_ANNOTATION_WINDOW"),
        "expected InvalidEnvVar(LINKD_ANNOTATION_WINDOW), got: {result:?}"
    );
}

#[test]
fn user_email_blank_is_none() {
    let mut map = full_env();
    map.insert("LINKD_USER_EMAIL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.user_email.is_none());
}

#[test]
fn user_email_is_redacted_in_debug() {
    let mut map = full_env();
    map.insert("LINKD_USER_EMAIL", "ada@alumni.example");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_email.as_deref(), Some("ada@alumni.example"));
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("ada@alumni.example"), "{rendered}");
    assert!(rendered.contains("[redacted]"));
}
