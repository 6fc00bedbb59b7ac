use directus_source::transform::{ItemShape, KeyCase};
use directus_source::{DirectusOptions, FailurePolicy, SourceError};
use serde_json::json;
use serial_test::serial;
use std::env;

#[test]
fn test_defaults_match_plugin_defaults() {
    let options = DirectusOptions::default();

    assert_eq!(options.project, "_");
    assert!(options.camel_case);
    assert!(!options.shallow_camel_case);
    assert!(options.pascal_types);
    assert!(!options.legacy_fields);
    assert!(!options.debug);
    assert!(options.routes.is_empty());
    assert_eq!(options.failure_policy, FailurePolicy::Continue);
    assert_eq!(options.key_case(), KeyCase::Deep);
    assert_eq!(options.item_shape(), ItemShape::Flat);
}

#[test]
fn test_from_value_reads_camel_case_keys() {
    let options = DirectusOptions::from_value(json!({
        "url": "https://cms.example.com",
        "project": "site",
        "token": "abc",
        "shallowCamelCase": true,
        "pascalTypes": false,
        "legacyFields": true,
        "failurePolicy": "abortRemaining",
        "routes": { "blog_posts": "/blog/:slug" },
    }))
    .expect("options parse");

    assert_eq!(options.url, "https://cms.example.com");
    assert_eq!(options.project, "site");
    assert_eq!(options.key_case(), KeyCase::Shallow);
    assert_eq!(options.item_shape(), ItemShape::Legacy);
    assert_eq!(options.failure_policy, FailurePolicy::AbortRemaining);
    assert_eq!(options.type_name("blog_posts"), "blog_posts");
    assert_eq!(options.routes.get("blog_posts").map(String::as_str), Some("/blog/:slug"));
}

#[test]
fn test_camel_case_off_preserves_keys_even_when_shallow() {
    let options = DirectusOptions::from_json_str(r#"{ "camelCase": false, "shallowCamelCase": true }"#)
        .expect("options parse");
    assert_eq!(options.key_case(), KeyCase::Preserve);
}

#[test]
fn test_malformed_options_are_config_errors() {
    let result = DirectusOptions::from_value(json!({ "camelCase": "yes" }));
    assert!(matches!(result, Err(SourceError::Config(_))));

    let result = DirectusOptions::from_value(json!({ "failurePolicy": "retry" }));
    assert!(matches!(result, Err(SourceError::Config(_))));
}

#[test]
fn test_credentials_require_url_and_token_or_login() {
    let with = |url: &str, token: &str, email: &str, password: &str| DirectusOptions {
        url: url.to_string(),
        token: token.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        ..DirectusOptions::default()
    };

    assert!(with("https://cms", "t", "", "").has_credentials());
    assert!(with("https://cms", "", "a@b.c", "pw").has_credentials());
    assert!(!with("https://cms", "", "a@b.c", "").has_credentials());
    assert!(!with("", "t", "a@b.c", "pw").has_credentials());
    assert!(!with("", "", "", "").has_credentials());
}

#[test]
fn test_debug_output_redacts_secrets() {
    let options = DirectusOptions {
        password: "hunter2".to_string(),
        token: "secret-token".to_string(),
        ..DirectusOptions::default()
    };

    let debug = format!("{options:?}");

    assert!(!debug.contains("hunter2"));
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("password_set: true"));
}

#[test]
#[serial]
fn test_from_env_reads_connection_settings() {
    env::set_var("DIRECTUS_URL", "https://env.example.com");
    env::set_var("DIRECTUS_PROJECT", "envsite");
    env::set_var("DIRECTUS_TOKEN", "env-token");
    env::remove_var("DIRECTUS_EMAIL");
    env::remove_var("DIRECTUS_PASSWORD");

    let options = DirectusOptions::from_env();

    assert_eq!(options.url, "https://env.example.com");
    assert_eq!(options.project, "envsite");
    assert_eq!(options.token, "env-token");
    assert!(options.has_credentials());
    assert!(options.camel_case);

    env::remove_var("DIRECTUS_URL");
    env::remove_var("DIRECTUS_PROJECT");
    env::remove_var("DIRECTUS_TOKEN");
}
