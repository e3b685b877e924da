use super::*;

use std::collections::HashMap;

#[test]
fn defaults_match_shipped_bundle() {
    let settings = Settings::default();
    assert_eq!(settings.auth_delay(), Duration::from_secs(1));
    assert_eq!(settings.app.app_name, "swift-tow-fleet");
    assert_eq!(settings.app.web_dir, "dist");
    assert!(settings.app.server.is_none());
    assert_eq!(
        settings.app.push_presentation,
        vec![
            PushPresentation::Badge,
            PushPresentation::Sound,
            PushPresentation::Alert
        ]
    );
}

#[test]
fn missing_file_leaves_defaults_untouched() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings::default();
    apply_file(&mut settings, &temp.path().join("towing.toml")).expect("missing file is fine");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_overlay_defaults() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("towing.toml");
    fs::write(
        &path,
        r#"
database_url = "sqlite://./tmp/app.db"
auth_delay_ms = 0
server_url = "https://preview.example.com?forceHideBadge=true"
cleartext = true
push_presentation = ["alert", "sound", "alert"]
"#,
    )
    .expect("write config");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path).expect("apply");

    assert_eq!(settings.database_url, "sqlite://./tmp/app.db");
    assert_eq!(settings.auth_delay(), Duration::ZERO);
    assert_eq!(
        settings.app.server,
        Some(LiveServer {
            url: "https://preview.example.com?forceHideBadge=true".into(),
            cleartext: true,
        })
    );
    assert_eq!(
        settings.app.push_presentation,
        vec![PushPresentation::Alert, PushPresentation::Sound]
    );
}

#[test]
fn malformed_file_is_reported() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("towing.toml");
    fs::write(&path, "database_url = ").expect("write config");

    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, &path).is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_towing_prefix() {
    let env = HashMap::from([
        ("TOWING_DATABASE_URL", "sqlite://first.db"),
        ("APP__DATABASE_URL", "sqlite://second.db"),
        ("TOWING_AUTH_DELAY_MS", "250"),
        ("APP__APP_NAME", "tow-dev"),
    ]);

    let mut settings = Settings::default();
    apply_env(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.database_url, "sqlite://second.db");
    assert_eq!(settings.auth_delay_ms, 250);
    assert_eq!(settings.app.app_name, "tow-dev");
}

#[test]
fn non_numeric_delay_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |name| {
        (name == "APP__AUTH_DELAY_MS").then(|| "soon".to_string())
    });
    assert_eq!(settings.auth_delay_ms, 1000);
}

#[test]
fn cleartext_without_server_url_is_dropped() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |name| {
        (name == "APP__CLEARTEXT").then(|| "true".to_string())
    });
    assert!(settings.app.server.is_none());
}
