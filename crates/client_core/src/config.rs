//! Client settings: built-in defaults, overlaid by an optional `towing.toml`
//! and then by environment variables.

use std::{collections::HashMap, fmt, fs, path::Path, str::FromStr, time::Duration};

use anyhow::Context;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "towing.toml";

/// How an incoming push notification is presented while the app is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushPresentation {
    Badge,
    Sound,
    Alert,
}

impl FromStr for PushPresentation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "badge" => Ok(Self::Badge),
            "sound" => Ok(Self::Sound),
            "alert" => Ok(Self::Alert),
            other => Err(anyhow::anyhow!("unknown push presentation option '{other}'")),
        }
    }
}

impl fmt::Display for PushPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Badge => "badge",
            Self::Sound => "sound",
            Self::Alert => "alert",
        })
    }
}

/// Remote web bundle the shell loads instead of the local `web_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveServer {
    pub url: String,
    pub cleartext: bool,
}

/// Declarative bundling and push settings for the mobile shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_id: String,
    pub app_name: String,
    pub web_dir: String,
    pub server: Option<LiveServer>,
    pub push_presentation: Vec<PushPresentation>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: "app.swifttow.fleet".into(),
            app_name: "swift-tow-fleet".into(),
            web_dir: "dist".into(),
            server: None,
            push_presentation: vec![
                PushPresentation::Badge,
                PushPresentation::Sound,
                PushPresentation::Alert,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub auth_delay_ms: u64,
    pub app: AppConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/towing.db".into(),
            auth_delay_ms: 1000,
            app: AppConfig::default(),
        }
    }
}

impl Settings {
    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Err(err) = apply_file(&mut settings, Path::new(DEFAULT_SETTINGS_FILE)) {
        warn!("ignoring {DEFAULT_SETTINGS_FILE}: {err:#}");
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

/// Overlays values from a flat TOML file. A missing file is not an error.
pub fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;

    let values = file_cfg
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect::<Vec<_>>()
                    .join(","),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect::<HashMap<_, _>>();

    apply_values(settings, |key| values.get(key).cloned());
    Ok(())
}

/// Overlays `TOWING_*` then `APP__*` environment variables; the latter win.
pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for prefix in ["TOWING_", "APP__"] {
        apply_values(settings, |key| {
            lookup(&format!("{prefix}{}", key.to_ascii_uppercase()))
        });
    }
}

fn apply_values(settings: &mut Settings, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("database_url") {
        settings.database_url = v;
    }
    if let Some(v) = get("auth_delay_ms") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.auth_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric auth_delay_ms"),
        }
    }
    if let Some(v) = get("app_id") {
        settings.app.app_id = v;
    }
    if let Some(v) = get("app_name") {
        settings.app.app_name = v;
    }
    if let Some(v) = get("web_dir") {
        settings.app.web_dir = v;
    }
    if let Some(v) = get("server_url") {
        let url = v.trim().to_string();
        settings.app.server = if url.is_empty() {
            None
        } else {
            let cleartext = settings
                .app
                .server
                .as_ref()
                .map(|server| server.cleartext)
                .unwrap_or(false);
            Some(LiveServer { url, cleartext })
        };
    }
    if let Some(v) = get("cleartext") {
        let cleartext = matches!(v.trim(), "true" | "1" | "yes");
        if let Some(server) = settings.app.server.as_mut() {
            server.cleartext = cleartext;
        }
    }
    if let Some(v) = get("push_presentation") {
        let mut options = Vec::new();
        for item in v.split(',').filter(|item| !item.trim().is_empty()) {
            match item.parse::<PushPresentation>() {
                Ok(option) if !options.contains(&option) => options.push(option),
                Ok(_) => {}
                Err(err) => warn!("{err}"),
            }
        }
        settings.app.push_presentation = options;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
