use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context};

pub const SETTINGS_FILE: &str = "billed.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Memory,
    Disabled,
    Http(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_url: String,
    pub session_file: String,
    pub request_timeout_seconds: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: "memory".into(),
            session_file: "./session.json".into(),
            request_timeout_seconds: 10,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }

    pub fn store_target(&self) -> anyhow::Result<StoreTarget> {
        parse_store_target(&self.store_url)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_settings(&mut settings, &raw);
    }
    apply_env_settings(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("store_url") {
        settings.store_url = v.clone();
    }
    if let Some(v) = file_cfg.get("session_file") {
        settings.session_file = v.clone();
    }
    if let Some(v) = file_cfg.get("request_timeout_seconds") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

fn apply_env_settings(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("BILLED_STORE_URL") {
        settings.store_url = v;
    }
    if let Some(v) = env("APP__STORE_URL") {
        settings.store_url = v;
    }

    if let Some(v) = env("BILLED_SESSION_FILE") {
        settings.session_file = v;
    }
    if let Some(v) = env("APP__SESSION_FILE") {
        settings.session_file = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

pub fn parse_store_target(raw: &str) -> anyhow::Result<StoreTarget> {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "" | "memory" => Ok(StoreTarget::Memory),
        "none" => Ok(StoreTarget::Disabled),
        lower if lower.starts_with("http://") || lower.starts_with("https://") => {
            Ok(StoreTarget::Http(raw.to_string()))
        }
        _ => bail!("unsupported store url '{raw}': expected memory, none or an http(s) url"),
    }
}

pub fn load_session(path: &Path) -> anyhow::Result<shared::domain::Session> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid session record in '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
