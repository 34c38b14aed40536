//! Client settings and backend base-URL resolution.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use shared::protocol::{DEFAULT_ASK_PATH, DEFAULT_HISTORY_PATH};
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "qa_client.toml";
pub const FALLBACK_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicitly configured backend URL; wins over everything else.
    pub api_base_url: Option<String>,
    /// Origin the client was launched for; used when no explicit URL is set.
    pub origin: Option<String>,
    pub ask_path: String,
    pub history_path: String,
    pub request_timeout_secs: Option<u64>,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            origin: None,
            ask_path: DEFAULT_ASK_PATH.into(),
            history_path: DEFAULT_HISTORY_PATH.into(),
            request_timeout_secs: None,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    origin: Option<String>,
    ask_path: Option<String>,
    history_path: Option<String>,
    request_timeout_secs: Option<u64>,
    theme: Option<String>,
}

impl Settings {
    pub fn base_url(&self) -> String {
        resolve_base_url(self.api_base_url.as_deref(), self.origin.as_deref())
    }

    pub fn ask_url(&self) -> String {
        join_url(&self.base_url(), &self.ask_path)
    }

    pub fn history_url(&self) -> String {
        join_url(&self.base_url(), &self.history_path)
    }

    pub fn with_api_base_url(mut self, api_base_url: Option<String>) -> Self {
        if api_base_url.is_some() {
            self.api_base_url = api_base_url;
        }
        self
    }
}

/// Loads settings from `path` (or `qa_client.toml` in the working directory)
/// and the process environment.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let raw = fs::read_to_string(path).ok();
    load_settings_from(raw.as_deref(), |name| std::env::var(name).ok())
}

/// Layers defaults, then the TOML document, then environment lookups.
/// Malformed values leave the previous layer in place.
pub fn load_settings_from<F>(toml_source: Option<&str>, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if let Some(raw) = toml_source {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
            Err(err) => warn!("ignoring malformed settings file: {err}"),
        }
    }

    if let Some(v) = first_set(&env, &["QA_API_BASE_URL", "APP__API_BASE_URL"]) {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = first_set(&env, &["QA_ORIGIN", "APP__ORIGIN"]) {
        settings.origin = Some(v);
    }
    if let Some(v) = first_set(&env, &["APP__ASK_PATH"]) {
        settings.ask_path = v;
    }
    if let Some(v) = first_set(&env, &["APP__HISTORY_PATH"]) {
        settings.history_path = v;
    }
    if let Some(v) = first_set(&env, &["APP__REQUEST_TIMEOUT_SECS"]) {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v:?}: not a number of seconds"),
        }
    }
    if let Some(v) = first_set(&env, &["APP__THEME"]) {
        match Theme::parse(&v) {
            Some(theme) => settings.theme = theme,
            None => warn!("ignoring APP__THEME={v:?}: expected light or dark"),
        }
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = file_cfg.origin {
        settings.origin = Some(v);
    }
    if let Some(v) = file_cfg.ask_path {
        settings.ask_path = v;
    }
    if let Some(v) = file_cfg.history_path {
        settings.history_path = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.theme {
        match Theme::parse(&v) {
            Some(theme) => settings.theme = theme,
            None => warn!("ignoring theme {v:?} in settings file: expected light or dark"),
        }
    }
}

fn first_set<F>(env: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    // Later names win, matching the plain-then-APP__ override order.
    names
        .iter()
        .filter_map(|name| env(name).filter(|value| !value.trim().is_empty()))
        .last()
}

/// Picks the backend base URL. Never fails: the explicit URL wins, then the
/// origin, then [`FALLBACK_BASE_URL`]. Unusable candidates are skipped.
pub fn resolve_base_url(configured: Option<&str>, origin: Option<&str>) -> String {
    let candidates = [("configured", configured), ("origin", origin)];

    for (source, candidate) in candidates {
        let Some(raw) = candidate else {
            continue;
        };
        match normalize_base_url(raw) {
            Some(url) => return url,
            None if raw.trim().is_empty() => {}
            None => warn!(source, candidate = raw, "skipping unusable backend base url"),
        }
    }

    FALLBACK_BASE_URL.to_string()
}

/// Trims whitespace and trailing slashes; `None` unless the result is an
/// absolute http(s) URL with a host.
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }

    Some(trimmed.to_string())
}

/// Joins with exactly one `/` between base and path.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
