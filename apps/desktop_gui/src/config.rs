use std::{collections::HashMap, env, fs};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Local dev default; hosted deployments override via file/env.
            api_base_url: "http://localhost:7071/api".into(),
        }
    }
}

/// Layered resolution: defaults, then an optional `zipcast.toml` in the
/// working directory, then environment variables. A `--api-url` CLI flag
/// applied by the caller wins over all of these.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("zipcast.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = env::var("ZIPCAST_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_base_url") {
            settings.api_base_url = v.clone();
        }
    }
}

/// Validates the configured base URL and strips any trailing slash so
/// endpoint paths can be appended uniformly. An empty value falls back to
/// the default.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(Settings::default().api_base_url);
    }

    let parsed =
        url::Url::parse(raw).with_context(|| format!("invalid API base URL '{raw}'"))?;
    anyhow::ensure!(
        matches!(parsed.scheme(), "http" | "https"),
        "API base URL must be http or https: '{raw}'"
    );

    Ok(raw.trim_end_matches('/').to_string())
}
