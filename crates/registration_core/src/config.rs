use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_ENDPOINT_URL: &str = "https://tu-api-endpoint.com/registro";
pub const SETTINGS_FILE: &str = "registration.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint_url: Url,
}

impl Settings {
    pub fn with_endpoint(raw: &str) -> anyhow::Result<Self> {
        Ok(Self {
            endpoint_url: parse_endpoint_url(raw)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint_url: Option<String>,
}

/// Defaults, then `registration.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::with_endpoint(DEFAULT_ENDPOINT_URL)?;

    if let Ok(raw) = fs::read_to_string(file) {
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
        if let Some(v) = file_cfg.endpoint_url {
            settings.endpoint_url = parse_endpoint_url(&v)?;
        }
    }

    for name in ["REGISTRATION_ENDPOINT_URL", "APP__ENDPOINT_URL"] {
        if let Some(v) = env(name).filter(|v| !v.trim().is_empty()) {
            settings.endpoint_url =
                parse_endpoint_url(&v).with_context(|| format!("invalid value in {name}"))?;
        }
    }

    Ok(settings)
}

pub fn parse_endpoint_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid registration endpoint url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "registration endpoint must use http or https, got '{}'",
            url.scheme()
        );
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
