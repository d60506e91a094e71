// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketlens", "pocketlens"));

pub const ENV_API_URL: &str = "POCKETLENS_API_URL";
pub const ENV_TOKEN: &str = "POCKETLENS_TOKEN";
pub const KEYS: [&str; 4] = ["api_url", "token", "currency", "timeout_secs"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub currency: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".into(),
            token: None,
            currency: "EUR".into(),
            timeout_secs: 15,
        }
    }
}

impl Config {
    /// Environment variables win over the file.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                self.token = Some(token.trim().to_string());
            }
        }
        self
    }

    /// A `--api-url` given on the command line wins over file and environment.
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Result<Self> {
        if let Some(url) = api_url {
            self.set("api_url", url)?;
        }
        Ok(self)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(anyhow!("api_url must start with http:// or https://"));
                }
                self.api_url = value.trim_end_matches('/').to_string();
            }
            "token" => {
                self.token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "currency" => {
                self.currency = crate::editor::validate_currency(value)?;
            }
            "timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout '{}'", value))?;
                if secs == 0 {
                    return Err(anyhow!("timeout_secs must be at least 1"));
                }
                self.timeout_secs = secs;
            }
            other => {
                return Err(anyhow!(
                    "Unknown config key '{}' (use {})",
                    other,
                    KEYS.join("|")
                ));
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

pub fn load() -> Result<Config> {
    Ok(load_from(&config_path()?)?.apply_env())
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("Read config at {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Parse config at {}", path.display()))
}

pub fn save_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config dir")?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)
        .with_context(|| format!("Write config at {}", path.display()))
}
