// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::config::{self, Config};
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

/// Runs before any API client exists, so a broken URL can still be fixed.
/// `show` prints what other commands would use: file, then environment,
/// then `--api-url`.
pub fn handle(m: &clap::ArgMatches, api_url: Option<&str>) -> Result<()> {
    let path = config::config_path()?;
    match m.subcommand() {
        Some(("show", _)) => {
            let cfg = config::load()?.with_api_url(api_url)?;
            println!("{}", pretty_table(&["Key", "Value"], show_rows(&cfg)));
        }
        Some(("path", _)) => println!("{}", path.display()),
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?;
            set_value(&path, key, value)?;
            println!("Set {} in {}", key, path.display());
        }
        _ => {}
    }
    Ok(())
}

/// Reads the file at `path`, applies one key and writes it back.
pub fn set_value(path: &Path, key: &str, value: &str) -> Result<Config> {
    let mut cfg = config::load_from(path)?;
    cfg.set(key, value)?;
    config::save_to(path, &cfg)?;
    tracing::debug!(key, "config updated");
    Ok(cfg)
}

/// Key/value rows for `config show`; the token itself is never printed.
pub fn show_rows(cfg: &Config) -> Vec<Vec<String>> {
    let token = match &cfg.token {
        Some(_) => "(set)".to_string(),
        None => "(none)".to_string(),
    };
    vec![
        vec!["api_url".to_string(), cfg.api_url.clone()],
        vec!["token".to_string(), token],
        vec!["currency".to_string(), cfg.currency.clone()],
        vec!["timeout_secs".to_string(), cfg.timeout_secs.to_string()],
    ]
}
