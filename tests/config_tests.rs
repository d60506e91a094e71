// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketlens::commands::settings::{set_value, show_rows};
use pocketlens::config::{Config, load_from, save_to};
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let cfg = load_from(&dir.path().join("nope.json")).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.currency, "EUR");
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"api_url":"https://example.test/api"}"#).unwrap();
    let cfg = load_from(&path).unwrap();
    assert_eq!(cfg.api_url, "https://example.test/api");
    assert_eq!(cfg.timeout_secs, 15);
}

#[test]
fn set_value_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    set_value(&path, "api_url", "https://money.example/api/").unwrap();
    set_value(&path, "currency", "usd").unwrap();
    set_value(&path, "token", "s3cret").unwrap();

    let cfg = load_from(&path).unwrap();
    assert_eq!(cfg.api_url, "https://money.example/api");
    assert_eq!(cfg.currency, "USD");
    assert_eq!(cfg.token.as_deref(), Some("s3cret"));

    set_value(&path, "token", "").unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("token"));
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = Config::default();
    assert!(cfg.set("api_url", "ftp://nope").is_err());
    assert!(cfg.set("timeout_secs", "0").is_err());
    assert!(cfg.set("timeout_secs", "abc").is_err());
    assert!(cfg.set("currency", "EURO").is_err());
    assert!(cfg.set("colour", "red").is_err());
    assert_eq!(cfg, Config::default());

    cfg.set("timeout_secs", "30").unwrap();
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let cfg = Config {
        timeout_secs: 5,
        ..Config::default()
    };
    save_to(&path, &cfg).unwrap();
    assert_eq!(load_from(&path).unwrap(), cfg);
}

#[test]
fn shown_settings_include_the_command_line_url() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    set_value(&path, "api_url", "https://file.example/api").unwrap();
    set_value(&path, "token", "s3cret").unwrap();

    let from_file = load_from(&path).unwrap();
    let kept = from_file.clone().with_api_url(None).unwrap();
    assert_eq!(kept.api_url, "https://file.example/api");

    let cfg = from_file
        .clone()
        .with_api_url(Some("https://flag.example/v2/"))
        .unwrap();
    let rows = show_rows(&cfg);
    assert_eq!(rows[0], ["api_url", "https://flag.example/v2"]);
    assert_eq!(rows[1], ["token", "(set)"]);
    assert!(rows.iter().flatten().all(|v| v != "s3cret"));

    assert!(from_file.with_api_url(Some("file:///tmp")).is_err());
}
