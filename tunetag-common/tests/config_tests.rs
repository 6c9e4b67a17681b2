//! Integration tests for configuration resolution and graceful degradation
//!
//! Covers:
//! - Resolution priority: command line → TUNETAG_CONFIG → user file → defaults
//! - Missing or broken user config never prevents startup
//! - Explicitly named config files must load
//!
//! Tests that touch TUNETAG_CONFIG are marked #[serial] so they never run in
//! parallel with each other.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tunetag_common::config::{ConfigResolver, ConfigSource, TomlConfig, CONFIG_ENV_VAR};
use tunetag_common::{Error, TagAggregator};

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn resolver_without_user_file() -> ConfigResolver {
    ConfigResolver::new().with_user_config_path(None)
}

#[test]
#[serial]
fn test_no_config_uses_compiled_defaults() {
    env::remove_var(CONFIG_ENV_VAR);

    let (config, source) = resolver_without_user_file().resolve(None).unwrap();

    assert_eq!(source, ConfigSource::CompiledDefaults);
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_cli_argument_takes_precedence() {
    let dir = TempDir::new().unwrap();
    let cli = write_config(&dir, "cli.toml", "[logging]\nlevel = \"debug\"\n");
    let from_env = write_config(&dir, "env.toml", "[logging]\nlevel = \"warn\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let (config, source) = resolver_without_user_file().resolve(Some(&cli)).unwrap();

    assert_eq!(source, ConfigSource::CommandLine(cli));
    assert_eq!(config.logging.level, "debug");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_argument() {
    let dir = TempDir::new().unwrap();
    let from_env = write_config(&dir, "env.toml", "[matching]\nextension = \"midi\"\n");
    let user = write_config(&dir, "user.toml", "[logging]\nlevel = \"trace\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let (config, source) = ConfigResolver::new()
        .with_user_config_path(Some(user))
        .resolve(None)
        .unwrap();

    assert_eq!(source, ConfigSource::Environment(from_env));
    assert_eq!(config.matching.suffix(), ".midi");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    env::set_var(CONFIG_ENV_VAR, "  ");

    let (_, source) = resolver_without_user_file().resolve(None).unwrap();
    assert_eq!(source, ConfigSource::CompiledDefaults);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_user_config_file_is_loaded() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let user = write_config(&dir, "config.toml", "[playback]\ncommand = \"timidity\"\n");

    let (config, source) = ConfigResolver::new()
        .with_user_config_path(Some(user.clone()))
        .resolve(None)
        .unwrap();

    assert_eq!(source, ConfigSource::UserConfig(user));
    assert_eq!(config.playback.command.as_deref(), Some("timidity"));
}

#[test]
#[serial]
fn test_missing_user_config_falls_back() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();

    let (_, source) = ConfigResolver::new()
        .with_user_config_path(Some(dir.path().join("absent.toml")))
        .resolve(None)
        .unwrap();

    assert_eq!(source, ConfigSource::CompiledDefaults);
}

#[test]
#[serial]
fn test_broken_user_config_falls_back() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let user = write_config(&dir, "config.toml", "this is not [ toml");

    let (config, source) = ConfigResolver::new()
        .with_user_config_path(Some(user))
        .resolve(None)
        .unwrap();

    assert_eq!(source, ConfigSource::CompiledDefaults);
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_missing_explicit_config_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = resolver_without_user_file().resolve(Some(&missing)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_broken_env_config_is_error() {
    let dir = TempDir::new().unwrap();
    let broken = write_config(&dir, "broken.toml", "[matching]\nweights = \"heavy\"\n");
    env::set_var(CONFIG_ENV_VAR, &broken);

    let err = resolver_without_user_file().resolve(None).unwrap_err();
    assert!(matches!(err, Error::Toml(_)));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_full_config_drives_aggregation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "full.toml",
        r#"
[[categories]]
name = "weather"
tags = ["sunny", "rainy"]

[[categories]]
name = "season"
tags = ["spring", "winter"]

[[categories]]
name = "scene"
tags = ["forest", "beach"]

[[categories]]
name = "color"
tags = ["pink", "blue"]

[[categories]]
name = "animal"
tags = ["cat", "fish"]

[stickers.storm]
rainy = 2.0
winter = 1.0
fish = 0.5

[stickers.picnic]
sunny = 1.0
beach = 0.3
"#,
    );

    let config = TomlConfig::load(&path).unwrap();
    let catalog = config.catalog().unwrap();
    let target = TagAggregator::new(&catalog).aggregate(&["storm", "picnic"]);

    assert_eq!(
        target.tags(),
        &["rainy", "winter", "beach", "pink", "fish"].map(String::from)
    );
}
