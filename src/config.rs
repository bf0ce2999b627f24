//! # Configuration Module
//!
//! This module provides the configuration injected into the banner engine:
//! the two entity names, the era transition and legacy ceiling, the commit
//! subject marker excluded from history, and extra exclusions for the file
//! walk.
//!
//! Configuration can be specified in a `.copyright-sync.toml` file or via the
//! `COPYRIGHT_SYNC_CONFIG` environment variable. Every key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::attribution::EraPolicy;
use crate::templates::BannerTemplate;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copyright-sync.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYRIGHT_SYNC_CONFIG";

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", ".egg", ".vscode", "build", "dist", "node_modules", ".npm"];

/// File names never maintained, whatever their extension.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[".gitignore", "LICENSE", "NOTICE", ".DS_Store", ".config"];

/// Commit subjects containing this text are not attribution evidence.
pub const DEFAULT_EXCLUDE_MARKER: &str = "update copyright";

/// Entity names printed in the copyright lines.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EntityConfig {
  /// Credited for commits before the transition.
  pub legacy: String,
  /// Credited for commits from the transition on.
  pub current: String,
}

impl Default for EntityConfig {
  fn default() -> Self {
    Self {
      legacy: "Sony Corporation".to_string(),
      current: "Sony Group Corporation".to_string(),
    }
  }
}

/// When the entity name changed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TransitionConfig {
  pub year: i32,
  /// First month of `year` credited to the current entity.
  pub month: u32,
  /// Legacy year ranges are always filled up to this year.
  pub legacy_ceiling: i32,
}

impl Default for TransitionConfig {
  fn default() -> Self {
    let policy = EraPolicy::default();
    Self {
      year: policy.transition_year,
      month: policy.transition_month,
      legacy_ceiling: policy.legacy_ceiling,
    }
  }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HistoryConfig {
  /// Commits whose subject contains this exact text are ignored.
  pub exclude_marker: String,
}

impl Default for HistoryConfig {
  fn default() -> Self {
    Self {
      exclude_marker: DEFAULT_EXCLUDE_MARKER.to_string(),
    }
  }
}

/// Exclusions added on top of the built-in lists.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExcludeConfig {
  /// Extra directory base names to prune.
  pub dirs: Vec<String>,
  /// Extra file base names to skip.
  pub files: Vec<String>,
  /// Glob patterns matched against paths relative to the root directory.
  pub patterns: Vec<String>,
}

/// Main configuration struct for copyright-sync.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub entities: EntityConfig,
  pub transition: TransitionConfig,
  pub history: HistoryConfig,
  pub exclude: ExcludeConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is out of range or malformed.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.entities.legacy.trim().is_empty() {
      return Err(invalid("entities.legacy", "entity name cannot be empty"));
    }
    if self.entities.current.trim().is_empty() {
      return Err(invalid("entities.current", "entity name cannot be empty"));
    }

    if !(1..=12).contains(&self.transition.month) {
      return Err(invalid(
        "transition.month",
        &format!("expected 1-12, got {}", self.transition.month),
      ));
    }

    // The legacy entity exists at least until the year before the rename.
    let last_legacy_year = self.transition.year.saturating_sub(1);
    if self.transition.legacy_ceiling < last_legacy_year {
      return Err(invalid(
        "transition.legacy-ceiling",
        &format!(
          "{} is before the last legacy year {}",
          self.transition.legacy_ceiling, last_legacy_year
        ),
      ));
    }

    if self.history.exclude_marker.trim().is_empty() {
      return Err(invalid("history.exclude-marker", "marker cannot be empty"));
    }

    for pattern in &self.exclude.patterns {
      if let Err(e) = glob::Pattern::new(pattern) {
        return Err(invalid("exclude.patterns", &format!("'{pattern}': {e}")));
      }
    }

    Ok(())
  }

  /// The era rule described by `[transition]`.
  pub const fn era_policy(&self) -> EraPolicy {
    EraPolicy {
      transition_year: self.transition.year,
      transition_month: self.transition.month,
      legacy_ceiling: self.transition.legacy_ceiling,
    }
  }

  /// The banner template described by `[entities]`.
  pub fn banner_template(&self) -> BannerTemplate {
    BannerTemplate::new(&self.entities.legacy, &self.entities.current)
  }

  /// Built-in excluded directory names plus `[exclude].dirs`.
  pub fn excluded_dirs(&self) -> Vec<String> {
    merge_names(DEFAULT_EXCLUDED_DIRS, &self.exclude.dirs)
  }

  /// Built-in excluded file names plus `[exclude].files`.
  pub fn excluded_files(&self) -> Vec<String> {
    merge_names(DEFAULT_EXCLUDED_FILES, &self.exclude.files)
  }
}

fn invalid(key: &str, message: &str) -> ConfigError {
  ConfigError::InvalidValue {
    key: key.to_string(),
    message: message.to_string(),
  }
}

fn merge_names(defaults: &[&str], extra: &[String]) -> Vec<String> {
  let mut names: Vec<String> = defaults.iter().map(|s| (*s).to_string()).collect();
  for name in extra {
    if !names.contains(name) {
      names.push(name.clone());
    }
  }
  names
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYRIGHT_SYNC_CONFIG` environment variable
/// 3. `.copyright-sync.toml` in the root directory
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or fall back to defaults.
///
/// An explicit `--config` path that does not exist is an error rather than a
/// silent fallback.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.entities.legacy, "Sony Corporation");
    assert_eq!(config.entities.current, "Sony Group Corporation");
    assert_eq!(config.era_policy(), EraPolicy::default());
    assert_eq!(config.history.exclude_marker, "update copyright");
    assert!(config.validate().is_ok());
    assert!(config.excluded_dirs().contains(&"node_modules".to_string()));
    assert!(config.excluded_files().contains(&"LICENSE".to_string()));
  }

  #[test]
  fn test_parse_full_config() {
    let config_content = concat!(
      "[entities]\n",
      "legacy = \"Acme Inc\"\n",
      "current = \"Acme Group Inc\"\n",
      "\n",
      "[transition]\n",
      "year = 2018\n",
      "month = 7\n",
      "legacy-ceiling = 2019\n",
      "\n",
      "[history]\n",
      "exclude-marker = \"bump headers\"\n",
      "\n",
      "[exclude]\n",
      "dirs = [\"third_party\"]\n",
      "files = [\"CHANGELOG\"]\n",
      "patterns = [\"generated/**\"]\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");
    assert!(config.validate().is_ok());

    let template = config.banner_template();
    assert_eq!(template.legacy_entity(), "Acme Inc");
    assert_eq!(template.current_entity(), "Acme Group Inc");
    assert_eq!(
      config.era_policy(),
      EraPolicy {
        transition_year: 2018,
        transition_month: 7,
        legacy_ceiling: 2019,
      }
    );
    assert_eq!(config.history.exclude_marker, "bump headers");
    assert!(config.excluded_dirs().contains(&"third_party".to_string()));
    assert!(config.excluded_dirs().contains(&".git".to_string()));
    assert!(config.excluded_files().contains(&"CHANGELOG".to_string()));
    assert_eq!(config.exclude.patterns, vec!["generated/**".to_string()]);
  }

  #[test]
  fn test_partial_config_keeps_defaults() {
    let config: Config = toml::from_str("[entities]\ncurrent = \"New Name\"\n").expect("parse");
    assert_eq!(config.entities.legacy, "Sony Corporation");
    assert_eq!(config.entities.current, "New Name");
    assert_eq!(config.transition, TransitionConfig::default());
  }

  #[test]
  fn test_unknown_key_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[entities]\nlegcy = \"typo\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_bad_month() {
    let mut config = Config::default();
    config.transition.month = 13;
    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "transition.month"));
  }

  #[test]
  fn test_validate_ceiling_before_transition() {
    let mut config = Config::default();
    config.transition.legacy_ceiling = 2010;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_extreme_transition_year() {
    let mut config = Config::default();
    config.transition.year = i32::MIN;
    config.transition.legacy_ceiling = i32::MIN;
    assert!(config.validate().is_ok());

    config.transition.year = i32::MAX;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_empty_entity() {
    let mut config = Config::default();
    config.entities.legacy = "  ".to_string();
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_bad_glob() {
    let mut config = Config::default();
    config.exclude.patterns = vec!["a/[".to_string()];
    let err = config.validate().expect_err("should fail");
    assert!(err.to_string().contains("exclude.patterns"));
  }

  #[test]
  fn test_merge_names_skips_duplicates() {
    let mut config = Config::default();
    config.exclude.dirs = vec!["build".to_string(), "vendor".to_string()];
    let dirs = config.excluded_dirs();
    assert_eq!(dirs.iter().filter(|d| *d == "build").count(), 1);
    assert!(dirs.contains(&"vendor".to_string()));
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "[history]\nexclude-marker = \"chore(headers)\"\n").expect("write config");

    let config = load_config(None, temp_dir.path(), false).expect("load should succeed");
    assert_eq!(config.history.exclude_marker, "chore(headers)");
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.copyright-sync.toml"));
    assert!(matches!(result.expect_err("should fail"), ConfigError::ReadError { .. }));
  }

  #[test]
  fn test_load_config_missing_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("nope.toml");
    assert!(load_config(Some(&missing), temp_dir.path(), false).is_err());
  }

  #[test]
  fn test_no_config_ignores_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "not = [valid").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("no-config should not read the file");
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }
}
