//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Onboarding date (drives the new-user social gate)
//! - Baseline life score for reflection previews
//! - Log level
//!
//! Configuration is stored at `~/.config/operator-standard/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::gate;

/// Profile configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Day the user started with the app.
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
}

/// Night reflection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionConfig {
    #[serde(default = "default_life_score")]
    pub life_score: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing directive, overridden by RUST_LOG.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/operator-standard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub reflection: ReflectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_life_score() -> i32 {
    50
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            life_score: default_life_score(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(invalid("config key is empty".to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as number: {e}")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value in memory. Returns error if key is unknown or the
    /// value does not fit the field.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Days in app as of `today`, if an onboarding date is configured.
    pub fn days_in_app(&self, today: NaiveDate) -> Option<u32> {
        self.profile
            .started_on
            .map(|started_on| gate::days_in_app(started_on, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.reflection.life_score, 50);
        assert_eq!(parsed.logging.level, "info");
        assert!(parsed.profile.started_on.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[profile]\nstarted_on = \"2026-02-01\"\n").unwrap();
        assert_eq!(
            parsed.profile.started_on,
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
        assert_eq!(parsed.reflection.life_score, 50);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("reflection.life_score").as_deref(), Some("50"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("info"));
        assert_eq!(cfg.get("profile.started_on").as_deref(), Some("null"));
        assert!(cfg.get("logging.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_number() {
        let mut cfg = Config::default();
        cfg.set_value("reflection.life_score", "72").unwrap();
        assert_eq!(cfg.reflection.life_score, 72);
    }

    #[test]
    fn set_value_updates_optional_date() {
        let mut cfg = Config::default();
        cfg.set_value("profile.started_on", "2026-05-10").unwrap();
        assert_eq!(cfg.profile.started_on, NaiveDate::from_ymd_opt(2026, 5, 10));
        assert_eq!(
            cfg.days_in_app(NaiveDate::from_ymd_opt(2026, 5, 12).unwrap()),
            Some(3)
        );
    }

    #[test]
    fn set_value_rejects_bad_date() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("profile.started_on", "yesterday").is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "logging.nonexistent_key", "value");
        assert!(result.is_err());
        let result = Config::set_json_value_by_path(&mut json, "", "value");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "reflection.life_score", "high");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.reflection.life_score, 50);
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set_value("logging.level", "debug").unwrap();
        cfg.set_value("profile.started_on", "2026-01-15").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.logging.level, "debug");
        assert_eq!(reloaded.profile.started_on, NaiveDate::from_ymd_opt(2026, 1, 15));
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reflection = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
