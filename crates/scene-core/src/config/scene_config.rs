//! Top-level scene configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, ObservabilityConfig, ReconcileConfig, ValidationConfig};
use crate::constants::{ENV_PREFIX, MAX_REPAIR_PASSES_CEILING};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SCENE_*`)
/// 2. TOML file passed to [`SceneConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub reconcile: ReconcileConfig,
    pub validation: ValidationConfig,
    pub observability: ObservabilityConfig,
}

impl SceneConfig {
    /// Load configuration from an optional TOML file, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `SCENE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env_var("PRUNE_DANGLING") {
            self.reconcile.prune_dangling = parse_bool("reconcile.prune_dangling", &value)?;
        }
        if let Some(value) = env_var("EQUAL_STAMP_POLICY") {
            self.reconcile.equal_stamp_policy =
                value.parse().map_err(|message| ConfigError::ValidationFailed {
                    field: "reconcile.equal_stamp_policy".to_string(),
                    message,
                })?;
        }
        if let Some(value) = env_var("MAX_REPAIR_PASSES") {
            self.reconcile.max_repair_passes =
                value.parse().map_err(|_| ConfigError::ValidationFailed {
                    field: "reconcile.max_repair_passes".to_string(),
                    message: format!("`{value}` is not a positive integer"),
                })?;
        }
        if let Some(value) = env_var("LOG_LEVEL") {
            self.observability.log_level = value.to_ascii_lowercase();
        }
        if let Some(value) = env_var("LOG_JSON") {
            self.observability.json = parse_bool("observability.json", &value)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let passes = self.reconcile.max_repair_passes;
        if passes == 0 || passes > MAX_REPAIR_PASSES_CEILING {
            return Err(ConfigError::ValidationFailed {
                field: "reconcile.max_repair_passes".to_string(),
                message: format!("must be between 1 and {MAX_REPAIR_PASSES_CEILING}, got {passes}"),
            });
        }
        if !defaults::LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!(
                    "`{}` is not one of {}",
                    self.observability.log_level,
                    defaults::LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{suffix}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("`{value}` is not a boolean"),
        }),
    }
}
