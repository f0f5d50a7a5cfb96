//! Domain types and validators for dem settings.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::imgset::validate_root;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_ROOT: &str = "/var/lib/dem";
pub const DEFAULT_RUNTIME_CONFIG: &str = "/etc/default/docker";
pub const DEFAULT_SERVICE: &str = "docker";
pub const DEFAULT_SERVICE_MANAGER: &str = "service";
pub const DEFAULT_SYSTEM_DIR: &str = "/var/lib/docker";
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "root",
    "runtime-config",
    "service",
    "service-manager",
    "system-dir",
    "command-timeout",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Settings stored in `~/.dem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DemConfig {
    /// Directory holding one subdirectory per imgset plus the `current` link.
    pub root: PathBuf,
    /// Runtime configuration file whose `DOCKER_OPTS` line is rewritten.
    pub runtime_config: PathBuf,
    /// Service restarted after the config changes.
    pub service: String,
    /// Program invoked as `<manager> <service> restart`.
    pub service_manager: String,
    /// Runtime's own data root, exposed as the `system` imgset.
    pub system_dir: PathBuf,
    /// Upper bound for any external command, in seconds.
    #[serde(rename = "command-timeout")]
    pub command_timeout_secs: u64,
}

impl Default for DemConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            runtime_config: PathBuf::from(DEFAULT_RUNTIME_CONFIG),
            service: DEFAULT_SERVICE.to_string(),
            service_manager: DEFAULT_SERVICE_MANAGER.to_string(),
            system_dir: PathBuf::from(DEFAULT_SYSTEM_DIR),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl DemConfig {
    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "root" => self.root = PathBuf::from(value),
            "runtime-config" => self.runtime_config = PathBuf::from(value),
            "service" => self.service = value.to_string(),
            "service-manager" => self.service_manager = value.to_string(),
            "system-dir" => self.system_dir = PathBuf::from(value),
            "command-timeout" => self.command_timeout_secs = parse_timeout(key, value)?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }

    /// Key/value pairs in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("root", self.root.display().to_string()),
            ("runtime-config", self.runtime_config.display().to_string()),
            ("service", self.service.clone()),
            ("service-manager", self.service_manager.clone()),
            ("system-dir", self.system_dir.display().to_string()),
            ("command-timeout", self.command_timeout_secs.to_string()),
        ]
    }
}

/// Parse the settings file.
///
/// Besides the YAML mapping, a file holding nothing but an absolute path is
/// accepted and taken as the root directory.
///
/// # Errors
///
/// Returns an error if the content is neither a settings mapping nor a path.
pub fn parse_settings(content: &str) -> Result<DemConfig> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(DemConfig::default());
    }
    if !trimmed.contains('\n') && Path::new(trimmed).is_absolute() && !trimmed.contains(':') {
        return Ok(DemConfig {
            root: PathBuf::from(trimmed),
            ..DemConfig::default()
        });
    }
    Ok(serde_yaml::from_str(content)?)
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |hint: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    };
    match key {
        "root" => {
            if !Path::new(value).is_absolute() {
                return Err(invalid("Expected an absolute path.").into());
            }
            if validate_root(Path::new(value)).is_err() {
                return Err(invalid("Whitespace and double quotes are not allowed in the root.").into());
            }
        }
        "runtime-config" | "system-dir" => {
            if !Path::new(value).is_absolute() {
                return Err(invalid("Expected an absolute path.").into());
            }
        }
        "service" | "service-manager" => {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(invalid("Expected a single word.").into());
            }
        }
        "command-timeout" => {
            parse_timeout(key, value)?;
        }
        _ => {}
    }
    Ok(())
}

fn parse_timeout(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: "Expected a positive number of seconds.".to_string(),
        }
        .into()),
    }
}
