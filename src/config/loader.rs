// file: src/config/loader.rs
// version: 1.0.0
// guid: 52968adc-c1e4-41b3-aa4b-18f8cd589bce

//! Configuration file loading and environment variable substitution

use super::BridgeConfig;
use crate::error::{Result, TransferError};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TRANSFER_BRIDGE_CONFIG";

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Load configuration from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<BridgeConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TransferError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        let config: BridgeConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&expanded)?,
            _ if expanded.trim().is_empty() => BridgeConfig::default(),
            _ => serde_yaml::from_str(&expanded)?,
        };

        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve and load the active configuration.
    ///
    /// Order: the explicit path, `$TRANSFER_BRIDGE_CONFIG`, the per-user
    /// config file, then built-in defaults.
    pub fn discover(&self, explicit: Option<&str>) -> Result<BridgeConfig> {
        if let Some(path) = explicit {
            return self.load(expand_path(path));
        }

        if let Some(path) = self.env_vars.get(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return self.load(expand_path(path));
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return self.load(path);
        }

        debug!("No configuration file found, using defaults");
        Ok(BridgeConfig::default())
    }

    /// Expand `${VAR}` references in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| TransferError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut missing_vars = Vec::new();
        let result = re.replace_all(content, |cap: &regex::Captures| {
            match self.env_vars.get(&cap[1]) {
                Some(value) => value.clone(),
                None => {
                    missing_vars.push(cap[1].to_string());
                    String::new()
                }
            }
        });

        if !missing_vars.is_empty() {
            return Err(TransferError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result.into_owned())
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-user config location, e.g. `~/.config/transfer-bridge/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("transfer-bridge").join("config.yaml"))
}

/// Expand a leading `~` only. Used for paths that arrive over HTTP, where
/// `$VAR` must reach the tool untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Expand a leading `~` and `$VAR` references in an operator-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).into_owned()),
    }
}
