// file: src/config/mod.rs
// version: 1.0.0
// guid: 056918d4-98c4-4d49-b1e4-325b38bb0f3e

//! Configuration module for the transfer bridge
//!
//! Holds the server bind address, timeout policy and the per-tool binary and
//! default flags. Every section has defaults so an empty file is valid.

pub mod loader;

use crate::error::{Result, TransferError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub server: ServerConfig,
    pub execution: ExecutionConfig,
    pub rsync: ToolConfig,
    pub rclone: ToolConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the standalone server listens on
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8189)),
        }
    }
}

/// Process execution settings shared by both tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub default_timeout_secs: u64,
    pub max_timeout_secs: u64,
    /// Launcher used when a request sets `use_wsl`
    pub wsl_launcher: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: 300,
            max_timeout_secs: 3600,
            wsl_launcher: "wsl".to_string(),
        }
    }
}

impl ExecutionConfig {
    /// Resolve the timeout for a request.
    ///
    /// `None` and `Some(0)` fall back to the default; anything else is
    /// capped at `max_timeout_secs`.
    pub fn effective_timeout(&self, requested: Option<u64>) -> u64 {
        match requested {
            None | Some(0) => self.default_timeout_secs,
            Some(secs) => secs.min(self.max_timeout_secs),
        }
    }
}

/// Binary and default flags for one external tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub binary: String,
    /// Empty means the tool's built-in flags (`-avz` / `copy`)
    #[serde(default)]
    pub default_flags: Vec<String>,
}

impl ToolConfig {
    pub fn rsync() -> Self {
        Self {
            binary: "rsync".to_string(),
            default_flags: vec!["-avz".to_string()],
        }
    }

    pub fn rclone() -> Self {
        Self {
            binary: "rclone".to_string(),
            default_flags: vec!["copy".to_string()],
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            execution: ExecutionConfig::default(),
            rsync: ToolConfig::rsync(),
            rclone: ToolConfig::rclone(),
        }
    }
}

impl BridgeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rsync.binary.trim().is_empty() {
            return Err(TransferError::config("rsync.binary cannot be empty"));
        }

        if self.rclone.binary.trim().is_empty() {
            return Err(TransferError::config("rclone.binary cannot be empty"));
        }

        if self.execution.wsl_launcher.trim().is_empty() {
            return Err(TransferError::config("execution.wsl_launcher cannot be empty"));
        }

        if self.execution.default_timeout_secs == 0 {
            return Err(TransferError::config(
                "execution.default_timeout_secs must be greater than zero",
            ));
        }

        if self.execution.default_timeout_secs > self.execution.max_timeout_secs {
            return Err(TransferError::config(format!(
                "execution.default_timeout_secs ({}) exceeds execution.max_timeout_secs ({})",
                self.execution.default_timeout_secs, self.execution.max_timeout_secs
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BridgeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rsync.default_flags, vec!["-avz"]);
        assert_eq!(config.rclone.default_flags, vec!["copy"]);
        assert_eq!(config.server.bind.port(), 8189);
    }

    #[test]
    fn test_effective_timeout() {
        let execution = ExecutionConfig::default();

        assert_eq!(execution.effective_timeout(None), 300);
        assert_eq!(execution.effective_timeout(Some(0)), 300);
        assert_eq!(execution.effective_timeout(Some(12)), 12);
        assert_eq!(execution.effective_timeout(Some(999_999)), 3600);
    }

    #[test]
    fn test_validate_rejects_inverted_timeouts() {
        let mut config = BridgeConfig::default();
        config.execution.default_timeout_secs = 7200;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_validate_rejects_empty_binary() {
        let mut config = BridgeConfig::default();
        config.rclone.binary = "  ".to_string();

        assert!(config.validate().is_err());
    }
}
