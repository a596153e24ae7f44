// file: src/transfer/command.rs
// version: 1.0.0
// guid: 0af09ac2-c173-4dff-8d0e-42fe600a7c66

//! Argument vector construction for rsync and rclone

use crate::config::{BridgeConfig, ToolConfig};
use crate::config::loader::expand_tilde;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// External tool driven by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Rsync,
    Rclone,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Rsync => "rsync",
            Tool::Rclone => "rclone",
        }
    }

    /// Flags used when neither the request nor the config supplies any
    pub fn builtin_flags(&self) -> &'static [&'static str] {
        match self {
            Tool::Rsync => &["-avz"],
            Tool::Rclone => &["copy"],
        }
    }

    /// Binary and default flags for this tool
    pub fn settings<'a>(&self, config: &'a BridgeConfig) -> &'a ToolConfig {
        match self {
            Tool::Rsync => &config.rsync,
            Tool::Rclone => &config.rclone,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied flags: either a shell-like line or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flags {
    Line(String),
    List(Vec<String>),
}

impl Flags {
    /// Split into individual arguments, dropping blanks
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Flags::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            Flags::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<&str> for Flags {
    fn from(line: &str) -> Self {
        Flags::Line(line.to_string())
    }
}

/// A fully described invocation, ready to be rendered into argv
#[derive(Debug, Clone)]
pub struct TransferSpec {
    pub tool: Tool,
    pub source: String,
    pub destination: String,
    pub flags: Option<Flags>,
    pub dry_run: bool,
    pub use_wsl: bool,
    /// rclone only; ignored for rsync
    pub config_path: Option<String>,
    /// Extra variables for the child, on top of the inherited environment
    /// (e.g. `RSYNC_PASSWORD`, `RCLONE_CONFIG_PASS`)
    pub env: Option<HashMap<String, String>>,
}

impl TransferSpec {
    pub fn new(tool: Tool, source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            tool,
            source: source.into(),
            destination: destination.into(),
            flags: None,
            dry_run: false,
            use_wsl: false,
            config_path: None,
            env: None,
        }
    }

    pub fn flags(mut self, flags: impl Into<Flags>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn use_wsl(mut self, use_wsl: bool) -> Self {
        self.use_wsl = use_wsl;
        self
    }

    pub fn config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Rendered command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Program to spawn (the tool binary, or the WSL launcher)
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Build the command line for a transfer.
///
/// rsync:  `[wsl] rsync [--dry-run] <flags..> <src> <dst>`
/// rclone: `[wsl] rclone <flags..> [--config <path>] [--dry-run] <src> <dst>`
pub fn build_command(spec: &TransferSpec, config: &BridgeConfig) -> CommandLine {
    let settings = spec.tool.settings(config);

    let mut flags = spec.flags.as_ref().map(Flags::to_args).unwrap_or_default();
    if flags.is_empty() {
        flags = settings.default_flags.clone();
    }
    if flags.is_empty() {
        flags = spec.tool.builtin_flags().iter().map(|f| f.to_string()).collect();
    }

    let mut tool_args = Vec::with_capacity(flags.len() + 5);
    match spec.tool {
        Tool::Rsync => {
            if spec.dry_run {
                tool_args.push("--dry-run".to_string());
            }
            tool_args.extend(flags);
        }
        Tool::Rclone => {
            tool_args.extend(flags);
            if let Some(path) = spec.config_path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
                tool_args.push("--config".to_string());
                tool_args.push(expand_tilde(path).to_string_lossy().into_owned());
            }
            if spec.dry_run {
                tool_args.push("--dry-run".to_string());
            }
        }
    }
    tool_args.push(spec.source.clone());
    tool_args.push(spec.destination.clone());

    if spec.use_wsl {
        let mut args = Vec::with_capacity(tool_args.len() + 1);
        args.push(settings.binary.clone());
        args.extend(tool_args);
        CommandLine {
            program: config.execution.wsl_launcher.clone(),
            args,
        }
    } else {
        CommandLine {
            program: settings.binary.clone(),
            args: tool_args,
        }
    }
}
