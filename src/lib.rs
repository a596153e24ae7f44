// file: src/lib.rs
// version: 1.0.0
// guid: 71d89955-cc1a-41a7-8170-4a830fdcf37c

//! # Transfer Bridge
//!
//! Runs `rsync` and `rclone` on behalf of HTTP callers and reports the
//! captured output and return code as JSON.
//!
//! * `POST /rsync/run` takes `{source, destination, flags, dry_run, use_wsl, timeout}`
//! * `POST /rclone/run` takes the same fields plus `config_path`
//!
//! Both answer `{success, returnCode, output}` when the tool ran, or
//! `{success: false, error, output}` when it could not be started or timed
//! out. There is no retry and no queueing: one request, one process.

pub mod cli;
pub mod config;
pub mod error;
pub mod extension;
pub mod logging;
pub mod server;
pub mod transfer;

pub use error::{Result, TransferError};

/// Version information for the bridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
