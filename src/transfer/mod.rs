// file: src/transfer/mod.rs
// version: 1.0.0
// guid: c828c399-5004-4433-99f5-a35161c9d569

//! rsync and rclone invocation
//!
//! [`command`] turns a [`TransferSpec`] into an argument vector and
//! [`runner`] executes it with a timeout, capturing stdout and stderr as one
//! stream.

pub mod command;
pub mod runner;

pub use command::{build_command, CommandLine, Flags, Tool, TransferSpec};
pub use runner::{find_executable, TransferOutcome, TransferRunner};
