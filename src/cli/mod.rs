// file: src/cli/mod.rs
// version: 1.0.0
// guid: ea6c1a10-242f-4440-bd15-c6e6ab0e942a

//! Command line interface for the transfer bridge

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
