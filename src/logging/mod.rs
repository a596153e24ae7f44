// file: src/logging/mod.rs
// version: 1.0.0
// guid: dfe6ffc3-325f-443e-8421-9c9019894fba

//! Logging system for the transfer bridge

pub mod logger;

pub use logger::{init_json_logger, init_logger};
