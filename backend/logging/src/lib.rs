//! Structured logging setup for DocScan binaries and hosts.

pub mod logger;

pub use logger::{LogOptions, init_logger};
