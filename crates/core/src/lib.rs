//! Core functionality for the Faultwatch platform health monitor.
//!
//! This crate provides the ambient pieces shared across the workspace:
//! configuration, logging initialization and the core error type.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, DetectorConfig, LogFormat, NodeConfig, Thresholds};
pub use error::{CoreError, Result};
