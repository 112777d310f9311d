//! # Core Runtime Module
//!
//! Provides the runtime infrastructure shared by catalog host shells:
//! - Logging and tracing infrastructure
//! - Runtime error type
//!
//! ## Overview
//!
//! Library crates in the workspace only emit `tracing` events. This crate
//! installs the subscriber that formats them and, optionally, mirrors them
//! into the host page's own logging through a `LoggerSink`.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
