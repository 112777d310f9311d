//! # Host Bridge Traits
//!
//! Abstraction traits that each host shell implements for the catalog core.
//!
//! ## Overview
//!
//! This crate defines the contract between the catalog core and the page it
//! runs in. Each trait represents a capability the core drives but that is
//! rendered differently per host (browser DOM, server-side templates, tests).
//!
//! ## Traits
//!
//! ### Page Surfaces
//! - [`CategorySelector`](ui::CategorySelector) - Category dropdown population
//! - [`ItemContainer`](ui::ItemContainer) - Tile rendering and show/hide
//! - [`PaginationControls`](ui::PaginationControls) - Previous/next buttons and status line
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! Fallible bridge operations use [`BridgeError`](error::BridgeError). Page
//! surfaces are infallible: a missing element is modelled by not providing
//! the surface at all.

pub mod error;
pub mod logging;
pub mod ui;

pub use error::BridgeError;

// Re-export commonly used types
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use ui::{CategorySelector, ItemContainer, PaginationControls, SelectOption};
