//! Workspace placeholder crate.
//!
//! This crate exposes feature flags that map to the individual workspace
//! crates (`core-catalog`, `core-runtime`). Host shells can depend on
//! `catalog-workspace` and enable the documented features without wiring
//! each crate individually.

#[cfg(feature = "catalog")]
pub use core_catalog as catalog;

#[cfg(feature = "logging")]
pub use core_runtime as runtime;
