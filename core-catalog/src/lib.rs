//! # Catalog Browser Core
//!
//! Search, filter and pagination for the catalog's listing pages (songs,
//! artists, units), plus the type-ahead picker used by the edit forms.
//!
//! ## Overview
//!
//! This crate provides:
//! - Record and category models parsed from the JSON listing pages embed
//! - Dotted-path field resolution over heterogeneous records
//! - Exact and fuzzy matching strategies
//! - The [`FilterEngine`](engine::FilterEngine), which drives host surfaces
//!   from `bridge-traits`
//! - The [`FuzzyPicker`](picker::FuzzyPicker) selection state
//!
//! ## Usage
//!
//! ```
//! use core_catalog::config::FilterOptions;
//! use core_catalog::engine::{FilterEngine, Surfaces};
//! use core_catalog::models::records_from_json;
//!
//! let data = records_from_json(
//!     r#"[{"SongID": 1, "NameOriginal": "Moonlight"}, {"SongID": 2, "NameOriginal": "Sunrise"}]"#,
//! ).unwrap();
//!
//! let options = FilterOptions::builder()
//!     .search_fields(["NameOriginal"])
//!     .data(data)
//!     .build();
//!
//! let mut engine = FilterEngine::new(options, Surfaces::new());
//! engine.set_search_term("moon");
//! assert_eq!(engine.filtered_records().len(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod filter;
pub mod matcher;
pub mod models;
pub mod pagination;
pub mod picker;

pub use config::{FilterOptions, FilterOptionsBuilder, FilterSettings};
pub use engine::{FilterEngine, Surfaces, View};
pub use error::{CatalogError, Result};
pub use filter::QueryState;
pub use matcher::{ExactMatcher, FuzzyMatcher, MatchMode, Matcher};
pub use models::{categories_from_json, records_from_json, Category, Record};
pub use pagination::{PageRequest, Pagination};
pub use picker::{FuzzyPicker, PickerItem, SelectionMode, Suggestion};
