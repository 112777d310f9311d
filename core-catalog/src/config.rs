//! # Filter Configuration
//!
//! Options for constructing a [`FilterEngine`](crate::engine::FilterEngine).
//!
//! ## Overview
//!
//! Configuration is split in two:
//! - [`FilterSettings`]: the plain, serializable part (search paths, page
//!   size, match mode, field names). Listing pages can ship it as JSON next
//!   to the record payload.
//! - [`FilterOptions`]: settings plus the data and the host callbacks, built
//!   with [`FilterOptions::builder`].
//!
//! Out-of-range values fall back to defaults instead of failing: the engine
//! drives a live page and always starts, even when half-configured.
//!
//! ## Usage
//!
//! ```
//! use core_catalog::config::FilterOptions;
//! use core_catalog::matcher::MatchMode;
//!
//! let options = FilterOptions::builder()
//!     .search_fields(["NameOriginal", "NameEnglish", "Artists"])
//!     .items_per_page(24)
//!     .match_mode(MatchMode::fuzzy())
//!     .build();
//!
//! assert_eq!(options.settings.items_per_page, 24);
//! ```

use crate::error::Result;
use crate::matcher::MatchMode;
use crate::models::{Category, Record};
use crate::pagination::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate id fields, in priority order.
pub const DEFAULT_ID_FIELDS: &[&str] = &["SongID", "ArtistID", "UnitID", "CategoryID", "id"];

/// Candidate category-id paths, in priority order.
pub const DEFAULT_CATEGORY_PATHS: &[&str] = &["Category.CategoryID", "CategoryID"];

/// Boolean flag consulted by the toggle filter.
pub const DEFAULT_TOGGLE_FIELD: &str = "IsCover";

/// Renders one record to markup; `None` renders nothing.
pub type RenderFn = Box<dyn Fn(&Record) -> Option<String>>;

/// Called with the records of the current page after each render.
pub type RenderCompleteFn = Box<dyn FnMut(&[&Record])>;

/// Serializable filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSettings {
    /// Dotted paths queried by the search predicate, in order
    pub search_fields: Vec<String>,

    /// Page size; 0 falls back to [`DEFAULT_PAGE_SIZE`]
    pub items_per_page: usize,

    /// Exact containment or fuzzy scoring
    pub match_mode: MatchMode,

    /// Shorthand for `match_mode = Fuzzy { threshold }`; folded into
    /// `match_mode` by [`FilterSettings::normalized`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_threshold: Option<u32>,

    /// Field names tried, in order, to resolve a record id
    pub id_fields: Vec<String>,

    /// Paths tried, in order, to resolve a record's category id
    pub category_paths: Vec<String>,

    /// Path of the boolean flag used by the toggle filter
    pub toggle_field: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            search_fields: Vec::new(),
            items_per_page: DEFAULT_PAGE_SIZE,
            match_mode: MatchMode::default(),
            fuzzy_threshold: None,
            id_fields: to_strings(DEFAULT_ID_FIELDS),
            category_paths: to_strings(DEFAULT_CATEGORY_PATHS),
            toggle_field: DEFAULT_TOGGLE_FIELD.to_string(),
        }
    }
}

impl FilterSettings {
    /// Parse settings from JSON; missing keys take their defaults.
    ///
    /// ```
    /// use core_catalog::config::FilterSettings;
    /// use core_catalog::matcher::MatchMode;
    ///
    /// let settings = FilterSettings::from_json(
    ///     r#"{"searchFields": ["NameOriginal"], "matchMode": {"mode": "fuzzy", "threshold": 20}}"#,
    /// ).unwrap();
    ///
    /// assert_eq!(settings.items_per_page, 50);
    /// assert_eq!(settings.match_mode, MatchMode::Fuzzy { threshold: 20 });
    /// ```
    pub fn from_json(payload: &str) -> Result<Self> {
        let settings: FilterSettings = serde_json::from_str(payload)?;
        Ok(settings.normalized())
    }

    /// Replace out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        if let Some(threshold) = self.fuzzy_threshold.take() {
            self.match_mode = MatchMode::Fuzzy { threshold };
        }
        if self.items_per_page == 0 {
            self.items_per_page = DEFAULT_PAGE_SIZE;
        }
        if let MatchMode::Fuzzy { threshold: 0 } = self.match_mode {
            self.match_mode = MatchMode::fuzzy();
        }
        if self.id_fields.is_empty() {
            self.id_fields = to_strings(DEFAULT_ID_FIELDS);
        }
        if self.category_paths.is_empty() {
            self.category_paths = to_strings(DEFAULT_CATEGORY_PATHS);
        }
        if self.toggle_field.trim().is_empty() {
            self.toggle_field = DEFAULT_TOGGLE_FIELD.to_string();
        }
        self
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Everything a [`FilterEngine`](crate::engine::FilterEngine) is built from.
pub struct FilterOptions {
    pub settings: FilterSettings,

    /// Source record collection
    pub data: Vec<Record>,

    /// Categories offered in the category dropdown
    pub categories: Vec<Category>,

    /// Custom tile renderer; when absent, pre-rendered tiles are shown and
    /// hidden by record id
    pub render_function: Option<RenderFn>,

    /// Post-render hook
    pub on_render_complete: Option<RenderCompleteFn>,
}

impl FilterOptions {
    /// Create a new builder
    pub fn builder() -> FilterOptionsBuilder {
        FilterOptionsBuilder::default()
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("settings", &self.settings)
            .field("data", &format_args!("[{} records]", self.data.len()))
            .field("categories", &self.categories)
            .field(
                "render_function",
                &self.render_function.as_ref().map(|_| "Fn(&Record) { ... }"),
            )
            .field(
                "on_render_complete",
                &self
                    .on_render_complete
                    .as_ref()
                    .map(|_| "FnMut(&[&Record]) { ... }"),
            )
            .finish()
    }
}

/// Builder for [`FilterOptions`].
#[derive(Default)]
pub struct FilterOptionsBuilder {
    settings: FilterSettings,
    data: Vec<Record>,
    categories: Vec<Category>,
    render_function: Option<RenderFn>,
    on_render_complete: Option<RenderCompleteFn>,
}

impl FilterOptionsBuilder {
    /// Replace all serializable settings at once
    pub fn settings(mut self, settings: FilterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the searched field paths
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the source records
    pub fn data(mut self, data: Vec<Record>) -> Self {
        self.data = data;
        self
    }

    /// Set the dropdown categories
    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Set the page size
    pub fn items_per_page(mut self, items_per_page: usize) -> Self {
        self.settings.items_per_page = items_per_page;
        self
    }

    /// Set the match mode
    pub fn match_mode(mut self, match_mode: MatchMode) -> Self {
        self.settings.match_mode = match_mode;
        self.settings.fuzzy_threshold = None;
        self
    }

    /// Switch to fuzzy matching with the given threshold
    pub fn fuzzy_threshold(mut self, threshold: u32) -> Self {
        self.settings.match_mode = MatchMode::Fuzzy { threshold };
        self.settings.fuzzy_threshold = None;
        self
    }

    /// Set the prioritized id field names
    pub fn id_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.id_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the prioritized category-id paths
    pub fn category_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.category_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the toggle flag path
    pub fn toggle_field(mut self, field: impl Into<String>) -> Self {
        self.settings.toggle_field = field.into();
        self
    }

    /// Render tiles with a custom function
    pub fn render_function<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> Option<String> + 'static,
    {
        self.render_function = Some(Box::new(render));
        self
    }

    /// Run a hook after each render
    pub fn on_render_complete<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&[&Record]) + 'static,
    {
        self.on_render_complete = Some(Box::new(hook));
        self
    }

    /// Build the options, normalizing out-of-range settings
    pub fn build(self) -> FilterOptions {
        FilterOptions {
            settings: self.settings.normalized(),
            data: self.data,
            categories: self.categories,
            render_function: self.render_function,
            on_render_complete: self.on_render_complete,
        }
    }
}
