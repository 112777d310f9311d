//! # Filter Engine
//!
//! Owns the source records, the [`QueryState`] and the derived [`View`], and
//! pushes every recompute out to the host surfaces.
//!
//! ## Cycle
//!
//! Every input change runs the same steps:
//! 1. filter the source through the composed predicate, keeping source order
//! 2. recompute page bounds (an out-of-range page resets to 1)
//! 3. render the current page slice
//! 4. update the pagination bar
//!
//! Page navigation skips step 1.
//!
//! ## Surfaces
//!
//! Host surfaces are optional. A missing surface turns the matching step into
//! a no-op, so a page lacking (say) a category dropdown still filters.

use crate::config::{FilterOptions, FilterSettings, RenderCompleteFn, RenderFn};
use crate::filter::{QueryState, RecordPredicate};
use crate::matcher::Matcher;
use crate::models::{Category, Record};
use crate::pagination::{PageRequest, Pagination};
use bridge_traits::ui::{CategorySelector, ItemContainer, PaginationControls, SelectOption};
use core_runtime::logging::preview;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, instrument};

/// Label of the catch-all category option.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

const SEARCH_TERM_LOG_CHARS: usize = 32;

/// Host surfaces driven by the engine.
#[derive(Default)]
pub struct Surfaces {
    pub category_selector: Option<Box<dyn CategorySelector>>,
    pub item_container: Option<Box<dyn ItemContainer>>,
    pub pagination: Option<Box<dyn PaginationControls>>,
}

impl Surfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category_selector(mut self, selector: impl CategorySelector + 'static) -> Self {
        self.category_selector = Some(Box::new(selector));
        self
    }

    pub fn with_item_container(mut self, container: impl ItemContainer + 'static) -> Self {
        self.item_container = Some(Box::new(container));
        self
    }

    pub fn with_pagination(mut self, controls: impl PaginationControls + 'static) -> Self {
        self.pagination = Some(Box::new(controls));
        self
    }
}

impl fmt::Debug for Surfaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surfaces")
            .field("category_selector", &self.category_selector.is_some())
            .field("item_container", &self.item_container.is_some())
            .field("pagination", &self.pagination.is_some())
            .finish()
    }
}

/// Result of the last recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Indices into the source collection, in source order
    pub filtered_indices: Vec<usize>,
    pub pagination: Pagination,
}

impl View {
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.pagination.page
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_indices.is_empty()
    }

    /// Source indices of the records on the current page
    pub fn page_indices(&self) -> &[usize] {
        self.pagination.slice(&self.filtered_indices)
    }
}

/// Search, filter and pagination over one record collection.
pub struct FilterEngine {
    settings: FilterSettings,
    records: Vec<Record>,
    categories: Vec<Category>,
    matcher: Box<dyn Matcher>,
    render_function: Option<RenderFn>,
    on_render_complete: Option<RenderCompleteFn>,
    surfaces: Surfaces,
    query: QueryState,
    view: View,
}

impl FilterEngine {
    /// Build the engine, populate the category dropdown and run the first
    /// render.
    pub fn new(options: FilterOptions, surfaces: Surfaces) -> Self {
        let matcher = options.settings.match_mode.matcher();
        Self::with_matcher(options, surfaces, matcher)
    }

    /// Like [`FilterEngine::new`] with a caller-provided match strategy,
    /// overriding the configured match mode.
    pub fn with_matcher(options: FilterOptions, surfaces: Surfaces, matcher: Box<dyn Matcher>) -> Self {
        let FilterOptions {
            settings,
            data,
            categories,
            render_function,
            on_render_complete,
        } = options;

        info!(
            records = data.len(),
            categories = categories.len(),
            page_size = settings.items_per_page,
            ?matcher,
            "Initializing filter engine"
        );

        let mut engine = Self {
            settings,
            records: data,
            categories: dedup_categories(categories),
            matcher,
            render_function,
            on_render_complete,
            surfaces,
            query: QueryState::default(),
            view: View::default(),
        };

        engine.populate_category_filter();
        engine.filter_and_render();
        engine
    }

    // =========================================================================
    // Input handlers
    // =========================================================================

    /// Search box input; starts over on page 1.
    pub fn set_search_term(&mut self, raw: &str) {
        self.query.set_search_term(raw);
        self.query.current_page = 1;
        self.filter_and_render();
    }

    /// Category dropdown change; an empty value selects all categories.
    pub fn set_category_filter(&mut self, value: &str) {
        self.query.set_category_filter(value);
        self.query.current_page = 1;
        self.filter_and_render();
    }

    /// Toggle checkbox change.
    pub fn set_toggle_filter(&mut self, active: bool) {
        self.query.toggle_filter = active;
        self.query.current_page = 1;
        self.filter_and_render();
    }

    // =========================================================================
    // Recompute
    // =========================================================================

    /// Re-filter the source, recompute page bounds and re-render.
    ///
    /// Keeps the current page when it is still in range.
    #[instrument(skip(self))]
    pub fn filter_and_render(&mut self) {
        let filtered_indices = RecordPredicate {
            search_fields: &self.settings.search_fields,
            category_paths: &self.settings.category_paths,
            toggle_field: &self.settings.toggle_field,
            query: &self.query,
            matcher: self.matcher.as_ref(),
        }
        .filter_indices(&self.records);

        let pagination = Pagination::new(
            filtered_indices.len(),
            PageRequest::new(self.query.current_page, self.settings.items_per_page),
        );
        self.query.current_page = pagination.page;

        debug!(
            term = %preview(&self.query.search_term, SEARCH_TERM_LOG_CHARS),
            category = ?self.query.category_filter,
            toggle = self.query.toggle_filter,
            matched = filtered_indices.len(),
            total = self.records.len(),
            page = pagination.page,
            total_pages = pagination.total_pages,
            "Filtered records"
        );

        self.view = View {
            filtered_indices,
            pagination,
        };

        self.render_items();
        self.update_pagination_controls();
    }

    /// Go back one page; returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        if !self.view.pagination.previous() {
            return false;
        }
        self.after_page_change();
        true
    }

    /// Advance one page; returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.view.pagination.next() {
            return false;
        }
        self.after_page_change();
        true
    }

    fn after_page_change(&mut self) {
        self.query.current_page = self.view.pagination.page;
        debug!(page = self.query.current_page, "Page changed");

        self.render_items();
        self.update_pagination_controls();

        if let Some(container) = self.surfaces.item_container.as_mut() {
            container.scroll_into_view();
        }
    }

    /// Replace the source collection and recompute with the current query.
    pub fn update_data(&mut self, data: Vec<Record>) {
        info!(records = data.len(), "Replacing filter data");
        self.records = data;
        self.filter_and_render();
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Fill the category dropdown with a catch-all option plus one option per
    /// category.
    pub fn populate_category_filter(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        let Some(selector) = self.surfaces.category_selector.as_mut() else {
            debug!("No category selector, skipping population");
            return;
        };

        let options: Vec<SelectOption> = std::iter::once(SelectOption::new("", ALL_CATEGORIES_LABEL))
            .chain(
                self.categories
                    .iter()
                    .map(|category| SelectOption::new(category.id.as_str(), category.display_name.as_str())),
            )
            .collect();
        selector.set_options(&options);
    }

    /// Render the current page into the item container.
    ///
    /// Without a container nothing is rendered and the post-render hook is
    /// not called.
    pub fn render_items(&mut self) {
        let page: Vec<&Record> = self
            .view
            .page_indices()
            .iter()
            .filter_map(|&index| self.records.get(index))
            .collect();
        let empty = self.view.is_empty();

        let Some(container) = self.surfaces.item_container.as_mut() else {
            debug!("No item container, skipping render");
            return;
        };

        match &self.render_function {
            Some(render) => {
                container.clear();
                for &record in &page {
                    if let Some(markup) = render(record) {
                        container.append_markup(&markup);
                    }
                }
            }
            None => {
                container.hide_all();
                for &record in &page {
                    match record.id(&self.settings.id_fields) {
                        Some(id) => {
                            if !container.show_item(&id) {
                                debug!(%id, "No tile for record");
                            }
                        }
                        None => debug!("Record has no id, cannot show its tile"),
                    }
                }
            }
        }
        container.set_no_results_visible(empty);

        if !empty {
            if let Some(hook) = self.on_render_complete.as_mut() {
                hook(page.as_slice());
            }
        }
    }

    /// Update the status line and previous/next enablement.
    pub fn update_pagination_controls(&mut self) {
        let Some(controls) = self.surfaces.pagination.as_mut() else {
            return;
        };
        let pagination = &self.view.pagination;

        controls.set_visible(!self.view.is_empty());
        if !self.view.is_empty() {
            controls.set_status(&pagination.status_line());
        }
        controls.set_previous_enabled(pagination.has_previous());
        controls.set_next_enabled(pagination.has_next());
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.view.total_pages()
    }

    /// Records passing the current query, in source order
    pub fn filtered_records(&self) -> Vec<&Record> {
        self.resolve(&self.view.filtered_indices)
    }

    /// Records on the current page
    pub fn current_page_slice(&self) -> Vec<&Record> {
        self.resolve(self.view.page_indices())
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Record> {
        indices
            .iter()
            .filter_map(|&index| self.records.get(index))
            .collect()
    }
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("settings", &self.settings)
            .field("records", &self.records.len())
            .field("categories", &self.categories.len())
            .field("matcher", &self.matcher)
            .field("surfaces", &self.surfaces)
            .field("query", &self.query)
            .field("view", &self.view)
            .finish()
    }
}

/// Drop categories whose id was already seen, keeping the first.
fn dedup_categories(categories: Vec<Category>) -> Vec<Category> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|category| seen.insert(category.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchMode;
    use serde_json::json;

    fn records(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|i| Record::new(json!({"SongID": i, "NameOriginal": format!("Song {}", i)})))
            .collect()
    }

    fn engine(count: usize, page_size: usize) -> FilterEngine {
        let options = FilterOptions::builder()
            .search_fields(["NameOriginal"])
            .items_per_page(page_size)
            .data(records(count))
            .build();
        FilterEngine::new(options, Surfaces::new())
    }

    #[test]
    fn test_new_shows_first_page() {
        let engine = engine(120, 50);
        assert_eq!(engine.current_page(), 1);
        assert_eq!(engine.total_pages(), 3);
        assert_eq!(engine.current_page_slice().len(), 50);
        assert_eq!(engine.filtered_records().len(), 120);
    }

    #[test]
    fn test_navigation_without_surfaces() {
        let mut engine = engine(120, 50);
        assert!(!engine.previous_page());
        assert!(engine.next_page());
        assert!(engine.next_page());
        assert!(!engine.next_page());
        assert_eq!(engine.current_page(), 3);
        assert_eq!(engine.query_state().current_page, 3);
        assert_eq!(engine.current_page_slice().len(), 20);
    }

    #[test]
    fn test_filter_and_render_keeps_page_in_range() {
        let mut engine = engine(120, 50);
        engine.next_page();
        engine.filter_and_render();
        assert_eq!(engine.current_page(), 2);
    }

    #[test]
    fn test_search_resets_page() {
        let mut engine = engine(120, 50);
        engine.next_page();
        engine.set_search_term("Song 1");
        assert_eq!(engine.current_page(), 1);
        // "Song 1", "Song 10".."Song 19", "Song 100".."Song 120"
        assert_eq!(engine.filtered_records().len(), 32);
    }

    #[test]
    fn test_update_data_resets_only_out_of_range_page() {
        let mut engine = engine(120, 50);
        engine.next_page();
        engine.update_data(records(110));
        assert_eq!(engine.current_page(), 2);

        engine.update_data(records(10));
        assert_eq!(engine.current_page(), 1);
        assert_eq!(engine.total_pages(), 1);
    }

    #[test]
    fn test_categories_deduplicated() {
        let options = FilterOptions::builder()
            .categories(vec![
                Category::new("1", "Aqours"),
                Category::new("2", "Liella!"),
                Category::new("1", "Aqours (again)"),
            ])
            .build();
        let engine = FilterEngine::new(options, Surfaces::new());
        assert_eq!(engine.categories().len(), 2);
        assert_eq!(engine.categories()[0].display_name, "Aqours");
    }

    #[test]
    fn test_with_matcher_overrides_mode() {
        let options = FilterOptions::builder()
            .search_fields(["NameOriginal"])
            .match_mode(MatchMode::Exact)
            .data(vec![Record::new(json!({"id": 1, "NameOriginal": "Moonlight"}))])
            .build();
        let mut engine = FilterEngine::with_matcher(
            options,
            Surfaces::new(),
            MatchMode::fuzzy().matcher(),
        );
        engine.set_search_term("mnlt");
        assert_eq!(engine.filtered_records().len(), 1);
    }

    #[test]
    fn test_debug_reports_surface_presence() {
        let engine = engine(3, 50);
        let rendered = format!("{:?}", engine);
        assert!(rendered.contains("item_container: false"));
        assert!(rendered.contains("records: 3"));
    }
}
