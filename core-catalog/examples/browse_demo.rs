//! Catalog browsing demonstration
//!
//! Drives a [`FilterEngine`] over a small song list with console-backed
//! surfaces, then runs the type-ahead picker over the same records.
//!
//! Run with:
//! ```bash
//! # Exact matching
//! cargo run -p core-catalog --example browse_demo -- "moon"
//!
//! # Fuzzy matching with debug logs
//! RUST_LOG=core_catalog=debug cargo run -p core-catalog --example browse_demo -- "mnlt" fuzzy
//! ```

use anyhow::{Context, Result};
use bridge_traits::logging::{ConsoleLogger, LogLevel};
use bridge_traits::ui::{CategorySelector, ItemContainer, PaginationControls, SelectOption};
use core_catalog::config::FilterOptions;
use core_catalog::engine::{FilterEngine, Surfaces};
use core_catalog::matcher::MatchMode;
use core_catalog::models::{categories_from_json, records_from_json};
use core_catalog::picker::{FuzzyPicker, PickerItem, SelectionMode};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::env;
use std::sync::Arc;
use tracing::info;

const SONGS: &str = r#"[
    {"SongID": 1, "NameOriginal": "Moonlight Densetsu", "NameEnglish": "Moonlight Legend", "Category": {"CategoryID": 1}, "IsCover": true,
     "Artists": [{"NameOriginal": "高海千歌", "NameEnglish": "Chika Takami"}]},
    {"SongID": 2, "NameOriginal": "青空Jumping Heart", "NameEnglish": "Aozora Jumping Heart", "Category": {"CategoryID": 1}, "IsCover": false,
     "Artists": [{"NameOriginal": "渡辺曜", "NameEnglish": "You Watanabe"}]},
    {"SongID": 3, "NameOriginal": "始まりは君の空", "NameEnglish": "Hajimari wa Kimi no Sora", "CategoryID": "2", "IsCover": false,
     "Artists": ["Liella!"]},
    {"SongID": 4, "NameOriginal": "Moon Revolution", "CategoryID": 2, "IsCover": true}
]"#;

const CATEGORIES: &str = r#"[
    {"CategoryID": 1, "Name": "Love Live! Sunshine!!"},
    {"id": "2", "displayName": "Love Live! Superstar!!"}
]"#;

struct ConsoleSelector;

impl CategorySelector for ConsoleSelector {
    fn set_options(&mut self, options: &[SelectOption]) {
        for option in options {
            println!("  [option] {:>2} {}", option.value, option.label);
        }
    }
}

struct ConsoleContainer;

impl ItemContainer for ConsoleContainer {
    fn clear(&mut self) {}

    fn append_markup(&mut self, markup: &str) {
        println!("  {}", markup);
    }

    fn hide_all(&mut self) {}

    fn show_item(&mut self, id: &str) -> bool {
        println!("  [tile] {}", id);
        true
    }

    fn set_no_results_visible(&mut self, visible: bool) {
        if visible {
            println!("  (no results)");
        }
    }
}

struct ConsolePagination;

impl PaginationControls for ConsolePagination {
    fn set_visible(&mut self, _visible: bool) {}

    fn set_previous_enabled(&mut self, _enabled: bool) {}

    fn set_next_enabled(&mut self, _enabled: bool) {}

    fn set_status(&mut self, text: &str) {
        println!("  {}", text);
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let term = args.get(1).cloned().unwrap_or_else(|| "moon".to_string());
    let match_mode = match args.get(2).map(String::as_str) {
        Some("fuzzy") => MatchMode::fuzzy(),
        _ => MatchMode::Exact,
    };

    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Info)
            .with_logger_sink(Arc::new(ConsoleLogger {
                min_level: LogLevel::Warn,
            })),
    )
    .context("Failed to initialize logging")?;

    let records = records_from_json(SONGS).context("Failed to parse songs")?;
    let categories = categories_from_json(CATEGORIES).context("Failed to parse categories")?;
    let picker_items = PickerItem::from_records(&records, "SongID", "NameEnglish");

    let options = FilterOptions::builder()
        .search_fields(["NameOriginal", "NameEnglish", "Artists"])
        .items_per_page(2)
        .match_mode(match_mode)
        .data(records)
        .categories(categories)
        .build();
    let surfaces = Surfaces::new()
        .with_category_selector(ConsoleSelector)
        .with_item_container(ConsoleContainer)
        .with_pagination(ConsolePagination);

    println!("Category dropdown and first render:");
    let mut engine = FilterEngine::new(options, surfaces);

    println!("\nSearch {:?} ({:?}):", term, match_mode);
    engine.set_search_term(&term);

    println!("\nCovers only:");
    engine.set_toggle_filter(true);

    println!("\nAll songs, page 2:");
    engine.set_search_term("");
    engine.set_toggle_filter(false);
    engine.next_page();

    info!(
        matched = engine.filtered_records().len(),
        pages = engine.total_pages(),
        "Browse demo finished"
    );

    println!("\nPicker:");
    let mut picker = FuzzyPicker::new(picker_items, SelectionMode::Multiple);
    picker.set_query(&term);
    for suggestion in picker.suggestions() {
        println!("  {:>3} {}", suggestion.score, suggestion.item.name);
    }
    picker.move_down();
    picker.confirm();
    println!("  hidden value: {:?}", picker.hidden_value());

    Ok(())
}
