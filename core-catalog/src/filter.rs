//! Query state and record predicates
//!
//! A record is visible when it passes all three predicates: search, category
//! and toggle. Each predicate is vacuously true while its input is unset.

use crate::field::{self, FieldValue};
use crate::matcher::Matcher;
use crate::models::{canonical_string, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User inputs driving the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Lower-cased, trimmed search text; empty means "no search"
    pub search_term: String,
    /// Selected category id in canonical form
    pub category_filter: Option<String>,
    /// Whether only flagged records are shown
    pub toggle_filter: bool,
    /// Current page (1-indexed)
    pub current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category_filter: None,
            toggle_filter: false,
            current_page: 1,
        }
    }
}

impl QueryState {
    /// Store raw search input in normalized form.
    pub fn set_search_term(&mut self, raw: &str) {
        self.search_term = normalize_term(raw);
    }

    /// Store the dropdown value; an empty or blank value clears the filter.
    pub fn set_category_filter(&mut self, raw: &str) {
        let value = raw.trim();
        self.category_filter = (!value.is_empty()).then(|| value.to_string());
    }
}

/// Lower-case and trim raw search input.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Search predicate.
///
/// True for a blank term; otherwise true when any value at any of `paths`
/// matches. Records missing every path never match a non-blank term.
pub fn matches_search<S: AsRef<str>>(
    record: &Record,
    paths: &[S],
    term: &str,
    matcher: &dyn Matcher,
) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    paths.iter().any(|path| {
        field::field_values(record.value(), path.as_ref())
            .iter()
            .any(|value: &FieldValue<'_>| value.matches(term, matcher))
    })
}

/// Category predicate.
///
/// The record's category id is the first non-empty value among `paths`,
/// compared with `selected` in canonical string form.
pub fn matches_category<S: AsRef<str>>(
    record: &Record,
    paths: &[S],
    selected: Option<&str>,
) -> bool {
    let Some(selected) = selected else {
        return true;
    };

    field::first_present(record.value(), paths)
        .and_then(canonical_string)
        .is_some_and(|id| id == selected)
}

/// Toggle predicate: when active, the flag at `field` must be exactly `true`.
pub fn matches_toggle(record: &Record, field: &str, active: bool) -> bool {
    !active || matches!(record.get(field), Some(Value::Bool(true)))
}

/// The three predicates bound to one query.
#[derive(Debug)]
pub struct RecordPredicate<'a> {
    pub search_fields: &'a [String],
    pub category_paths: &'a [String],
    pub toggle_field: &'a str,
    pub query: &'a QueryState,
    pub matcher: &'a dyn Matcher,
}

impl<'a> RecordPredicate<'a> {
    pub fn matches(&self, record: &Record) -> bool {
        matches_search(record, self.search_fields, &self.query.search_term, self.matcher)
            && matches_category(
                record,
                self.category_paths,
                self.query.category_filter.as_deref(),
            )
            && matches_toggle(record, self.toggle_field, self.query.toggle_filter)
    }

    /// Indices of matching records, in source order.
    pub fn filter_indices(&self, records: &[Record]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{ExactMatcher, FuzzyMatcher};
    use serde_json::json;

    fn song(name: &str, category: Value, cover: Value) -> Record {
        Record::new(json!({
            "NameOriginal": name,
            "Category": {"CategoryID": category},
            "IsCover": cover,
        }))
    }

    #[test]
    fn test_query_state_default() {
        let state = QueryState::default();
        assert_eq!(state.current_page, 1);
        assert!(state.search_term.is_empty());
        assert!(state.category_filter.is_none());
        assert!(!state.toggle_filter);
    }

    #[test]
    fn test_query_state_normalizes_inputs() {
        let mut state = QueryState::default();
        state.set_search_term("  MiRaCle Wave ");
        assert_eq!(state.search_term, "miracle wave");

        state.set_category_filter("5");
        assert_eq!(state.category_filter.as_deref(), Some("5"));
        state.set_category_filter("");
        assert!(state.category_filter.is_none());
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let record = Record::new(json!({}));
        assert!(matches_search(&record, &["NameOriginal"], "   ", &ExactMatcher));
    }

    #[test]
    fn test_search_missing_field_never_matches() {
        let record = Record::new(json!({"Other": "moon"}));
        assert!(!matches_search(&record, &["NameOriginal"], "moon", &ExactMatcher));
    }

    #[test]
    fn test_search_any_path() {
        let record = Record::new(json!({
            "NameOriginal": "ユメ語るよりユメ歌おう",
            "Artists": [{"NameOriginal": "渡辺曜", "NameEnglish": "You Watanabe"}]
        }));
        let paths = ["NameOriginal", "Artists"];
        assert!(matches_search(&record, &paths, "watanabe", &ExactMatcher));
        assert!(matches_search(&record, &paths, "ユメ", &ExactMatcher));
        assert!(!matches_search(&record, &paths, "riko", &ExactMatcher));
    }

    #[test]
    fn test_search_with_fuzzy_matcher() {
        let record = Record::new(json!({"NameOriginal": "Moonlight Densetsu"}));
        assert!(matches_search(&record, &["NameOriginal"], "mnlt", &FuzzyMatcher::default()));
        assert!(!matches_search(&record, &["NameOriginal"], "mnlt", &ExactMatcher));
    }

    #[test]
    fn test_category_numeric_vs_string() {
        let numeric = song("a", json!(5), json!(false));
        let string = song("b", json!("5"), json!(false));
        let float = song("c", json!(5.0), json!(false));
        let paths = ["Category.CategoryID", "CategoryID"];

        assert!(matches_category(&numeric, &paths, Some("5")));
        assert!(matches_category(&string, &paths, Some("5")));
        assert!(matches_category(&float, &paths, Some("5")));
        assert!(!matches_category(&numeric, &paths, Some("6")));
    }

    #[test]
    fn test_category_scalar_fallback_path() {
        let record = Record::new(json!({"CategoryID": 2}));
        let paths = ["Category.CategoryID", "CategoryID"];
        assert!(matches_category(&record, &paths, Some("2")));
        assert!(matches_category(&record, &paths, None));
    }

    #[test]
    fn test_category_missing_fails_when_selected() {
        let record = Record::new(json!({"NameOriginal": "x"}));
        assert!(!matches_category(&record, &["CategoryID"], Some("1")));
    }

    #[test]
    fn test_toggle_requires_literal_true() {
        assert!(matches_toggle(&song("a", json!(1), json!(true)), "IsCover", true));
        assert!(!matches_toggle(&song("a", json!(1), json!("true")), "IsCover", true));
        assert!(!matches_toggle(&song("a", json!(1), json!(1)), "IsCover", true));
        assert!(!matches_toggle(&Record::new(json!({})), "IsCover", true));
        assert!(matches_toggle(&Record::new(json!({})), "IsCover", false));
    }

    #[test]
    fn test_predicate_composes_with_and() {
        let records = vec![
            song("Mijuku DREAMER", json!(1), json!(false)),
            song("Mijuku DREAMER (cover)", json!(1), json!(true)),
            song("Mijuku DREAMER", json!(2), json!(true)),
            song("Aozora Jumping Heart", json!(1), json!(true)),
        ];
        let mut query = QueryState::default();
        query.set_search_term("mijuku");
        query.set_category_filter("1");
        query.toggle_filter = true;

        let search_fields = vec!["NameOriginal".to_string()];
        let category_paths = vec!["Category.CategoryID".to_string()];
        let predicate = RecordPredicate {
            search_fields: &search_fields,
            category_paths: &category_paths,
            toggle_field: "IsCover",
            query: &query,
            matcher: &ExactMatcher,
        };

        assert_eq!(predicate.filter_indices(&records), vec![1]);
    }
}
