//! Type-ahead picker
//!
//! State behind the catalog's edit-form selectors (artists of a song, units of
//! an artist, ...). The host renders the dropdown from [`FuzzyPicker::suggestions`]
//! and the chips from [`FuzzyPicker::selected`], and submits
//! [`FuzzyPicker::hidden_value`] with the form.

use crate::matcher::score;
use crate::models::{canonical_string, Record};
use core_runtime::logging::preview;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of suggestions shown in the dropdown.
pub const MAX_SUGGESTIONS: usize = 10;

const QUERY_LOG_CHARS: usize = 32;

/// An entry the picker can select.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickerItem {
    pub id: String,
    pub name: String,
}

impl PickerItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build items from records, reading the id and display name from the
    /// given fields. Records missing either are skipped.
    pub fn from_records(records: &[Record], id_field: &str, name_field: &str) -> Vec<Self> {
        records
            .iter()
            .filter_map(|record| {
                let id = record.get(id_field).and_then(canonical_string)?;
                let name = record.get(name_field)?.as_str()?;
                Some(Self::new(id, name))
            })
            .collect()
    }
}

/// Whether the picker holds one item or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Single,
    #[default]
    Multiple,
}

/// A ranked dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub item: PickerItem,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct FuzzyPicker {
    items: Vec<PickerItem>,
    mode: SelectionMode,
    query: String,
    suggestions: Vec<Suggestion>,
    active: Option<usize>,
    open: bool,
    selected: Vec<PickerItem>,
}

impl FuzzyPicker {
    pub fn new(items: Vec<PickerItem>, mode: SelectionMode) -> Self {
        Self {
            items,
            mode,
            query: String::new(),
            suggestions: Vec::new(),
            active: None,
            open: false,
            selected: Vec::new(),
        }
    }

    /// Preload the selection (an edit form showing existing values).
    pub fn with_selected(mut self, selected: Vec<PickerItem>) -> Self {
        self.selected = match self.mode {
            SelectionMode::Single => selected.into_iter().take(1).collect(),
            SelectionMode::Multiple => selected,
        };
        self
    }

    /// Text input changed.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh();
    }

    /// Input focused; reopens the dropdown when the query is not blank.
    pub fn focus(&mut self) {
        if !self.query.trim().is_empty() {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.active = None;

        if self.query.trim().is_empty() {
            self.suggestions.clear();
            self.open = false;
            return;
        }

        let mut ranked: Vec<Suggestion> = self
            .items
            .iter()
            .filter_map(|item| {
                let points = score(&item.name, &self.query);
                (points > 0).then(|| Suggestion {
                    item: item.clone(),
                    score: points,
                })
            })
            .collect();
        // stable: equal scores keep item order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(MAX_SUGGESTIONS);

        debug!(query = %preview(&self.query, QUERY_LOG_CHARS), suggestions = ranked.len(), "Picker suggestions");

        self.open = !ranked.is_empty();
        self.suggestions = ranked;
    }

    /// Highlight the next suggestion, wrapping to the first.
    pub fn move_down(&mut self) {
        if !self.open || self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len();
        self.active = Some(match self.active {
            Some(index) => (index + 1) % len,
            None => 0,
        });
    }

    /// Highlight the previous suggestion, wrapping to the last.
    pub fn move_up(&mut self) {
        if !self.open || self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len();
        self.active = Some(match self.active {
            Some(index) if index > 0 => index - 1,
            _ => len - 1,
        });
    }

    /// Select the highlighted suggestion; returns whether one was selected.
    pub fn confirm(&mut self) -> bool {
        let Some(item) = self
            .active
            .filter(|_| self.open)
            .and_then(|index| self.suggestions.get(index))
            .map(|suggestion| suggestion.item.clone())
        else {
            return false;
        };
        self.select(item)
    }

    /// Close the dropdown, keeping the query.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.active = None;
    }

    /// Add an item to the selection.
    ///
    /// Returns `false` when an item with the same id is already selected.
    /// Otherwise the query is cleared and the dropdown closed.
    pub fn select(&mut self, item: PickerItem) -> bool {
        if self.selected.iter().any(|selected| selected.id == item.id) {
            return false;
        }

        match self.mode {
            SelectionMode::Single => self.selected = vec![item],
            SelectionMode::Multiple => self.selected.push(item),
        }

        self.query.clear();
        self.suggestions.clear();
        self.active = None;
        self.open = false;
        true
    }

    /// Remove the selected item at `index`; out of range does nothing.
    pub fn remove(&mut self, index: usize) -> Option<PickerItem> {
        (index < self.selected.len()).then(|| self.selected.remove(index))
    }

    /// Value submitted with the form.
    pub fn hidden_value(&self) -> String {
        match self.mode {
            SelectionMode::Single => self
                .selected
                .first()
                .map(|item| item.id.clone())
                .unwrap_or_default(),
            SelectionMode::Multiple => self
                .selected
                .iter()
                .map(|item| item.id.as_str())
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn selected(&self) -> &[PickerItem] {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<PickerItem> {
        vec![
            PickerItem::new("1", "Aqours"),
            PickerItem::new("2", "Azalea"),
            PickerItem::new("3", "Guilty Kiss"),
        ]
    }

    #[test]
    fn test_blank_query_closes() {
        let mut picker = FuzzyPicker::new(items(), SelectionMode::Multiple);
        picker.set_query("a");
        assert!(picker.is_open());
        picker.set_query("   ");
        assert!(!picker.is_open());
        assert!(picker.suggestions().is_empty());
    }

    #[test]
    fn test_no_match_closes() {
        let mut picker = FuzzyPicker::new(items(), SelectionMode::Multiple);
        picker.set_query("zzz");
        assert!(!picker.is_open());
    }

    #[test]
    fn test_focus_reopens_dismissed_dropdown() {
        let mut picker = FuzzyPicker::new(items(), SelectionMode::Multiple);
        picker.set_query("az");
        picker.dismiss();
        assert!(!picker.is_open());
        assert_eq!(picker.query(), "az");
        picker.focus();
        assert!(picker.is_open());
    }

    #[test]
    fn test_navigation_closed_is_noop() {
        let mut picker = FuzzyPicker::new(items(), SelectionMode::Multiple);
        picker.move_down();
        picker.move_up();
        assert_eq!(picker.active_index(), None);
        assert!(!picker.confirm());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut picker = FuzzyPicker::new(items(), SelectionMode::Multiple)
            .with_selected(vec![PickerItem::new("1", "Aqours")]);
        assert_eq!(picker.remove(5), None);
        assert_eq!(picker.selected().len(), 1);
        assert_eq!(picker.remove(0), Some(PickerItem::new("1", "Aqours")));
        assert!(picker.selected().is_empty());
    }

    #[test]
    fn test_with_selected_single_keeps_first() {
        let picker = FuzzyPicker::new(items(), SelectionMode::Single)
            .with_selected(items());
        assert_eq!(picker.hidden_value(), "1");
    }

    #[test]
    fn test_items_from_records() {
        let records = vec![
            Record::new(json!({"ArtistID": 4, "NameOriginal": "桜内梨子"})),
            Record::new(json!({"ArtistID": 5})),
            Record::new(json!({"NameOriginal": "no id"})),
        ];
        let items = PickerItem::from_records(&records, "ArtistID", "NameOriginal");
        assert_eq!(items, vec![PickerItem::new("4", "桜内梨子")]);
    }
}
