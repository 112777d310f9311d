//! Page Surface Abstractions
//!
//! Traits for the page elements the catalog core drives: the category
//! dropdown, the tile container and the pagination bar. The host shell
//! implements them over whatever it renders to (DOM handles, a terminal, a
//! test recorder) and hands them to the core at construction, so the core
//! never looks elements up by id.
//!
//! Surfaces are driven from a single logical caller and take `&mut self`.

/// One entry of a selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value; empty for the "all" entry
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Category dropdown
///
/// # Example
///
/// ```ignore
/// use bridge_traits::ui::{CategorySelector, SelectOption};
///
/// struct DomSelect(web_sys::HtmlSelectElement);
///
/// impl CategorySelector for DomSelect {
///     fn set_options(&mut self, options: &[SelectOption]) {
///         self.0.set_inner_html("");
///         for option in options {
///             // create <option value=..>label</option>
///         }
///     }
/// }
/// ```
pub trait CategorySelector {
    /// Replace every option of the control with `options`, in order
    fn set_options(&mut self, options: &[SelectOption]);
}

/// Container holding the record tiles plus its "no results" indicator.
///
/// Two rendering styles are supported by the core:
/// - markup rendering: `clear` followed by `append_markup` per tile
/// - show/hide over tiles that were pre-rendered by the server, addressed by
///   record id
pub trait ItemContainer {
    /// Remove all rendered tiles
    fn clear(&mut self);

    /// Append one rendered tile at the end of the container
    fn append_markup(&mut self, markup: &str);

    /// Hide every pre-rendered tile
    fn hide_all(&mut self);

    /// Show the pre-rendered tile for `id`
    ///
    /// Returns `false` when no tile carries that id.
    fn show_item(&mut self, id: &str) -> bool;

    /// Show or hide the "no results" indicator
    fn set_no_results_visible(&mut self, visible: bool);

    /// Bring the top of the container into view
    fn scroll_into_view(&mut self) {}
}

/// Previous/next buttons and the page status line.
pub trait PaginationControls {
    /// Show or hide the whole pagination bar
    fn set_visible(&mut self, visible: bool);

    fn set_previous_enabled(&mut self, enabled: bool);

    fn set_next_enabled(&mut self, enabled: bool);

    /// Replace the status text (e.g. "Page 1 of 3 (1-50 of 120 items)")
    fn set_status(&mut self, text: &str);
}
