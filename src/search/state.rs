use serde::Serialize;

use crate::models::{GeoFeature, LonLat};

/// Keyboard input the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Observable state of one location search field.
#[derive(Debug, Clone, Serialize)]
pub struct SearchState {
    /// What the user currently sees in the input.
    pub text: String,
    /// Last value the debounce timer committed.
    pub debounced_text: String,
    pub dropdown_open: bool,
    /// Highlighted result index; -1 means none.
    pub highlight: i32,
    /// Set on selection so the selected label's own query, once it
    /// resolves, does not reopen the dropdown. Cleared by the next edit.
    pub suppress_after_select: bool,
    pub loading: bool,
    /// Latest resolved result set. Replaced wholesale, never merged.
    pub results: Vec<GeoFeature>,
    /// Wire-order coordinates of the committed selection, if any.
    pub selected: Option<LonLat>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            text: String::new(),
            debounced_text: String::new(),
            dropdown_open: false,
            highlight: -1,
            suppress_after_select: false,
            loading: false,
            results: Vec::new(),
            selected: None,
        }
    }
}

/// Events the search controller emits to the embedding UI.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A location was committed (`Some`) or the selection was cleared
    /// (`None`). Always fired before a newer query's results can land.
    SelectionChanged(Option<GeoFeature>),
    DropdownChanged { open: bool },
    /// The input should regain focus (fired by `clear`).
    FocusRequested,
}
