//! Draft state for the sort selection screen.
//!
//! # Invariants
//! - At most one sort is selected.
//! - `is_changed` compares the draft with the sort the editor opened with.

use crate::model::query::{SortSpec, SORT_CATALOG};

/// Sort screen draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEditor {
    initial: Option<SortSpec>,
    selected: Option<SortSpec>,
}

impl SortEditor {
    /// Opens the editor on the currently applied sort.
    pub fn open(current: Option<SortSpec>) -> Self {
        Self {
            initial: current,
            selected: current,
        }
    }

    /// Catalog options in screen order.
    pub fn options(&self) -> &'static [SortSpec] {
        &SORT_CATALOG
    }

    /// Selects `spec`, replacing any previous selection.
    pub fn select(&mut self, spec: SortSpec) {
        self.selected = Some(spec);
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<SortSpec> {
        self.selected
    }

    pub fn is_selected(&self, spec: SortSpec) -> bool {
        self.selected == Some(spec)
    }

    /// Whether applying would change the store; drives the apply button.
    pub fn is_changed(&self) -> bool {
        self.selected != self.initial
    }

    /// Finishes editing and returns the sort to apply.
    pub fn apply(self) -> Option<SortSpec> {
        self.selected
    }
}
