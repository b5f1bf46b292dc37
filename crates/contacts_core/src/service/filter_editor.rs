//! Draft state for the filter selection screen.
//!
//! # Invariants
//! - Selection is a set keyed by channel tag.
//! - `toggle_all` selects every catalog filter unless all are already
//!   selected, in which case it clears the selection.
//! - `is_changed` compares the draft with the set the editor opened with.

use crate::model::contact::ChannelTag;
use crate::model::query::{filter_catalog, Filter};
use std::collections::BTreeSet;

/// Filter screen draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEditor {
    catalog: Vec<Filter>,
    initial: BTreeSet<Filter>,
    selected: BTreeSet<Filter>,
}

impl FilterEditor {
    /// Opens the editor on the currently applied filters.
    pub fn open(current: &BTreeSet<Filter>) -> Self {
        Self {
            catalog: filter_catalog(),
            initial: current.clone(),
            selected: current.clone(),
        }
    }

    /// Catalog filters in tag display order.
    pub fn options(&self) -> &[Filter] {
        &self.catalog
    }

    /// Flips the selection state of `tag`.
    pub fn toggle(&mut self, tag: ChannelTag) {
        let filter = Filter::for_tag(tag);
        if !self.selected.remove(&filter) {
            self.selected.insert(filter);
        }
    }

    /// The "apply all" row.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.catalog.iter().cloned().collect();
        }
    }

    pub fn all_selected(&self) -> bool {
        self.selected.len() == self.catalog.len()
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, tag: ChannelTag) -> bool {
        self.selected.iter().any(|filter| filter.tag == tag)
    }

    pub fn selected(&self) -> &BTreeSet<Filter> {
        &self.selected
    }

    /// Whether applying would change the store; drives the apply button.
    pub fn is_changed(&self) -> bool {
        self.selected != self.initial
    }

    /// Finishes editing and returns the filter set to apply.
    pub fn apply(self) -> BTreeSet<Filter> {
        self.selected
    }
}
