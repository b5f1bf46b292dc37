//! In-memory contact collection state.
//!
//! # Responsibility
//! - Own the authoritative contact list for one app session.
//! - Derive the displayed list from the active sort spec and filter set.
//! - Keep deletions consistent between displayed and authoritative lists.
//!
//! # Invariants
//! - Displayed list is always `sort(filter(authoritative, filters), sort)`.
//! - Filters are conjunctive: a contact must carry every selected tag.
//! - Sorting is stable; equal keys keep their load order.
//! - Delete removes exactly the record that produced the displayed entry.
//! - A failed delete leaves every piece of state unchanged.

use crate::model::contact::{Contact, ContactId, ContactRecord};
use crate::model::query::{Filter, SortSpec};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Displayed index does not address a visible contact.
    IndexOutOfRange { index: usize, len: usize },
    /// No authoritative record carries this id.
    NotFound(ContactId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "displayed index {index} out of range for view of length {len}"
            ),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Contact list state manager.
///
/// Owned by the session that created it. Not internally synchronized.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    records: Vec<ContactRecord>,
    sort: Option<SortSpec>,
    filters: BTreeSet<Filter>,
}

impl ContactStore {
    /// Creates an empty store with no sort and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the authoritative list with `contacts` in load order.
    ///
    /// Every contact receives a fresh `ContactId`. Sort and filters are kept.
    pub fn load(&mut self, contacts: Vec<Contact>) {
        self.records = contacts.into_iter().map(ContactRecord::new).collect();
        info!(
            "event=contacts_load module=store status=ok count={}",
            self.records.len()
        );
    }

    /// Replaces the sort spec and returns the recomputed view.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Vec<ContactRecord> {
        self.sort = sort;
        let view = self.view();
        debug!(
            "event=sort_apply module=store status=ok sort={} view_len={}",
            sort.map_or("none", |spec| spec.code()),
            view.len()
        );
        view
    }

    /// Replaces the filter set wholesale and returns the recomputed view.
    pub fn set_filters(
        &mut self,
        filters: impl IntoIterator<Item = Filter>,
    ) -> Vec<ContactRecord> {
        self.filters = filters.into_iter().collect();
        let view = self.view();
        debug!(
            "event=filters_apply module=store status=ok filter_count={} view_len={}",
            self.filters.len(),
            view.len()
        );
        view
    }

    /// Deletes the contact shown at `index` in the current view.
    ///
    /// Returns the view with that entry removed, which equals a fresh
    /// recomputation over the shrunk authoritative list.
    ///
    /// # Errors
    /// - `StoreError::IndexOutOfRange` when `index >= view.len()`.
    pub fn delete_at(&mut self, index: usize) -> StoreResult<Vec<ContactRecord>> {
        let mut view = self.view();
        if index >= view.len() {
            warn!(
                "event=contact_delete module=store status=error error_code=index_out_of_range index={} view_len={}",
                index,
                view.len()
            );
            return Err(StoreError::IndexOutOfRange {
                index,
                len: view.len(),
            });
        }

        let target = view.remove(index);
        self.remove_record(target.id)?;
        info!(
            "event=contact_delete module=store status=ok index={} remaining={}",
            index,
            self.records.len()
        );
        Ok(view)
    }

    /// Deletes the contact with `id` and returns the recomputed view.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no record carries `id`.
    pub fn delete_by_id(&mut self, id: ContactId) -> StoreResult<Vec<ContactRecord>> {
        self.remove_record(id)?;
        Ok(self.view())
    }

    /// Computes the displayed list: filter in load order, then stable sort.
    pub fn view(&self) -> Vec<ContactRecord> {
        let mut view: Vec<ContactRecord> = self
            .records
            .iter()
            .filter(|record| self.passes_filters(&record.contact))
            .cloned()
            .collect();

        if let Some(spec) = self.sort {
            view.sort_by(|left, right| spec.compare(&left.contact, &right.contact));
        }

        view
    }

    /// Currently applied sort spec.
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Currently applied filter set.
    pub fn filters(&self) -> &BTreeSet<Filter> {
        &self.filters
    }

    /// Authoritative records in load order.
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Number of authoritative records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn passes_filters(&self, contact: &Contact) -> bool {
        self.filters.iter().all(|filter| filter.matches(contact))
    }

    fn remove_record(&mut self, id: ContactId) -> StoreResult<ContactRecord> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.records.remove(position))
    }
}
