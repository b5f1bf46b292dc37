//! Contact list use-case service.
//!
//! # Responsibility
//! - Drive one session's contact list: load once, then query and delete.
//! - Bridge sort/filter editor drafts into store updates.
//!
//! # Invariants
//! - The service owns exactly one `ContactStore`; no store is shared
//!   implicitly between sessions.
//! - Load failures leave an empty authoritative list, never an error.

use crate::model::contact::{Contact, ContactRecord};
use crate::model::query::{Filter, SortSpec};
use crate::service::filter_editor::FilterEditor;
use crate::service::sort_editor::SortEditor;
use crate::source::contact_source::ContactSource;
use crate::source::loader::{ContactLoader, LoadError, LoadTask};
use crate::store::contact_store::{ContactStore, StoreResult};
use std::sync::Arc;

/// Session-scoped facade over `ContactStore`.
#[derive(Debug, Default)]
pub struct ContactListService {
    store: ContactStore,
}

impl ContactListService {
    /// Creates a service with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading `source` without borrowing the service.
    pub fn start_load(source: Arc<dyn ContactSource>) -> LoadTask {
        ContactLoader::spawn(source)
    }

    /// Completes a load started with `start_load` and returns the view.
    pub async fn finish_load(&mut self, task: LoadTask) -> Vec<ContactRecord> {
        let contacts = task.contacts_or_empty().await;
        self.store.load(contacts);
        self.store.view()
    }

    /// Loads `source` and returns the resulting view.
    pub async fn load_from(&mut self, source: Arc<dyn ContactSource>) -> Vec<ContactRecord> {
        let task = Self::start_load(source);
        self.finish_load(task).await
    }

    /// Loads `source` like `load_from`, but also hands back the failure.
    ///
    /// On error the store still holds an empty list.
    pub async fn try_load_from(
        &mut self,
        source: Arc<dyn ContactSource>,
    ) -> Result<Vec<ContactRecord>, LoadError> {
        match Self::start_load(source).join().await {
            Ok(contacts) => Ok(self.load(contacts)),
            Err(err) => {
                self.store.load(Vec::new());
                Err(err)
            }
        }
    }

    /// Replaces the list with already-read contacts.
    pub fn load(&mut self, contacts: Vec<Contact>) -> Vec<ContactRecord> {
        self.store.load(contacts);
        self.store.view()
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Vec<ContactRecord> {
        self.store.set_sort(sort)
    }

    pub fn set_filters(
        &mut self,
        filters: impl IntoIterator<Item = Filter>,
    ) -> Vec<ContactRecord> {
        self.store.set_filters(filters)
    }

    /// Current displayed list.
    pub fn view(&self) -> Vec<ContactRecord> {
        self.store.view()
    }

    /// Deletes the contact at a displayed index.
    pub fn delete_at(&mut self, index: usize) -> StoreResult<Vec<ContactRecord>> {
        self.store.delete_at(index)
    }

    /// Opens a sort draft seeded with the applied sort.
    pub fn sort_editor(&self) -> SortEditor {
        SortEditor::open(self.store.sort())
    }

    /// Opens a filter draft seeded with the applied filters.
    pub fn filter_editor(&self) -> FilterEditor {
        FilterEditor::open(self.store.filters())
    }

    /// Applies a finished sort draft.
    pub fn apply_sort_editor(&mut self, editor: SortEditor) -> Vec<ContactRecord> {
        self.store.set_sort(editor.apply())
    }

    /// Applies a finished filter draft.
    pub fn apply_filter_editor(&mut self, editor: FilterEditor) -> Vec<ContactRecord> {
        self.store.set_filters(editor.apply())
    }
}
