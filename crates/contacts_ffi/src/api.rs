//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the contact list session to Dart via FRB.
//! - Translate core values into flat, string-keyed envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each `ContactSession` owns its own store; nothing is shared globally.
//! - Failures are reported in envelopes, never thrown.

use contacts_core::{
    core_version as core_version_inner, filter_catalog, init_logging as init_logging_inner,
    parse_channel_tag, parse_sort_spec, ping as ping_inner, Avatar, ContactListService,
    ContactRecord, Filter, SqliteContactSource, StoreError, SORT_CATALOG,
};
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;

const ADDRESS_BOOK_FILE_NAME: &str = "contacts_address_book.sqlite3";
const ADDRESS_BOOK_PATH_ENV: &str = "CONTACTS_DB_PATH";

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
/// Repeating the same `level + log_dir` is accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One displayed contact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    /// Session-stable contact id in string form.
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Channel ids in icon display order.
    pub channels: Vec<String>,
    /// Raw thumbnail bytes; `None` means render the placeholder.
    pub avatar_thumbnail: Option<Vec<u8>>,
}

/// View response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Current displayed list (unchanged view on failure).
    pub items: Vec<ContactItem>,
    /// Human-readable diagnostics message.
    pub message: String,
}

/// Sort option row for the sort screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptionItem {
    pub code: String,
    pub label: String,
}

/// Filter option row for the filter screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptionItem {
    pub channel: String,
    pub label: String,
    pub icon: String,
}

/// Lists sort options in screen order.
#[flutter_rust_bridge::frb(sync)]
pub fn sort_options() -> Vec<SortOptionItem> {
    SORT_CATALOG
        .iter()
        .map(|spec| SortOptionItem {
            code: spec.code().to_string(),
            label: spec.label().to_string(),
        })
        .collect()
}

/// Lists filter options in channel display order.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_options() -> Vec<FilterOptionItem> {
    filter_catalog()
        .into_iter()
        .map(|filter| FilterOptionItem {
            channel: filter.tag.as_str().to_string(),
            label: filter.label,
            icon: filter.icon,
        })
        .collect()
}

/// Contact list state for one app session.
///
/// Dart owns the handle; FRB serializes access to it.
#[flutter_rust_bridge::frb(opaque)]
#[derive(Debug, Default)]
pub struct ContactSession {
    service: ContactListService,
}

impl ContactSession {
    /// Creates a session with an empty contact list.
    #[flutter_rust_bridge::frb(sync)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the address book once and returns the initial view.
    ///
    /// `db_path` falls back to `CONTACTS_DB_PATH`, then to a file in the
    /// temp directory. The file is only read. On failure the session holds
    /// an empty list and the response carries `ok = false` with the reason.
    pub async fn load_contacts(&mut self, db_path: Option<String>) -> ContactListResponse {
        let path = resolve_address_book_path(db_path);
        let source = Arc::new(SqliteContactSource::new(path));
        match self.service.try_load_from(source).await {
            Ok(view) => {
                let message = format!("Loaded {} contact(s).", view.len());
                success(view, message)
            }
            Err(err) => self.failure(format!("load_contacts failed: {err}")),
        }
    }

    /// Applies a sort code (`None` or empty clears the sort).
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_sort(&mut self, sort_code: Option<String>) -> ContactListResponse {
        let code = sort_code.unwrap_or_default();
        if code.trim().is_empty() {
            let view = self.service.set_sort(None);
            return success(view, "Sort cleared.");
        }

        match parse_sort_spec(&code) {
            Ok(spec) => {
                let view = self.service.set_sort(Some(spec));
                success(view, format!("Sorted {}.", spec.label()))
            }
            Err(err) => self.failure(format!("set_sort failed: {err}")),
        }
    }

    /// Replaces the filter set with the given channel ids.
    ///
    /// Any unknown id rejects the whole request and keeps current filters.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_filters(&mut self, channels: Vec<String>) -> ContactListResponse {
        let parsed = channels
            .iter()
            .map(|value| parse_channel_tag(value).map(Filter::for_tag))
            .collect::<Result<Vec<_>, _>>();

        match parsed {
            Ok(filters) => {
                let view = self.service.set_filters(filters);
                let message = format!("Showing {} contact(s).", view.len());
                success(view, message)
            }
            Err(err) => self.failure(format!("set_filters failed: {err}")),
        }
    }

    /// Deletes the contact at a displayed index.
    ///
    /// Negative and too-large indices are reported as out of range.
    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_at(&mut self, index: i64) -> ContactListResponse {
        let Ok(position) = usize::try_from(index) else {
            return self.out_of_range(index);
        };

        match self.service.delete_at(position) {
            Ok(view) => success(view, "Contact deleted."),
            Err(StoreError::IndexOutOfRange { .. }) => self.out_of_range(index),
            Err(err) => self.failure(format!("delete_at failed: {err}")),
        }
    }

    /// Returns the current view without changing anything.
    #[flutter_rust_bridge::frb(sync)]
    pub fn view(&self) -> ContactListResponse {
        success(self.service.view(), "OK")
    }

    /// Code of the applied sort, if any.
    #[flutter_rust_bridge::frb(sync)]
    pub fn applied_sort(&self) -> Option<String> {
        self.service
            .store()
            .sort()
            .map(|spec| spec.code().to_string())
    }

    /// Channel ids of the applied filters in display order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn applied_filters(&self) -> Vec<String> {
        self.service
            .store()
            .filters()
            .iter()
            .map(|filter| filter.tag.as_str().to_string())
            .collect()
    }

    fn out_of_range(&self, index: i64) -> ContactListResponse {
        let len = self.service.view().len();
        warn!(
            "event=ffi_delete module=ffi status=error error_code=index_out_of_range index={} view_len={}",
            index, len
        );
        self.failure(format!(
            "delete_at failed: index {index} out of range for {len} contact(s)"
        ))
    }

    fn failure(&self, message: String) -> ContactListResponse {
        ContactListResponse {
            ok: false,
            items: to_items(self.service.view()),
            message,
        }
    }
}

fn success(view: Vec<ContactRecord>, message: impl Into<String>) -> ContactListResponse {
    ContactListResponse {
        ok: true,
        items: to_items(view),
        message: message.into(),
    }
}

fn to_items(view: Vec<ContactRecord>) -> Vec<ContactItem> {
    view.into_iter().map(to_item).collect()
}

fn to_item(record: ContactRecord) -> ContactItem {
    let contact = record.contact;
    ContactItem {
        id: record.id.to_string(),
        channels: contact
            .channels
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect(),
        avatar_thumbnail: match contact.avatar {
            Avatar::Thumbnail(bytes) => Some(bytes),
            Avatar::Placeholder => None,
        },
        given_name: contact.given_name,
        family_name: contact.family_name,
        phone: contact.phone,
        email: contact.email,
    }
}

fn resolve_address_book_path(explicit: Option<String>) -> PathBuf {
    let explicit = explicit
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty());
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    if let Ok(raw) = std::env::var(ADDRESS_BOOK_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(ADDRESS_BOOK_FILE_NAME)
}
