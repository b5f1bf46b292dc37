//! Core domain logic for the contacts viewer.
//! This crate is the single source of truth for contact list invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod source;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::contact::{
    parse_channel_tag, Avatar, ChannelTag, ChannelTagParseError, Contact, ContactId,
    ContactRecord,
};
pub use model::query::{
    filter_catalog, parse_sort_spec, Filter, SortDirection, SortKey, SortSpec,
    SortSpecParseError, SORT_CATALOG,
};
pub use service::contact_list_service::ContactListService;
pub use service::filter_editor::FilterEditor;
pub use service::sort_editor::SortEditor;
pub use source::contact_source::{ContactSource, SourceError, SourceResult};
pub use source::loader::{ContactLoader, LoadError, LoadTask};
pub use source::sqlite_source::SqliteContactSource;
pub use store::contact_store::{ContactStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
