//! Address-book sources and asynchronous loading.
//!
//! # Responsibility
//! - Define the capability a platform address book implements.
//! - Provide the SQLite-backed source and the cancellable loader task.
//!
//! # Invariants
//! - Sources only read; the store owns the loaded list afterwards.
//! - A failed or cancelled load is observed by the store as an empty list.

pub mod contact_source;
pub mod loader;
pub mod sqlite_source;
