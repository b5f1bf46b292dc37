//! Domain model for the contact list.
//!
//! # Responsibility
//! - Define the contact value delivered by address-book sources.
//! - Define the query parameters (filters, sort) applied to the list.
//!
//! # Invariants
//! - Contacts are plain values; identity is assigned by the store.
//! - Filters are keyed by channel tag alone.

pub mod contact;
pub mod query;
