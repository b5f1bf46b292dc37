//! Contact list state management.
//!
//! # Responsibility
//! - Hold the authoritative contact list and derive displayed projections.
//!
//! # Invariants
//! - The displayed list is never stored; it is recomputed on demand.

pub mod contact_store;
