//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate loading and store queries into session-level APIs.
//! - Model sort/filter screen drafts so UI layers stay thin.

pub mod contact_list_service;
pub mod filter_editor;
pub mod sort_editor;
