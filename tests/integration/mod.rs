//! Integration tests: services sharing one store.
//!
//! - [`collection_workflow`] - the administrator-to-resolution path and
//!   cross-entity integrity rules
//! - [`authentication`] - configuration, hashing and token issuance end to end
//! - [`concurrent_reports`] - protocol uniqueness under concurrent submissions

pub mod authentication;
pub mod collection_workflow;
pub mod concurrent_reports;
