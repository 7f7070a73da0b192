//! Unit tests through the public API.
//!
//! - [`value_objects`] - boundary properties and canonical forms
//! - [`numbering`] - snapshot numbering and the atomic sequence
//! - [`errors`] - error classification and messages

pub mod errors;
pub mod numbering;
pub mod value_objects;
