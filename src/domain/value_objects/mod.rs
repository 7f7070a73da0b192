//! Value objects for the waste-collection domain.
//!
//! Every business rule about a single field lives here: email normalization,
//! postal-code canonicalization, coordinate bounds, schedule sets, the closed
//! label lists and the problem-report lifecycle. Each value object enforces its
//! invariants at construction time, so an instance that exists is valid.
//!
//! ## Design Principles
//!
//! - **Immutable**: no setters; "mutation" methods return a new value
//! - **Self-validating**: constructors return `ValidationResult<Self>`
//! - **Canonical**: trimming, case folding, digit stripping, deduplication and
//!   ordering happen before validation, so equality is structural
//! - **Serde-safe**: deserialization routes through the same constructors
//!
//! ## Usage Pattern
//!
//! ```rust
//! use ecorota::domain::value_objects::{CollectionDays, CollectionTime, WeekDay};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let days = CollectionDays::from_string("friday,monday")?;
//!     assert!(days.has_collection_on(WeekDay::Monday));
//!
//!     let window: CollectionTime = "08:00 - 12:00".parse()?;
//!     assert_eq!(window.to_string(), "08:00 - 12:00");
//!     Ok(())
//! }
//! ```

mod accepted_materials;
mod address;
mod collection_days;
mod collection_time;
mod collection_type;
mod email;
mod geo_location;
mod material_type;
mod population_estimate;
mod postal_code;
mod problem_attachments;
mod problem_description;
mod problem_justification;
mod problem_protocol;
mod problem_status;
mod problem_type;
mod week_day;

pub use accepted_materials::AcceptedMaterials;
pub use address::{Address, AddressChanges};
pub use collection_days::CollectionDays;
pub use collection_time::CollectionTime;
pub use collection_type::CollectionType;
pub use email::Email;
pub use geo_location::{GeoLocation, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
pub use material_type::MaterialType;
pub use population_estimate::{NOT_INFORMED, PopulationEstimate};
pub use postal_code::PostalCode;
pub use problem_attachments::ProblemAttachments;
pub use problem_description::{
    MAX_DESCRIPTION_LENGTH, MIN_DESCRIPTION_LENGTH, ProblemDescription,
};
pub use problem_justification::{
    MAX_JUSTIFICATION_LENGTH, MIN_JUSTIFICATION_LENGTH, ProblemJustification,
};
pub use problem_protocol::{MAX_SEQUENCE, ProblemProtocol};
pub use problem_status::ProblemStatus;
pub use problem_type::ProblemType;
pub use week_day::WeekDay;
