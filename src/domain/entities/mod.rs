//! Entity aggregates.
//!
//! Entities pair a storage-assigned identifier with validated value objects,
//! foreign keys and audit metadata. They are only built from value objects that
//! already passed validation, and every change produces a new instance through
//! `with_changes` (or `resolve` for problem reports).
//!
//! Each entity comes with a `New*` draft (what a use case hands to storage before
//! an id exists) and, where it can be edited, a `*Changes` partial update.

mod administrator;
mod audit;
mod ecopoint;
mod ids;
mod neighborhood;
mod problem_report;
mod route;
mod subscriber;

pub use administrator::{Administrator, AdministratorChanges, NewAdministrator};
pub use audit::{AuditInfo, Timestamps};
pub use ecopoint::{Ecopoint, EcopointChanges, NewEcopoint};
pub use ids::{
    AdministratorId, EcopointId, NeighborhoodId, ProblemReportId, RouteId, SubscriberId,
};
pub use neighborhood::{NewNeighborhood, Neighborhood, NeighborhoodChanges};
pub use problem_report::{NewProblemReport, ProblemReport, ProblemReportChanges, Resolution};
pub use route::{NewRoute, Route, RouteChanges};
pub use subscriber::{NewSubscriber, Subscriber, SubscriberChanges};

use crate::error::{ValidationError, ValidationResult};

/// Trim a required text field, failing with `MissingField` when blank.
pub(crate) fn required_name(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing_field(field));
    }
    Ok(trimmed.to_string())
}
