//! Use cases for every EcoRota entity.
//!
//! Services take primitive input (the shape an adapter would deserialize from a
//! request body), build value objects from it, and hand validated drafts to a
//! repository. Each service is generic over the single repository trait it needs,
//! so a [`StandardRepository`](crate::storage::StandardRepository) can back all of
//! them at once.
//!
//! Every failure reaches the caller as an [`EcoRotaError`](crate::EcoRotaError)
//! with its original kind preserved.
//!
//! # Example Usage
//!
//! ```rust
//! use ecorota::config::EcoRotaConfig;
//! use ecorota::providers::{BcryptHashProvider, JwtTokenProvider};
//! use ecorota::services::{AdministratorService, CreateAdministratorInput};
//! use ecorota::storage::{InMemoryStorage, StandardRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EcoRotaConfig::default();
//! let repository = StandardRepository::new(InMemoryStorage::new());
//! let service = AdministratorService::new(
//!     repository,
//!     BcryptHashProvider::from_config(&config.hashing)?,
//!     JwtTokenProvider::from_config(&config.token)?,
//! );
//!
//! service
//!     .create(CreateAdministratorInput {
//!         name: "Ana".into(),
//!         email: "ana@ecorota.com".into(),
//!         password: "s3nh@forte".into(),
//!     })
//!     .await?;
//! let session = service.authenticate("ana@ecorota.com", "s3nh@forte").await?;
//! assert!(!session.token.is_empty());
//! # Ok(())
//! # }
//! ```

mod administrator;
mod ecopoint;
mod neighborhood;
mod problem_report;
mod route;
mod subscriber;

pub use administrator::{
    AdministratorService, AuthenticatedAdministrator, CreateAdministratorInput,
    UpdateAdministratorInput,
};
pub use ecopoint::{CreateEcopointInput, EcopointService, UpdateEcopointInput};
pub use neighborhood::{CreateNeighborhoodInput, NeighborhoodService, UpdateNeighborhoodInput};
pub use problem_report::{
    ProblemReportFilter, ProblemReportService, ReportProblemInput, ResolveProblemInput,
    UpdateProblemReportInput,
};
pub use route::{CreateRouteInput, RouteService, UpdateRouteInput};
pub use subscriber::{RegisterSubscriberInput, SubscriberService, UpdateSubscriberInput};

use crate::domain::value_objects::{CollectionDays, CollectionTime};
use crate::error::ValidationResult;

/// Weekday names as sent by clients, in any order or case.
pub(crate) fn collection_days(days: &[String]) -> ValidationResult<CollectionDays> {
    CollectionDays::from_string(&days.join(","))
}

pub(crate) fn collection_time(start: &str, end: &str) -> ValidationResult<CollectionTime> {
    CollectionTime::new(start, end)
}

/// Parse `Some(raw)` with `parse`, keeping `None` as "unchanged".
pub(crate) fn changed<T, U>(
    raw: Option<T>,
    parse: impl FnOnce(T) -> ValidationResult<U>,
) -> ValidationResult<Option<U>> {
    raw.map(parse).transpose()
}
