//! Domain core for municipal waste-collection management.
//!
//! EcoRota tracks collection routes, the neighborhoods they serve, drop-off
//! ecopoints, resident subscriptions and citizen problem reports. This crate
//! holds the rules: self-validating value objects, entity aggregates, protocol
//! numbering for problem reports and a typed error taxonomy, plus use-case
//! services and reference storage, hashing and token collaborators.
//!
//! # Core Components
//!
//! - [`domain::value_objects`] - emails, postal codes, schedules, materials and
//!   the problem-report lifecycle, each valid by construction
//! - [`domain::entities`] - routes, neighborhoods, ecopoints, subscribers,
//!   problem reports and administrators
//! - [`domain::numbering`] - `PR-YYYY-NNNN` protocol numbers
//! - [`services`] - one service per entity
//! - [`storage`] - repository traits and an in-memory store
//! - [`providers`] - password hashing and access tokens
//!
//! # Quick Start
//!
//! ```rust
//! use ecorota::config::EcoRotaConfig;
//! use ecorota::domain::numbering::InMemoryProtocolSequence;
//! use ecorota::services::{ProblemReportFilter, ProblemReportService};
//! use ecorota::storage::{InMemoryStorage, StandardRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EcoRotaConfig::from_env()?;
//! let reports = ProblemReportService::new(
//!     StandardRepository::new(InMemoryStorage::new()),
//!     InMemoryProtocolSequence::new(),
//!     config.protocol,
//! );
//! assert!(reports.list(ProblemReportFilter::default()).await?.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! The library logs through the `log` facade and never installs a logger.

pub mod config;
pub mod domain;
pub mod error;
pub mod providers;
pub mod services;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EcoRotaConfig};
pub use error::{EcoRotaError, EcoRotaResult, ErrorKind, ValidationError, ValidationResult};
pub use providers::ProviderError;
pub use storage::{EntityKind, PersistenceError};
