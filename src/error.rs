//! Error types for EcoRota domain operations.
//!
//! The taxonomy has three families, each a closed set of tagged variants:
//!
//! - [`ValidationError`] - a candidate value violates a value-object invariant.
//!   Raised synchronously at construction time and never retried.
//! - [`PersistenceError`](crate::storage::PersistenceError) - raised by storage
//!   collaborators (missing target, uniqueness conflict, blocked delete, technical failure).
//! - [`ProviderError`](crate::providers::ProviderError) - hashing and token
//!   infrastructure failures.
//!
//! [`EcoRotaError`] composes the three so use cases can propagate any of them
//! with `?`, and [`ErrorKind`] classifies an error for adapters that need to map
//! kinds to an external representation without matching on messages.

use crate::providers::ProviderError;
use crate::storage::PersistenceError;

/// Main error type for EcoRota use cases.
#[derive(Debug, thiserror::Error)]
pub enum EcoRotaError {
    /// A value object rejected its input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A storage collaborator failed or reported an integrity violation.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A hashing or token provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Authentication failed. Does not reveal which credential was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Validation errors, one variant per value-object concern.
///
/// Each variant carries the offending input and, where relevant, the limit or
/// the list of allowed values, so callers can build precise feedback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid email '{value}': {reason}")]
    InvalidEmail { value: String, reason: String },

    #[error("Invalid postal code '{value}': expected 8 digits, found {digits}")]
    InvalidPostalCode { value: String, digits: usize },

    #[error("Invalid geolocation ({latitude}, {longitude}): {reason}")]
    InvalidGeoLocation {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid population estimate '{value}': {reason}")]
    InvalidPopulationEstimate { value: String, reason: String },

    #[error("Invalid collection days: {reason}")]
    InvalidCollectionDays { reason: String },

    #[error("Invalid collection time: {reason}")]
    InvalidCollectionTime { reason: String },

    #[error("Invalid collection type '{value}', allowed values: {allowed:?}")]
    InvalidCollectionType { value: String, allowed: Vec<String> },

    #[error("Invalid accepted materials: {reason}")]
    InvalidAcceptedMaterials { reason: String },

    #[error("Invalid problem status '{value}', allowed values: {allowed:?}")]
    InvalidProblemStatus { value: String, allowed: Vec<String> },

    #[error("Invalid problem type '{value}', allowed values: {allowed:?}")]
    InvalidProblemType { value: String, allowed: Vec<String> },

    #[error("Problem description must have between {min} and {max} characters, got {length}")]
    InvalidProblemDescription {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Problem justification must have between {min} and {max} characters, got {length}")]
    InvalidProblemJustification {
        length: usize,
        min: usize,
        max: usize,
    },

    /// A justification was attached to a report whose status is not final.
    #[error("A justification is only allowed for resolved or rejected reports, status is '{status}'")]
    JustificationNotAllowed { status: String },

    #[error("Invalid problem protocol '{value}': {reason}")]
    InvalidProblemProtocol { value: String, reason: String },

    /// A required entity field (name, password, ...) is blank.
    #[error("Required field '{field}' is missing or blank")]
    MissingField { field: String },
}

/// Coarse classification of an error, for adapters.
///
/// A presentation layer typically maps `InvalidInput` to 400, `NotFound` to 404,
/// `Conflict` to 409, `Unauthorized` to 401 and `Internal` to 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Unauthorized,
    Internal,
}

impl EcoRotaError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EcoRotaError::Validation(_) => ErrorKind::InvalidInput,
            EcoRotaError::Persistence(e) => e.kind(),
            EcoRotaError::Provider(e) => e.kind(),
            EcoRotaError::InvalidCredentials => ErrorKind::Unauthorized,
        }
    }

    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            EcoRotaError::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// The persistence error, if this is one.
    pub fn as_persistence(&self) -> Option<&PersistenceError> {
        match self {
            EcoRotaError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

// Convenience methods for creating common errors
impl ValidationError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid email error
    pub fn invalid_email(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEmail {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid address error
    pub fn invalid_address(reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            reason: reason.into(),
        }
    }

    /// Create an invalid collection days error
    pub fn invalid_collection_days(reason: impl Into<String>) -> Self {
        Self::InvalidCollectionDays {
            reason: reason.into(),
        }
    }

    /// Create an invalid collection time error
    pub fn invalid_collection_time(reason: impl Into<String>) -> Self {
        Self::InvalidCollectionTime {
            reason: reason.into(),
        }
    }

    /// Create an invalid accepted materials error
    pub fn invalid_accepted_materials(reason: impl Into<String>) -> Self {
        Self::InvalidAcceptedMaterials {
            reason: reason.into(),
        }
    }

    /// Create an invalid problem protocol error
    pub fn invalid_protocol(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProblemProtocol {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the value object this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidEmail { .. } => "email",
            Self::InvalidPostalCode { .. } => "postalCode",
            Self::InvalidGeoLocation { .. } => "geoLocation",
            Self::InvalidAddress { .. } => "address",
            Self::InvalidPopulationEstimate { .. } => "populationEstimate",
            Self::InvalidCollectionDays { .. } => "collectionDays",
            Self::InvalidCollectionTime { .. } => "collectionTime",
            Self::InvalidCollectionType { .. } => "collectionType",
            Self::InvalidAcceptedMaterials { .. } => "acceptedMaterials",
            Self::InvalidProblemStatus { .. } => "status",
            Self::InvalidProblemType { .. } => "problemType",
            Self::InvalidProblemDescription { .. } => "description",
            Self::InvalidProblemJustification { .. } | Self::JustificationNotAllowed { .. } => {
                "justification"
            }
            Self::InvalidProblemProtocol { .. } => "protocol",
            Self::MissingField { field } => field.as_str(),
        }
    }
}

// Result type aliases for convenience
pub type EcoRotaResult<T> = Result<T, EcoRotaError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
