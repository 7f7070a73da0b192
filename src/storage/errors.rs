//! Persistence error types raised by storage collaborators.
//!
//! These errors are produced at the storage boundary and consumed by use cases.
//! They are separate from validation errors: a validation failure says the input is
//! bad, a persistence error says the stored state (or the store itself) refused the
//! operation.

use crate::error::ErrorKind;
use std::fmt;

/// The kind of entity a persistence error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Route,
    Neighborhood,
    Ecopoint,
    Subscriber,
    ProblemReport,
    Administrator,
}

impl EntityKind {
    /// Storage table name for this entity kind.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Route => "routes",
            EntityKind::Neighborhood => "neighborhoods",
            EntityKind::Ecopoint => "ecopoints",
            EntityKind::Subscriber => "subscribers",
            EntityKind::ProblemReport => "problem_reports",
            EntityKind::Administrator => "administrators",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Route => "Route",
            EntityKind::Neighborhood => "Neighborhood",
            EntityKind::Ecopoint => "Ecopoint",
            EntityKind::Subscriber => "Subscriber",
            EntityKind::ProblemReport => "Problem report",
            EntityKind::Administrator => "Administrator",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum PersistenceError {
    /// The lookup, update or delete target does not exist.
    EntityNotFound { entity: EntityKind, id: String },

    /// A uniqueness constraint was violated (duplicate email, route name, protocol...).
    Conflict {
        message: String,
        /// Name of the violated unique field, when known.
        field: Option<String>,
    },

    /// A delete was blocked because dependent rows still reference the target.
    Dependency { message: String },

    /// Catch-all technical failure of the store.
    Persistence {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::EntityNotFound { entity, id } => {
                write!(f, "{} with identifier '{}' was not found.", entity, id)
            }
            PersistenceError::Conflict { message, .. } => write!(f, "{}", message),
            PersistenceError::Dependency { message } => write!(f, "{}", message),
            PersistenceError::Persistence { message, source } => {
                if let Some(source) = source {
                    write!(f, "Persistence failure: {} (cause: {})", message, source)
                } else {
                    write!(f, "Persistence failure: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Persistence {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl PersistenceError {
    /// Create a new EntityNotFound error.
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a new Conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new Conflict error naming the violated unique field.
    pub fn conflict_on(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new Dependency error.
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::Dependency {
            message: message.into(),
        }
    }

    /// Create a new technical persistence error.
    pub fn technical(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new technical persistence error with a source error.
    pub fn technical_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Check if this error indicates an entity was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::EntityNotFound { .. })
    }

    /// Check if this error indicates a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PersistenceError::Conflict { .. })
    }

    /// Check if this is a uniqueness conflict on the given field.
    pub fn is_conflict_on(&self, name: &str) -> bool {
        matches!(self, PersistenceError::Conflict { field: Some(f), .. } if f == name)
    }

    /// Check if this error indicates a blocked delete.
    pub fn is_dependency(&self) -> bool {
        matches!(self, PersistenceError::Dependency { .. })
    }

    /// Classify this error for adapters.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PersistenceError::EntityNotFound { .. } => ErrorKind::NotFound,
            PersistenceError::Conflict { .. } | PersistenceError::Dependency { .. } => {
                ErrorKind::Conflict
            }
            PersistenceError::Persistence { .. } => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(error: serde_json::Error) -> Self {
        Self::technical_with_source("row serialization failed", Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_persistence_error_display() {
        let error = PersistenceError::not_found(EntityKind::Subscriber, 999);
        assert_eq!(
            error.to_string(),
            "Subscriber with identifier '999' was not found."
        );

        let error = PersistenceError::conflict("Email already registered.");
        assert_eq!(error.to_string(), "Email already registered.");

        let error = PersistenceError::technical("disk full");
        assert_eq!(error.to_string(), "Persistence failure: disk full");
    }

    #[test]
    fn test_persistence_error_type_checks() {
        let not_found = PersistenceError::not_found(EntityKind::Route, 1);
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let conflict = PersistenceError::conflict_on("protocol", "Protocol already exists");
        assert!(conflict.is_conflict());
        assert!(conflict.is_conflict_on("protocol"));
        assert!(!conflict.is_conflict_on("email"));

        let dependency = PersistenceError::dependency("Route has neighborhoods");
        assert!(dependency.is_dependency());
        assert_eq!(dependency.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_technical_error_keeps_source() {
        let io = std::io::Error::other("connection reset");
        let error = PersistenceError::technical_with_source("query failed", Box::new(io));
        assert!(error.source().is_some());
        assert!(error.to_string().contains("connection reset"));
        assert_eq!(error.kind(), ErrorKind::Internal);
    }
}
