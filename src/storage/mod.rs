//! Storage boundary for EcoRota entities.
//!
//! Storage is split in two layers:
//!
//! - [`StorageProvider`] is a row store. It keeps JSON rows per [`EntityKind`],
//!   assigns identifiers, and enforces the relational rules every backend must
//!   honor (unique attributes, foreign keys, delete restrictions) atomically.
//!   It knows nothing about value objects.
//! - The repository traits in [`repository`] speak in entities. The standard
//!   implementations turn entities into primitive [`records`] on the way in and
//!   rebuild them through the value-object constructors on the way out, so a
//!   corrupt row surfaces as a validation error instead of an invalid entity.
//!
//! # Example Usage
//!
//! ```rust
//! use ecorota::storage::{EntityKind, InMemoryStorage, RowConstraints, StorageKey, StorageProvider};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let row = json!({"name": "Rota Centro", "collectionType": "Coleta regular"});
//! let stored = storage
//!     .insert(EntityKind::Route, row, RowConstraints::unique(&["name"]))
//!     .await?;
//! assert_eq!(stored["id"], 1);
//!
//! let key = StorageKey::new(EntityKind::Route, 1);
//! assert!(storage.get(key).await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod records;
pub mod repository;

pub use errors::{EntityKind, PersistenceError};
pub use in_memory::{InMemoryStorage, InMemoryStorageStats};
pub use repository::{
    AdministratorRepository, EcopointRepository, NeighborhoodRepository,
    ProblemReportRepository, RouteRepository, StandardRepository, SubscriberRepository,
};

use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Attribute every stored row carries its identifier under.
pub const ID_ATTRIBUTE: &str = "id";

/// Location of one row: entity kind plus storage-assigned identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageKey {
    entity: EntityKind,
    id: u64,
}

impl StorageKey {
    pub fn new(entity: EntityKind, id: u64) -> Self {
        Self { entity, id }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity.table(), self.id)
    }
}

/// A row attribute holding the id of a row of another entity.
///
/// A `null` or missing value means "no reference" and is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub attribute: &'static str,
    pub references: EntityKind,
}

impl ForeignKey {
    pub const fn new(attribute: &'static str, references: EntityKind) -> Self {
        Self {
            attribute,
            references,
        }
    }
}

/// An attribute of `entity` rows that may point at the row being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub entity: EntityKind,
    pub attribute: &'static str,
}

impl Reference {
    pub const fn new(entity: EntityKind, attribute: &'static str) -> Self {
        Self { entity, attribute }
    }
}

/// Rules checked when a row is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowConstraints {
    /// Attributes whose value must be unique among rows of the same entity.
    pub unique: &'static [&'static str],
    pub foreign_keys: &'static [ForeignKey],
}

impl RowConstraints {
    pub const fn none() -> Self {
        Self {
            unique: &[],
            foreign_keys: &[],
        }
    }

    pub const fn unique(attributes: &'static [&'static str]) -> Self {
        Self {
            unique: attributes,
            foreign_keys: &[],
        }
    }

    pub const fn with_foreign_keys(self, foreign_keys: &'static [ForeignKey]) -> Self {
        Self {
            unique: self.unique,
            foreign_keys,
        }
    }
}

/// Core trait for row stores.
///
/// Every write is atomic with respect to its constraint checks: two concurrent
/// inserts of the same unique value cannot both succeed, and a delete cannot race
/// with an insert that adds a reference to the deleted row.
///
/// # Behavior
///
/// - Rows are JSON objects; anything else is rejected with a persistence error.
/// - `insert` assigns the next identifier for the entity kind (starting at 1) and
///   stores it under [`ID_ATTRIBUTE`]. Identifiers are never reused.
/// - Unique violations fail with `Conflict` naming the attribute. Dangling foreign
///   keys fail with `EntityNotFound` for the referenced entity.
/// - Listing and searching return rows ordered by identifier.
pub trait StorageProvider: Send + Sync {
    /// Store a new row and return it as stored, identifier included.
    fn insert(
        &self,
        entity: EntityKind,
        row: Value,
        constraints: RowConstraints,
    ) -> impl Future<Output = Result<Value, PersistenceError>> + Send;

    /// Retrieve a row. `None` when it does not exist.
    fn get(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<Value>, PersistenceError>> + Send;

    /// Replace an existing row. Unique checks ignore the row itself.
    ///
    /// Fails with `EntityNotFound` when the row does not exist.
    fn replace(
        &self,
        key: StorageKey,
        row: Value,
        constraints: RowConstraints,
    ) -> impl Future<Output = Result<Value, PersistenceError>> + Send;

    /// Delete a row unless one of `referenced_by` still points at it.
    ///
    /// Returns `false` when the row did not exist. A remaining reference fails
    /// with `Dependency` and leaves the row in place.
    fn delete(
        &self,
        key: StorageKey,
        referenced_by: &'static [Reference],
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;

    /// All rows of an entity kind.
    fn list(
        &self,
        entity: EntityKind,
    ) -> impl Future<Output = Result<Vec<Value>, PersistenceError>> + Send;

    /// Rows whose `attribute` (dot notation for nested values) equals `value`.
    fn find_by_attribute(
        &self,
        entity: EntityKind,
        attribute: &str,
        value: &Value,
    ) -> impl Future<Output = Result<Vec<Value>, PersistenceError>> + Send;

    fn exists(&self, key: StorageKey)
    -> impl Future<Output = Result<bool, PersistenceError>> + Send;

    fn count(
        &self,
        entity: EntityKind,
    ) -> impl Future<Output = Result<usize, PersistenceError>> + Send;
}

/// Read a possibly nested attribute using dot notation (`address.postalCode`).
pub fn extract_attribute<'a>(row: &'a Value, attribute: &str) -> Option<&'a Value> {
    attribute.split('.').try_fold(row, |current, part| {
        match part.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(part),
        }
    })
}
