//! In-memory row store.
//!
//! A thread-safe implementation of [`StorageProvider`] backed by one ordered map
//! per entity kind behind a tokio `RwLock`. Constraint checks and the write they
//! guard happen under the same write lock, so the relational rules hold under
//! concurrent use. Intended for tests, development and embedding.
//!
//! # Performance Characteristics
//!
//! * GET/EXISTS: O(log n)
//! * INSERT/REPLACE: O(n) per unique attribute, O(log n) per foreign key
//! * DELETE: O(m) over the rows of every referencing entity
//! * LIST/FIND_BY_ATTRIBUTE: O(n)
//!
//! # Example Usage
//!
//! ```rust
//! use ecorota::storage::{
//!     EntityKind, ForeignKey, InMemoryStorage, Reference, RowConstraints, StorageKey,
//!     StorageProvider,
//! };
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! const ROUTE_FK: &[ForeignKey] = &[ForeignKey::new("routeId", EntityKind::Route)];
//! const ROUTE_REFS: &[Reference] = &[Reference::new(EntityKind::Neighborhood, "routeId")];
//!
//! let storage = InMemoryStorage::new();
//! storage
//!     .insert(EntityKind::Route, json!({"name": "Rota 1"}), RowConstraints::none())
//!     .await?;
//! storage
//!     .insert(
//!         EntityKind::Neighborhood,
//!         json!({"name": "Centro", "routeId": 1}),
//!         RowConstraints::none().with_foreign_keys(ROUTE_FK),
//!     )
//!     .await?;
//!
//! let blocked = storage
//!     .delete(StorageKey::new(EntityKind::Route, 1), ROUTE_REFS)
//!     .await;
//! assert!(blocked.unwrap_err().is_dependency());
//! # Ok(())
//! # }
//! ```

use crate::storage::{
    EntityKind, ID_ATTRIBUTE, PersistenceError, Reference, RowConstraints, StorageKey,
    StorageProvider, extract_attribute,
};
use log::{debug, trace};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<EntityKind, BTreeMap<u64, Value>>,
    last_ids: HashMap<EntityKind, u64>,
}

impl Tables {
    fn table(&self, entity: EntityKind) -> Option<&BTreeMap<u64, Value>> {
        self.rows.get(&entity)
    }

    fn contains(&self, key: StorageKey) -> bool {
        self.table(key.entity())
            .is_some_and(|table| table.contains_key(&key.id()))
    }

    fn check_constraints(
        &self,
        entity: EntityKind,
        row: &Value,
        constraints: RowConstraints,
        own_id: Option<u64>,
    ) -> Result<(), PersistenceError> {
        for foreign_key in constraints.foreign_keys {
            let Some(value) = extract_attribute(row, foreign_key.attribute) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let id = value.as_u64().ok_or_else(|| {
                PersistenceError::technical(format!(
                    "{}.{} must be a non-negative integer, got {}",
                    entity.table(),
                    foreign_key.attribute,
                    value
                ))
            })?;
            if !self.contains(StorageKey::new(foreign_key.references, id)) {
                return Err(PersistenceError::not_found(foreign_key.references, id));
            }
        }

        let Some(table) = self.table(entity) else {
            return Ok(());
        };
        for attribute in constraints.unique {
            let Some(value) = extract_attribute(row, attribute) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let taken = table.iter().any(|(id, existing)| {
                Some(*id) != own_id && extract_attribute(existing, attribute) == Some(value)
            });
            if taken {
                return Err(PersistenceError::conflict_on(
                    *attribute,
                    format!(
                        "{} with {} {} already exists.",
                        entity,
                        attribute,
                        display_value(value)
                    ),
                ));
            }
        }
        Ok(())
    }

    fn first_reference(&self, key: StorageKey, referenced_by: &[Reference]) -> Option<Reference> {
        let target = Value::from(key.id());
        referenced_by.iter().copied().find(|reference| {
            self.table(reference.entity).is_some_and(|table| {
                table
                    .values()
                    .any(|row| extract_attribute(row, reference.attribute) == Some(&target))
            })
        })
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

fn ensure_object(entity: EntityKind, row: &Value) -> Result<(), PersistenceError> {
    if row.is_object() {
        Ok(())
    } else {
        Err(PersistenceError::technical(format!(
            "rows of {} must be JSON objects",
            entity.table()
        )))
    }
}

fn with_id(mut row: Value, id: u64) -> Value {
    if let Some(object) = row.as_object_mut() {
        object.insert(ID_ATTRIBUTE.to_string(), Value::from(id));
    }
    row
}

/// Thread-safe in-memory row store.
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStorage {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryStorageStats {
        let tables = self.tables.read().await;
        let non_empty = tables.rows.values().filter(|table| !table.is_empty());
        InMemoryStorageStats {
            table_count: non_empty.clone().count(),
            total_rows: non_empty.map(BTreeMap::len).sum(),
        }
    }

    /// Clear all data, identifier counters included (useful for testing).
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.rows.clear();
        tables.last_ids.clear();
    }
}

impl StorageProvider for InMemoryStorage {
    async fn insert(
        &self,
        entity: EntityKind,
        row: Value,
        constraints: RowConstraints,
    ) -> Result<Value, PersistenceError> {
        ensure_object(entity, &row)?;
        let mut tables = self.tables.write().await;
        tables.check_constraints(entity, &row, constraints, None)?;

        let id = {
            let last = tables.last_ids.entry(entity).or_insert(0);
            *last += 1;
            *last
        };
        let stored = with_id(row, id);
        tables
            .rows
            .entry(entity)
            .or_default()
            .insert(id, stored.clone());

        debug!("Inserted {}", StorageKey::new(entity, id));
        Ok(stored)
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, PersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .table(key.entity())
            .and_then(|table| table.get(&key.id()))
            .cloned())
    }

    async fn replace(
        &self,
        key: StorageKey,
        row: Value,
        constraints: RowConstraints,
    ) -> Result<Value, PersistenceError> {
        ensure_object(key.entity(), &row)?;
        let mut tables = self.tables.write().await;
        if !tables.contains(key) {
            return Err(PersistenceError::not_found(key.entity(), key.id()));
        }
        tables.check_constraints(key.entity(), &row, constraints, Some(key.id()))?;

        let stored = with_id(row, key.id());
        tables
            .rows
            .entry(key.entity())
            .or_default()
            .insert(key.id(), stored.clone());

        debug!("Replaced {}", key);
        Ok(stored)
    }

    async fn delete(
        &self,
        key: StorageKey,
        referenced_by: &'static [Reference],
    ) -> Result<bool, PersistenceError> {
        let mut tables = self.tables.write().await;
        if !tables.contains(key) {
            trace!("Delete of missing {}", key);
            return Ok(false);
        }
        if let Some(reference) = tables.first_reference(key, referenced_by) {
            return Err(PersistenceError::dependency(format!(
                "{} {} is still referenced by {}.{}.",
                key.entity(),
                key.id(),
                reference.entity.table(),
                reference.attribute
            )));
        }

        let removed = tables
            .rows
            .get_mut(&key.entity())
            .and_then(|table| table.remove(&key.id()))
            .is_some();
        debug!("Deleted {}", key);
        Ok(removed)
    }

    async fn list(&self, entity: EntityKind) -> Result<Vec<Value>, PersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .table(entity)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_attribute(
        &self,
        entity: EntityKind,
        attribute: &str,
        value: &Value,
    ) -> Result<Vec<Value>, PersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .table(entity)
            .map(|table| {
                table
                    .values()
                    .filter(|row| extract_attribute(row, attribute) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn exists(&self, key: StorageKey) -> Result<bool, PersistenceError> {
        Ok(self.tables.read().await.contains(key))
    }

    async fn count(&self, entity: EntityKind) -> Result<usize, PersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.table(entity).map(BTreeMap::len).unwrap_or(0))
    }
}

/// Statistics about the current state of in-memory storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStorageStats {
    /// Number of entity kinds with at least one row
    pub table_count: usize,
    /// Total number of rows across all entity kinds
    pub total_rows: usize,
}
