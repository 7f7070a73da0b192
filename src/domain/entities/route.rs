//! Collection route aggregate.

use crate::domain::entities::{AdministratorId, AuditInfo, RouteId, required_name};
use crate::domain::value_objects::{CollectionDays, CollectionTime, CollectionType};
use crate::error::ValidationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A collection route: which days, during which window, and what kind of service.
///
/// Neighborhoods are served by exactly one route. A route cannot be deleted while
/// any neighborhood still points to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    id: RouteId,
    name: String,
    collection_days: CollectionDays,
    collection_time: CollectionTime,
    collection_type: CollectionType,
    #[serde(flatten)]
    audit: AuditInfo,
}

/// Validated input for creating a route.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoute {
    pub(crate) name: String,
    pub(crate) collection_days: CollectionDays,
    pub(crate) collection_time: CollectionTime,
    pub(crate) collection_type: CollectionType,
    pub(crate) created_by: AdministratorId,
}

/// Partial update for a route. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteChanges {
    pub name: Option<String>,
    pub collection_days: Option<CollectionDays>,
    pub collection_time: Option<CollectionTime>,
    pub collection_type: Option<CollectionType>,
    pub updated_by: AdministratorId,
}

impl NewRoute {
    pub fn new(
        name: &str,
        collection_days: CollectionDays,
        collection_time: CollectionTime,
        collection_type: CollectionType,
        created_by: AdministratorId,
    ) -> ValidationResult<Self> {
        Ok(Self {
            name: required_name("name", name)?,
            collection_days,
            collection_time,
            collection_type,
            created_by,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materialize the draft once storage has assigned an id.
    pub fn into_route(self, id: RouteId, at: DateTime<Utc>) -> Route {
        Route {
            id,
            name: self.name,
            collection_days: self.collection_days,
            collection_time: self.collection_time,
            collection_type: self.collection_type,
            audit: AuditInfo::created(self.created_by, at),
        }
    }
}

impl RouteChanges {
    pub fn by(admin: AdministratorId) -> Self {
        Self {
            name: None,
            collection_days: None,
            collection_time: None,
            collection_type: None,
            updated_by: admin,
        }
    }
}

impl Route {
    /// Rebuild a route from stored parts.
    pub fn restore(
        id: RouteId,
        name: &str,
        collection_days: CollectionDays,
        collection_time: CollectionTime,
        collection_type: CollectionType,
        audit: AuditInfo,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id,
            name: required_name("name", name)?,
            collection_days,
            collection_time,
            collection_type,
            audit,
        })
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection_days(&self) -> &CollectionDays {
        &self.collection_days
    }

    pub fn collection_time(&self) -> &CollectionTime {
        &self.collection_time
    }

    pub fn collection_type(&self) -> CollectionType {
        self.collection_type
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// Return an updated copy. The receiver is left untouched.
    pub fn with_changes(&self, changes: RouteChanges, at: DateTime<Utc>) -> ValidationResult<Self> {
        let name = match changes.name {
            Some(name) => required_name("name", &name)?,
            None => self.name.clone(),
        };

        Ok(Self {
            id: self.id,
            name,
            collection_days: changes
                .collection_days
                .unwrap_or_else(|| self.collection_days.clone()),
            collection_time: changes.collection_time.unwrap_or(self.collection_time),
            collection_type: changes.collection_type.unwrap_or(self.collection_type),
            audit: self.audit.touched(changes.updated_by, at),
        })
    }
}
