//! Entity repositories over a pluggable row store.
//!
//! One trait per entity defines what the use cases need from persistence. The
//! [`StandardRepository`] implements all of them on top of any
//! [`StorageProvider`], declaring each entity's unique attributes, foreign keys
//! and delete restrictions as row constraints so the store enforces them
//! atomically.
//!
//! # Error Contract
//!
//! - a missing target (or a foreign key pointing at a missing row) is `EntityNotFound`
//! - a duplicate route/neighborhood/ecopoint name, subscriber/administrator email or
//!   report protocol is `Conflict` naming the attribute
//! - deleting a row that others still reference is `Dependency`
//! - a stored row that no longer passes validation is a `Validation` error
//!
//! # Example Usage
//!
//! ```rust
//! use ecorota::domain::entities::NewAdministrator;
//! use ecorota::domain::value_objects::Email;
//! use ecorota::storage::{AdministratorRepository, InMemoryStorage, StandardRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = StandardRepository::new(InMemoryStorage::new());
//!
//! let draft = NewAdministrator::new("Ana", Email::new("ana@ecorota.com")?, "hash".into())?;
//! let admin = repository.create(draft).await?;
//!
//! let found = repository.find_by_email(admin.email()).await?;
//! assert_eq!(found.map(|a| a.id()), Some(admin.id()));
//! # Ok(())
//! # }
//! ```

use crate::domain::entities::{
    Administrator, AdministratorChanges, AdministratorId, Ecopoint, EcopointChanges, EcopointId,
    Neighborhood, NeighborhoodChanges, NeighborhoodId, NewAdministrator, NewEcopoint,
    NewNeighborhood, NewProblemReport, NewRoute, NewSubscriber, ProblemReport,
    ProblemReportChanges, ProblemReportId, Resolution, Route, RouteChanges, RouteId, Subscriber,
    SubscriberChanges, SubscriberId,
};
use crate::domain::value_objects::{Email, ProblemProtocol, ProblemStatus};
use crate::error::{EcoRotaResult, ValidationError};
use crate::storage::records::{
    AdministratorRecord, EcopointRecord, NeighborhoodRecord, ProblemReportRecord, RouteRecord,
    SubscriberRecord,
};
use crate::storage::{
    EntityKind, ForeignKey, PersistenceError, Reference, RowConstraints, StorageKey,
    StorageProvider,
};
use chrono::Utc;
use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;

/// Identifier used for a draft before storage assigns the real one.
const UNASSIGNED: u64 = 0;

const ROUTE_KEYS: &[ForeignKey] = &[
    ForeignKey::new("createdBy", EntityKind::Administrator),
    ForeignKey::new("updatedBy", EntityKind::Administrator),
];
const NEIGHBORHOOD_KEYS: &[ForeignKey] = &[
    ForeignKey::new("routeId", EntityKind::Route),
    ForeignKey::new("createdBy", EntityKind::Administrator),
    ForeignKey::new("updatedBy", EntityKind::Administrator),
];
const ECOPOINT_KEYS: &[ForeignKey] = &[
    ForeignKey::new("neighborhoodId", EntityKind::Neighborhood),
    ForeignKey::new("createdBy", EntityKind::Administrator),
    ForeignKey::new("updatedBy", EntityKind::Administrator),
];
const SUBSCRIBER_KEYS: &[ForeignKey] =
    &[ForeignKey::new("neighborhoodId", EntityKind::Neighborhood)];
const REPORT_KEYS: &[ForeignKey] = &[
    ForeignKey::new("subscriberId", EntityKind::Subscriber),
    ForeignKey::new("resolvedBy", EntityKind::Administrator),
];

const ROUTE_CONSTRAINTS: RowConstraints =
    RowConstraints::unique(&["name"]).with_foreign_keys(ROUTE_KEYS);
const NEIGHBORHOOD_CONSTRAINTS: RowConstraints =
    RowConstraints::unique(&["name"]).with_foreign_keys(NEIGHBORHOOD_KEYS);
const ECOPOINT_CONSTRAINTS: RowConstraints =
    RowConstraints::unique(&["name"]).with_foreign_keys(ECOPOINT_KEYS);
const SUBSCRIBER_CONSTRAINTS: RowConstraints =
    RowConstraints::unique(&["email"]).with_foreign_keys(SUBSCRIBER_KEYS);
const REPORT_CONSTRAINTS: RowConstraints =
    RowConstraints::unique(&["protocol"]).with_foreign_keys(REPORT_KEYS);
const ADMINISTRATOR_CONSTRAINTS: RowConstraints = RowConstraints::unique(&["email"]);

const ROUTE_REFERENCES: &[Reference] = &[Reference::new(EntityKind::Neighborhood, "routeId")];
const NEIGHBORHOOD_REFERENCES: &[Reference] = &[
    Reference::new(EntityKind::Ecopoint, "neighborhoodId"),
    Reference::new(EntityKind::Subscriber, "neighborhoodId"),
];
const SUBSCRIBER_REFERENCES: &[Reference] =
    &[Reference::new(EntityKind::ProblemReport, "subscriberId")];
const ADMINISTRATOR_REFERENCES: &[Reference] = &[
    Reference::new(EntityKind::Route, "createdBy"),
    Reference::new(EntityKind::Route, "updatedBy"),
    Reference::new(EntityKind::Neighborhood, "createdBy"),
    Reference::new(EntityKind::Neighborhood, "updatedBy"),
    Reference::new(EntityKind::Ecopoint, "createdBy"),
    Reference::new(EntityKind::Ecopoint, "updatedBy"),
    Reference::new(EntityKind::ProblemReport, "resolvedBy"),
];

pub trait RouteRepository: Send + Sync {
    fn create(&self, route: NewRoute) -> impl Future<Output = EcoRotaResult<Route>> + Send;

    fn find_by_id(&self, id: RouteId)
    -> impl Future<Output = EcoRotaResult<Option<Route>>> + Send;

    fn find_all(&self) -> impl Future<Output = EcoRotaResult<Vec<Route>>> + Send;

    fn update(
        &self,
        id: RouteId,
        changes: RouteChanges,
    ) -> impl Future<Output = EcoRotaResult<Route>> + Send;

    /// Fails with `Dependency` while any neighborhood is served by the route.
    fn delete(&self, id: RouteId) -> impl Future<Output = EcoRotaResult<()>> + Send;
}

pub trait NeighborhoodRepository: Send + Sync {
    fn create(
        &self,
        neighborhood: NewNeighborhood,
    ) -> impl Future<Output = EcoRotaResult<Neighborhood>> + Send;

    fn find_by_id(
        &self,
        id: NeighborhoodId,
    ) -> impl Future<Output = EcoRotaResult<Option<Neighborhood>>> + Send;

    fn find_all(&self) -> impl Future<Output = EcoRotaResult<Vec<Neighborhood>>> + Send;

    fn update(
        &self,
        id: NeighborhoodId,
        changes: NeighborhoodChanges,
    ) -> impl Future<Output = EcoRotaResult<Neighborhood>> + Send;

    /// Fails with `Dependency` while ecopoints or subscribers belong to it.
    fn delete(&self, id: NeighborhoodId) -> impl Future<Output = EcoRotaResult<()>> + Send;
}

pub trait EcopointRepository: Send + Sync {
    fn create(&self, ecopoint: NewEcopoint)
    -> impl Future<Output = EcoRotaResult<Ecopoint>> + Send;

    fn find_by_id(
        &self,
        id: EcopointId,
    ) -> impl Future<Output = EcoRotaResult<Option<Ecopoint>>> + Send;

    fn find_all(&self) -> impl Future<Output = EcoRotaResult<Vec<Ecopoint>>> + Send;

    fn find_by_neighborhood(
        &self,
        neighborhood_id: NeighborhoodId,
    ) -> impl Future<Output = EcoRotaResult<Vec<Ecopoint>>> + Send;

    fn update(
        &self,
        id: EcopointId,
        changes: EcopointChanges,
    ) -> impl Future<Output = EcoRotaResult<Ecopoint>> + Send;

    fn delete(&self, id: EcopointId) -> impl Future<Output = EcoRotaResult<()>> + Send;
}

pub trait SubscriberRepository: Send + Sync {
    fn create(
        &self,
        subscriber: NewSubscriber,
    ) -> impl Future<Output = EcoRotaResult<Subscriber>> + Send;

    fn find_by_id(
        &self,
        id: SubscriberId,
    ) -> impl Future<Output = EcoRotaResult<Option<Subscriber>>> + Send;

    fn find_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = EcoRotaResult<Option<Subscriber>>> + Send;

    fn find_all(&self) -> impl Future<Output = EcoRotaResult<Vec<Subscriber>>> + Send;

    fn find_by_neighborhood(
        &self,
        neighborhood_id: NeighborhoodId,
    ) -> impl Future<Output = EcoRotaResult<Vec<Subscriber>>> + Send;

    fn update(
        &self,
        id: SubscriberId,
        changes: SubscriberChanges,
    ) -> impl Future<Output = EcoRotaResult<Subscriber>> + Send;

    /// Fails with `Dependency` while the subscriber has problem reports.
    fn delete(&self, id: SubscriberId) -> impl Future<Output = EcoRotaResult<()>> + Send;
}

pub trait ProblemReportRepository: Send + Sync {
    /// Store a new report. A protocol already in use fails with a conflict on
    /// `protocol`.
    fn create(
        &self,
        report: NewProblemReport,
    ) -> impl Future<Output = EcoRotaResult<ProblemReport>> + Send;

    fn find_by_id(
        &self,
        id: ProblemReportId,
    ) -> impl Future<Output = EcoRotaResult<Option<ProblemReport>>> + Send;

    fn find_by_protocol(
        &self,
        protocol: &ProblemProtocol,
    ) -> impl Future<Output = EcoRotaResult<Option<ProblemReport>>> + Send;

    fn find_all(&self) -> impl Future<Output = EcoRotaResult<Vec<ProblemReport>>> + Send;

    fn find_by_subscriber(
        &self,
        subscriber_id: SubscriberId,
    ) -> impl Future<Output = EcoRotaResult<Vec<ProblemReport>>> + Send;

    fn find_by_status(
        &self,
        status: ProblemStatus,
    ) -> impl Future<Output = EcoRotaResult<Vec<ProblemReport>>> + Send;

    /// Highest protocol sequence stored for `year`, or 0 if there is none.
    fn max_sequence(&self, year: i32) -> impl Future<Output = EcoRotaResult<u32>> + Send;

    fn update(
        &self,
        id: ProblemReportId,
        changes: ProblemReportChanges,
    ) -> impl Future<Output = EcoRotaResult<ProblemReport>> + Send;

    /// Apply an administrator's status decision.
    fn resolve(
        &self,
        id: ProblemReportId,
        resolution: Resolution,
    ) -> impl Future<Output = EcoRotaResult<ProblemReport>> + Send;

    fn delete(&self, id: ProblemReportId) -> impl Future<Output = EcoRotaResult<()>> + Send;
}

pub trait AdministratorRepository: Send + Sync {
    fn create(
        &self,
        administrator: NewAdministrator,
    ) -> impl Future<Output = EcoRotaResult<Administrator>> + Send;

    fn find_by_id(
        &self,
        id: AdministratorId,
    ) -> impl Future<Output = EcoRotaResult<Option<Administrator>>> + Send;

    fn find_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = EcoRotaResult<Option<Administrator>>> + Send;

    fn find_all(&self) -> impl Future<Output = EcoRotaResult<Vec<Administrator>>> + Send;

    /// Fails with `Conflict` when the new email belongs to another administrator.
    fn update(
        &self,
        id: AdministratorId,
        changes: AdministratorChanges,
    ) -> impl Future<Output = EcoRotaResult<Administrator>> + Send;

    /// Fails with `Dependency` while the administrator appears in any audit field.
    fn delete(&self, id: AdministratorId) -> impl Future<Output = EcoRotaResult<()>> + Send;
}

/// Repository implementation for every entity over a pluggable row store.
#[derive(Debug, Clone)]
pub struct StandardRepository<S: StorageProvider> {
    storage: S,
}

impl<S: StorageProvider> StandardRepository<S> {
    /// Create a repository over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying row store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn insert<R, E>(
        &self,
        entity: EntityKind,
        record: R,
        constraints: RowConstraints,
    ) -> EcoRotaResult<E>
    where
        R: Serialize + DeserializeOwned,
        E: TryFrom<R, Error = ValidationError>,
    {
        let row = serde_json::to_value(record).map_err(PersistenceError::from)?;
        let stored = self.storage.insert(entity, row, constraints).await?;
        trace!("Stored new {} row", entity);
        decode::<R, E>(stored)
    }

    async fn replace<R, E>(
        &self,
        entity: EntityKind,
        id: u64,
        record: R,
        constraints: RowConstraints,
    ) -> EcoRotaResult<E>
    where
        R: Serialize + DeserializeOwned,
        E: TryFrom<R, Error = ValidationError>,
    {
        let row = serde_json::to_value(record).map_err(PersistenceError::from)?;
        let stored = self
            .storage
            .replace(StorageKey::new(entity, id), row, constraints)
            .await?;
        decode::<R, E>(stored)
    }

    async fn load<R, E>(&self, entity: EntityKind, id: u64) -> EcoRotaResult<Option<E>>
    where
        R: DeserializeOwned,
        E: TryFrom<R, Error = ValidationError>,
    {
        self.storage
            .get(StorageKey::new(entity, id))
            .await?
            .map(decode::<R, E>)
            .transpose()
    }

    async fn require<R, E>(&self, entity: EntityKind, id: u64) -> EcoRotaResult<E>
    where
        R: DeserializeOwned,
        E: TryFrom<R, Error = ValidationError>,
    {
        self.load::<R, E>(entity, id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(entity, id).into())
    }

    async fn list<R, E>(&self, entity: EntityKind) -> EcoRotaResult<Vec<E>>
    where
        R: DeserializeOwned,
        E: TryFrom<R, Error = ValidationError>,
    {
        self.storage
            .list(entity)
            .await?
            .into_iter()
            .map(decode::<R, E>)
            .collect()
    }

    async fn find_where<R, E>(
        &self,
        entity: EntityKind,
        attribute: &str,
        value: Value,
    ) -> EcoRotaResult<Vec<E>>
    where
        R: DeserializeOwned,
        E: TryFrom<R, Error = ValidationError>,
    {
        self.storage
            .find_by_attribute(entity, attribute, &value)
            .await?
            .into_iter()
            .map(decode::<R, E>)
            .collect()
    }

    async fn remove(
        &self,
        entity: EntityKind,
        id: u64,
        referenced_by: &'static [Reference],
    ) -> EcoRotaResult<()> {
        if self
            .storage
            .delete(StorageKey::new(entity, id), referenced_by)
            .await?
        {
            debug!("Deleted {} {}", entity, id);
            Ok(())
        } else {
            Err(PersistenceError::not_found(entity, id).into())
        }
    }
}

fn decode<R, E>(row: Value) -> EcoRotaResult<E>
where
    R: DeserializeOwned,
    E: TryFrom<R, Error = ValidationError>,
{
    let record: R = serde_json::from_value(row).map_err(PersistenceError::from)?;
    Ok(E::try_from(record)?)
}

fn first<T>(mut rows: Vec<T>) -> Option<T> {
    if rows.is_empty() {
        None
    } else {
        Some(rows.swap_remove(0))
    }
}

impl<S: StorageProvider> RouteRepository for StandardRepository<S> {
    async fn create(&self, route: NewRoute) -> EcoRotaResult<Route> {
        let draft = route.into_route(RouteId::new(UNASSIGNED), Utc::now());
        self.insert::<RouteRecord, _>(EntityKind::Route, (&draft).into(), ROUTE_CONSTRAINTS)
            .await
    }

    async fn find_by_id(&self, id: RouteId) -> EcoRotaResult<Option<Route>> {
        self.load::<RouteRecord, _>(EntityKind::Route, id.value()).await
    }

    async fn find_all(&self) -> EcoRotaResult<Vec<Route>> {
        self.list::<RouteRecord, _>(EntityKind::Route).await
    }

    async fn update(&self, id: RouteId, changes: RouteChanges) -> EcoRotaResult<Route> {
        let current: Route = self
            .require::<RouteRecord, _>(EntityKind::Route, id.value())
            .await?;
        let updated = current.with_changes(changes, Utc::now())?;
        self.replace::<RouteRecord, _>(
            EntityKind::Route,
            id.value(),
            (&updated).into(),
            ROUTE_CONSTRAINTS,
        )
        .await
    }

    async fn delete(&self, id: RouteId) -> EcoRotaResult<()> {
        self.remove(EntityKind::Route, id.value(), ROUTE_REFERENCES)
            .await
    }
}

impl<S: StorageProvider> NeighborhoodRepository for StandardRepository<S> {
    async fn create(&self, neighborhood: NewNeighborhood) -> EcoRotaResult<Neighborhood> {
        let draft = neighborhood.into_neighborhood(NeighborhoodId::new(UNASSIGNED), Utc::now());
        self.insert::<NeighborhoodRecord, _>(
            EntityKind::Neighborhood,
            (&draft).into(),
            NEIGHBORHOOD_CONSTRAINTS,
        )
        .await
    }

    async fn find_by_id(&self, id: NeighborhoodId) -> EcoRotaResult<Option<Neighborhood>> {
        self.load::<NeighborhoodRecord, _>(EntityKind::Neighborhood, id.value())
            .await
    }

    async fn find_all(&self) -> EcoRotaResult<Vec<Neighborhood>> {
        self.list::<NeighborhoodRecord, _>(EntityKind::Neighborhood)
            .await
    }

    async fn update(
        &self,
        id: NeighborhoodId,
        changes: NeighborhoodChanges,
    ) -> EcoRotaResult<Neighborhood> {
        let current: Neighborhood = self
            .require::<NeighborhoodRecord, _>(EntityKind::Neighborhood, id.value())
            .await?;
        let updated = current.with_changes(changes, Utc::now())?;
        self.replace::<NeighborhoodRecord, _>(
            EntityKind::Neighborhood,
            id.value(),
            (&updated).into(),
            NEIGHBORHOOD_CONSTRAINTS,
        )
        .await
    }

    async fn delete(&self, id: NeighborhoodId) -> EcoRotaResult<()> {
        self.remove(EntityKind::Neighborhood, id.value(), NEIGHBORHOOD_REFERENCES)
            .await
    }
}

impl<S: StorageProvider> EcopointRepository for StandardRepository<S> {
    async fn create(&self, ecopoint: NewEcopoint) -> EcoRotaResult<Ecopoint> {
        let draft = ecopoint.into_ecopoint(EcopointId::new(UNASSIGNED), Utc::now());
        self.insert::<EcopointRecord, _>(
            EntityKind::Ecopoint,
            (&draft).into(),
            ECOPOINT_CONSTRAINTS,
        )
        .await
    }

    async fn find_by_id(&self, id: EcopointId) -> EcoRotaResult<Option<Ecopoint>> {
        self.load::<EcopointRecord, _>(EntityKind::Ecopoint, id.value())
            .await
    }

    async fn find_all(&self) -> EcoRotaResult<Vec<Ecopoint>> {
        self.list::<EcopointRecord, _>(EntityKind::Ecopoint).await
    }

    async fn find_by_neighborhood(
        &self,
        neighborhood_id: NeighborhoodId,
    ) -> EcoRotaResult<Vec<Ecopoint>> {
        self.find_where::<EcopointRecord, _>(
            EntityKind::Ecopoint,
            "neighborhoodId",
            Value::from(neighborhood_id.value()),
        )
        .await
    }

    async fn update(&self, id: EcopointId, changes: EcopointChanges) -> EcoRotaResult<Ecopoint> {
        let current: Ecopoint = self
            .require::<EcopointRecord, _>(EntityKind::Ecopoint, id.value())
            .await?;
        let updated = current.with_changes(changes, Utc::now())?;
        self.replace::<EcopointRecord, _>(
            EntityKind::Ecopoint,
            id.value(),
            (&updated).into(),
            ECOPOINT_CONSTRAINTS,
        )
        .await
    }

    async fn delete(&self, id: EcopointId) -> EcoRotaResult<()> {
        self.remove(EntityKind::Ecopoint, id.value(), &[]).await
    }
}

impl<S: StorageProvider> SubscriberRepository for StandardRepository<S> {
    async fn create(&self, subscriber: NewSubscriber) -> EcoRotaResult<Subscriber> {
        let draft = subscriber.into_subscriber(SubscriberId::new(UNASSIGNED), Utc::now());
        self.insert::<SubscriberRecord, _>(
            EntityKind::Subscriber,
            (&draft).into(),
            SUBSCRIBER_CONSTRAINTS,
        )
        .await
    }

    async fn find_by_id(&self, id: SubscriberId) -> EcoRotaResult<Option<Subscriber>> {
        self.load::<SubscriberRecord, _>(EntityKind::Subscriber, id.value())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> EcoRotaResult<Option<Subscriber>> {
        let matches = self
            .find_where::<SubscriberRecord, _>(
                EntityKind::Subscriber,
                "email",
                Value::from(email.value()),
            )
            .await?;
        Ok(first(matches))
    }

    async fn find_all(&self) -> EcoRotaResult<Vec<Subscriber>> {
        self.list::<SubscriberRecord, _>(EntityKind::Subscriber)
            .await
    }

    async fn find_by_neighborhood(
        &self,
        neighborhood_id: NeighborhoodId,
    ) -> EcoRotaResult<Vec<Subscriber>> {
        self.find_where::<SubscriberRecord, _>(
            EntityKind::Subscriber,
            "neighborhoodId",
            Value::from(neighborhood_id.value()),
        )
        .await
    }

    async fn update(
        &self,
        id: SubscriberId,
        changes: SubscriberChanges,
    ) -> EcoRotaResult<Subscriber> {
        let current: Subscriber = self
            .require::<SubscriberRecord, _>(EntityKind::Subscriber, id.value())
            .await?;
        let updated = current.with_changes(changes, Utc::now());
        self.replace::<SubscriberRecord, _>(
            EntityKind::Subscriber,
            id.value(),
            (&updated).into(),
            SUBSCRIBER_CONSTRAINTS,
        )
        .await
    }

    async fn delete(&self, id: SubscriberId) -> EcoRotaResult<()> {
        self.remove(EntityKind::Subscriber, id.value(), SUBSCRIBER_REFERENCES)
            .await
    }
}

impl<S: StorageProvider> ProblemReportRepository for StandardRepository<S> {
    async fn create(&self, report: NewProblemReport) -> EcoRotaResult<ProblemReport> {
        let draft = report.into_report(ProblemReportId::new(UNASSIGNED), Utc::now());
        self.insert::<ProblemReportRecord, _>(
            EntityKind::ProblemReport,
            (&draft).into(),
            REPORT_CONSTRAINTS,
        )
        .await
    }

    async fn find_by_id(&self, id: ProblemReportId) -> EcoRotaResult<Option<ProblemReport>> {
        self.load::<ProblemReportRecord, _>(EntityKind::ProblemReport, id.value())
            .await
    }

    async fn find_by_protocol(
        &self,
        protocol: &ProblemProtocol,
    ) -> EcoRotaResult<Option<ProblemReport>> {
        let matches = self
            .find_where::<ProblemReportRecord, _>(
                EntityKind::ProblemReport,
                "protocol",
                Value::from(protocol.value()),
            )
            .await?;
        Ok(first(matches))
    }

    async fn find_all(&self) -> EcoRotaResult<Vec<ProblemReport>> {
        self.list::<ProblemReportRecord, _>(EntityKind::ProblemReport)
            .await
    }

    async fn find_by_subscriber(
        &self,
        subscriber_id: SubscriberId,
    ) -> EcoRotaResult<Vec<ProblemReport>> {
        self.find_where::<ProblemReportRecord, _>(
            EntityKind::ProblemReport,
            "subscriberId",
            Value::from(subscriber_id.value()),
        )
        .await
    }

    async fn find_by_status(&self, status: ProblemStatus) -> EcoRotaResult<Vec<ProblemReport>> {
        self.find_where::<ProblemReportRecord, _>(
            EntityKind::ProblemReport,
            "status",
            Value::from(status.value()),
        )
        .await
    }

    async fn max_sequence(&self, year: i32) -> EcoRotaResult<u32> {
        let mut highest = 0;
        for row in self.storage.list(EntityKind::ProblemReport).await? {
            let raw = row.get("protocol").and_then(Value::as_str).unwrap_or_default();
            let protocol = ProblemProtocol::new(raw)?;
            if i32::from(protocol.year()) == year {
                highest = highest.max(protocol.sequence());
            }
        }
        trace!("Highest protocol sequence in {} is {}", year, highest);
        Ok(highest)
    }

    async fn update(
        &self,
        id: ProblemReportId,
        changes: ProblemReportChanges,
    ) -> EcoRotaResult<ProblemReport> {
        let current: ProblemReport = self
            .require::<ProblemReportRecord, _>(EntityKind::ProblemReport, id.value())
            .await?;
        let updated = current.with_changes(changes, Utc::now());
        self.replace::<ProblemReportRecord, _>(
            EntityKind::ProblemReport,
            id.value(),
            (&updated).into(),
            REPORT_CONSTRAINTS,
        )
        .await
    }

    async fn resolve(
        &self,
        id: ProblemReportId,
        resolution: Resolution,
    ) -> EcoRotaResult<ProblemReport> {
        let current: ProblemReport = self
            .require::<ProblemReportRecord, _>(EntityKind::ProblemReport, id.value())
            .await?;
        let resolved = current.resolve(resolution, Utc::now());
        self.replace::<ProblemReportRecord, _>(
            EntityKind::ProblemReport,
            id.value(),
            (&resolved).into(),
            REPORT_CONSTRAINTS,
        )
        .await
    }

    async fn delete(&self, id: ProblemReportId) -> EcoRotaResult<()> {
        self.remove(EntityKind::ProblemReport, id.value(), &[])
            .await
    }
}

impl<S: StorageProvider> AdministratorRepository for StandardRepository<S> {
    async fn create(&self, administrator: NewAdministrator) -> EcoRotaResult<Administrator> {
        let draft = administrator.into_administrator(AdministratorId::new(UNASSIGNED), Utc::now());
        self.insert::<AdministratorRecord, _>(
            EntityKind::Administrator,
            (&draft).into(),
            ADMINISTRATOR_CONSTRAINTS,
        )
        .await
    }

    async fn find_by_id(&self, id: AdministratorId) -> EcoRotaResult<Option<Administrator>> {
        self.load::<AdministratorRecord, _>(EntityKind::Administrator, id.value())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> EcoRotaResult<Option<Administrator>> {
        let matches = self
            .find_where::<AdministratorRecord, _>(
                EntityKind::Administrator,
                "email",
                Value::from(email.value()),
            )
            .await?;
        Ok(first(matches))
    }

    async fn find_all(&self) -> EcoRotaResult<Vec<Administrator>> {
        self.list::<AdministratorRecord, _>(EntityKind::Administrator)
            .await
    }

    async fn update(
        &self,
        id: AdministratorId,
        changes: AdministratorChanges,
    ) -> EcoRotaResult<Administrator> {
        let current: Administrator = self
            .require::<AdministratorRecord, _>(EntityKind::Administrator, id.value())
            .await?;
        let updated = current.with_changes(changes, Utc::now())?;
        self.replace::<AdministratorRecord, _>(
            EntityKind::Administrator,
            id.value(),
            (&updated).into(),
            ADMINISTRATOR_CONSTRAINTS,
        )
        .await
    }

    async fn delete(&self, id: AdministratorId) -> EcoRotaResult<()> {
        self.remove(
            EntityKind::Administrator,
            id.value(),
            ADMINISTRATOR_REFERENCES,
        )
        .await
    }
}
