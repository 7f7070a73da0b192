//! Primitive row shapes for stored entities.
//!
//! A record holds only strings, numbers and timestamps, the way a relational
//! table would. Converting a record back into an entity runs every field through
//! its value-object constructor, so a row edited behind the crate's back fails
//! with the same validation error a bad request would.

use crate::domain::entities::{
    Administrator, AdministratorId, AuditInfo, Ecopoint, EcopointId, Neighborhood, NeighborhoodId,
    ProblemReport, ProblemReportId, Route, RouteId, Subscriber, SubscriberId, Timestamps,
};
use crate::domain::value_objects::{
    AcceptedMaterials, Address, CollectionDays, CollectionTime, CollectionType, Email,
    GeoLocation, PopulationEstimate, PostalCode, ProblemAttachments, ProblemDescription,
    ProblemJustification, ProblemProtocol, ProblemStatus, ProblemType,
};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub collection_days: String,
    pub collection_time: String,
    pub collection_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: u64,
    pub updated_by: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodRecord {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub population_estimate: Option<Number>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub route_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: u64,
    pub updated_by: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcopointRecord {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub partner_name: Option<String>,
    pub accepted_materials: String,
    pub latitude: f64,
    pub longitude: f64,
    pub collection_days: String,
    pub collection_time: String,
    pub neighborhood_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: u64,
    pub updated_by: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
    #[serde(default)]
    pub id: u64,
    pub email: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub neighborhood_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemReportRecord {
    #[serde(default)]
    pub id: u64,
    pub protocol: String,
    pub attachments: String,
    pub status: String,
    pub description: String,
    pub problem_type: String,
    pub subscriber_id: u64,
    pub resolved_by: Option<u64>,
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorRecord {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdministratorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdministratorRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

fn audit(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: u64,
    updated_by: Option<u64>,
) -> AuditInfo {
    AuditInfo::restore(
        Timestamps::restore(created_at, updated_at),
        AdministratorId::new(created_by),
        updated_by.map(AdministratorId::new),
    )
}

impl From<&Route> for RouteRecord {
    fn from(route: &Route) -> Self {
        let audit = route.audit();
        Self {
            id: route.id().value(),
            name: route.name().to_string(),
            collection_days: route.collection_days().serialize(),
            collection_time: route.collection_time().formatted_interval(),
            collection_type: route.collection_type().value().to_string(),
            created_at: audit.created_at(),
            updated_at: audit.updated_at(),
            created_by: audit.created_by().value(),
            updated_by: audit.updated_by().map(|id| id.value()),
        }
    }
}

impl TryFrom<RouteRecord> for Route {
    type Error = ValidationError;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        Route::restore(
            RouteId::new(record.id),
            &record.name,
            CollectionDays::from_string(&record.collection_days)?,
            CollectionTime::parse_interval(&record.collection_time)?,
            CollectionType::new(&record.collection_type)?,
            audit(
                record.created_at,
                record.updated_at,
                record.created_by,
                record.updated_by,
            ),
        )
    }
}

impl From<&Neighborhood> for NeighborhoodRecord {
    fn from(neighborhood: &Neighborhood) -> Self {
        let audit = neighborhood.audit();
        let geo = neighborhood.geo_location();
        Self {
            id: neighborhood.id().value(),
            name: neighborhood.name().to_string(),
            population_estimate: neighborhood.population_estimate().value().map(Number::from),
            postal_code: neighborhood.postal_code().map(|p| p.value().to_string()),
            latitude: geo.map(GeoLocation::latitude),
            longitude: geo.map(GeoLocation::longitude),
            route_id: neighborhood.route_id().value(),
            created_at: audit.created_at(),
            updated_at: audit.updated_at(),
            created_by: audit.created_by().value(),
            updated_by: audit.updated_by().map(|id| id.value()),
        }
    }
}

impl TryFrom<NeighborhoodRecord> for Neighborhood {
    type Error = ValidationError;

    fn try_from(record: NeighborhoodRecord) -> Result<Self, Self::Error> {
        Neighborhood::restore(
            NeighborhoodId::new(record.id),
            &record.name,
            population_estimate(record.population_estimate.as_ref())?,
            record.postal_code.as_deref().map(PostalCode::new).transpose()?,
            GeoLocation::from_optional(record.latitude, record.longitude)?,
            RouteId::new(record.route_id),
            audit(
                record.created_at,
                record.updated_at,
                record.created_by,
                record.updated_by,
            ),
        )
    }
}

// Any JSON number is accepted here so a fraction or a negative surfaces as an
// invalid estimate rather than a decode failure.
fn population_estimate(raw: Option<&Number>) -> Result<PopulationEstimate, ValidationError> {
    match raw.map(|n| (n.as_u64(), n.as_f64())) {
        None => Ok(PopulationEstimate::not_informed()),
        Some((Some(count), _)) => Ok(PopulationEstimate::new(Some(count))),
        Some((None, number)) => PopulationEstimate::from_number(number),
    }
}

impl From<&Ecopoint> for EcopointRecord {
    fn from(ecopoint: &Ecopoint) -> Self {
        let audit = ecopoint.audit();
        Self {
            id: ecopoint.id().value(),
            name: ecopoint.name().to_string(),
            partner_name: ecopoint.partner_name().map(str::to_string),
            accepted_materials: ecopoint.accepted_materials().serialize(),
            latitude: ecopoint.geo_location().latitude(),
            longitude: ecopoint.geo_location().longitude(),
            collection_days: ecopoint.collection_days().serialize(),
            collection_time: ecopoint.collection_time().formatted_interval(),
            neighborhood_id: ecopoint.neighborhood_id().value(),
            created_at: audit.created_at(),
            updated_at: audit.updated_at(),
            created_by: audit.created_by().value(),
            updated_by: audit.updated_by().map(|id| id.value()),
        }
    }
}

impl TryFrom<EcopointRecord> for Ecopoint {
    type Error = ValidationError;

    fn try_from(record: EcopointRecord) -> Result<Self, Self::Error> {
        Ecopoint::restore(
            EcopointId::new(record.id),
            &record.name,
            record.partner_name.as_deref(),
            AcceptedMaterials::from_string(&record.accepted_materials)?,
            GeoLocation::new(record.latitude, record.longitude)?,
            CollectionDays::from_string(&record.collection_days)?,
            CollectionTime::parse_interval(&record.collection_time)?,
            NeighborhoodId::new(record.neighborhood_id),
            audit(
                record.created_at,
                record.updated_at,
                record.created_by,
                record.updated_by,
            ),
        )
    }
}

impl From<&Subscriber> for SubscriberRecord {
    fn from(subscriber: &Subscriber) -> Self {
        let address = subscriber.address();
        let geo = address.geo_location();
        let timestamps = subscriber.timestamps();
        Self {
            id: subscriber.id().value(),
            email: subscriber.email().value().to_string(),
            street: address.street().to_string(),
            number: address.number().to_string(),
            complement: address.complement().map(str::to_string),
            postal_code: address.postal_code().map(|p| p.value().to_string()),
            latitude: geo.map(GeoLocation::latitude),
            longitude: geo.map(GeoLocation::longitude),
            neighborhood_id: subscriber.neighborhood_id().value(),
            created_at: timestamps.created_at(),
            updated_at: timestamps.updated_at(),
        }
    }
}

impl TryFrom<SubscriberRecord> for Subscriber {
    type Error = ValidationError;

    fn try_from(record: SubscriberRecord) -> Result<Self, Self::Error> {
        let address = Address::new(
            &record.street,
            &record.number,
            record.complement.as_deref(),
            record.postal_code.as_deref().map(PostalCode::new).transpose()?,
            GeoLocation::from_optional(record.latitude, record.longitude)?,
        )?;
        Ok(Subscriber::restore(
            SubscriberId::new(record.id),
            Email::new(&record.email)?,
            address,
            NeighborhoodId::new(record.neighborhood_id),
            Timestamps::restore(record.created_at, record.updated_at),
        ))
    }
}

impl From<&ProblemReport> for ProblemReportRecord {
    fn from(report: &ProblemReport) -> Self {
        let timestamps = report.timestamps();
        Self {
            id: report.id().value(),
            protocol: report.protocol().value().to_string(),
            attachments: report.attachments().serialize(),
            status: report.status().value().to_string(),
            description: report.description().value().to_string(),
            problem_type: report.problem_type().value().to_string(),
            subscriber_id: report.subscriber_id().value(),
            resolved_by: report.resolved_by().map(|id| id.value()),
            justification: report.justification().map(|j| j.value().to_string()),
            created_at: timestamps.created_at(),
            updated_at: timestamps.updated_at(),
        }
    }
}

impl TryFrom<ProblemReportRecord> for ProblemReport {
    type Error = ValidationError;

    fn try_from(record: ProblemReportRecord) -> Result<Self, Self::Error> {
        ProblemReport::restore(
            ProblemReportId::new(record.id),
            ProblemProtocol::new(&record.protocol)?,
            ProblemAttachments::from_string(&record.attachments),
            ProblemStatus::new(&record.status)?,
            ProblemDescription::new(&record.description)?,
            ProblemType::new(&record.problem_type)?,
            SubscriberId::new(record.subscriber_id),
            record.resolved_by.map(AdministratorId::new),
            record
                .justification
                .as_deref()
                .map(ProblemJustification::new)
                .transpose()?,
            Timestamps::restore(record.created_at, record.updated_at),
        )
    }
}

impl From<&Administrator> for AdministratorRecord {
    fn from(admin: &Administrator) -> Self {
        let timestamps = admin.timestamps();
        Self {
            id: admin.id().value(),
            name: admin.name().to_string(),
            email: admin.email().value().to_string(),
            password_hash: admin.password_hash().to_string(),
            created_at: timestamps.created_at(),
            updated_at: timestamps.updated_at(),
        }
    }
}

impl TryFrom<AdministratorRecord> for Administrator {
    type Error = ValidationError;

    fn try_from(record: AdministratorRecord) -> Result<Self, Self::Error> {
        Administrator::restore(
            AdministratorId::new(record.id),
            &record.name,
            Email::new(&record.email)?,
            record.password_hash,
            Timestamps::restore(record.created_at, record.updated_at),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewRoute, NewSubscriber};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap()
    }

    fn route() -> Route {
        NewRoute::new(
            "Rota Centro",
            CollectionDays::from_string("friday,monday").unwrap(),
            CollectionTime::new("08:00", "12:00").unwrap(),
            CollectionType::Selective,
            AdministratorId::new(1),
        )
        .unwrap()
        .into_route(RouteId::new(4), at())
    }

    #[test]
    fn test_route_record_is_primitive() {
        let record = RouteRecord::from(&route());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["collectionDays"], "monday,friday");
        assert_eq!(json["collectionTime"], "08:00 - 12:00");
        assert_eq!(json["collectionType"], "Coleta seletiva");
        assert_eq!(json["createdBy"], 1);
        assert!(json["updatedBy"].is_null());

        assert_eq!(Route::try_from(record).unwrap(), route());
    }

    #[test]
    fn test_corrupt_row_surfaces_validation_error() {
        let mut record = RouteRecord::from(&route());
        record.collection_time = "12:00 - 08:00".to_string();
        assert!(matches!(
            Route::try_from(record),
            Err(ValidationError::InvalidCollectionTime { .. })
        ));

        let mut record = RouteRecord::from(&route());
        record.collection_type = "Coleta noturna".to_string();
        assert!(matches!(
            Route::try_from(record),
            Err(ValidationError::InvalidCollectionType { .. })
        ));
    }

    #[test]
    fn test_subscriber_address_is_flattened() {
        let address = Address::new(
            "Rua A",
            "123",
            Some("Casa"),
            Some(PostalCode::new("64000-000").unwrap()),
            Some(GeoLocation::new(-5.09, -42.8).unwrap()),
        )
        .unwrap();
        let subscriber = NewSubscriber {
            email: Email::new("Morador@Email.com").unwrap(),
            address,
            neighborhood_id: NeighborhoodId::new(2),
        }
        .into_subscriber(SubscriberId::new(1), at());

        let record = SubscriberRecord::from(&subscriber);
        assert_eq!(record.email, "morador@email.com");
        assert_eq!(record.postal_code.as_deref(), Some("64000000"));
        assert_eq!(record.latitude, Some(-5.09));

        let mut broken = record.clone();
        broken.longitude = None;
        assert!(matches!(
            Subscriber::try_from(broken),
            Err(ValidationError::InvalidGeoLocation { .. })
        ));

        assert_eq!(Subscriber::try_from(record).unwrap(), subscriber);
    }

    #[test]
    fn test_administrator_record_hides_hash_in_debug() {
        let record = AdministratorRecord {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@ecorota.com".to_string(),
            password_hash: "salt$hash".to_string(),
            created_at: at(),
            updated_at: at(),
        };
        assert!(!format!("{:?}", record).contains("salt$hash"));
        assert_eq!(Administrator::try_from(record).unwrap().password_hash(), "salt$hash");
    }
}
