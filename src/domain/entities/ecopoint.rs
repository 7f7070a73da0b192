//! Ecopoint aggregate: a voluntary drop-off point for recyclables.

use crate::domain::entities::{
    AdministratorId, AuditInfo, EcopointId, NeighborhoodId, required_name,
};
use crate::domain::value_objects::{
    AcceptedMaterials, CollectionDays, CollectionTime, GeoLocation,
};
use crate::error::ValidationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ecopoint {
    id: EcopointId,
    name: String,
    partner_name: Option<String>,
    accepted_materials: AcceptedMaterials,
    geo_location: GeoLocation,
    collection_days: CollectionDays,
    collection_time: CollectionTime,
    neighborhood_id: NeighborhoodId,
    #[serde(flatten)]
    audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEcopoint {
    pub(crate) name: String,
    pub(crate) partner_name: Option<String>,
    pub(crate) accepted_materials: AcceptedMaterials,
    pub(crate) geo_location: GeoLocation,
    pub(crate) collection_days: CollectionDays,
    pub(crate) collection_time: CollectionTime,
    pub(crate) neighborhood_id: NeighborhoodId,
    pub(crate) created_by: AdministratorId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EcopointChanges {
    pub name: Option<String>,
    pub partner_name: Option<String>,
    pub accepted_materials: Option<AcceptedMaterials>,
    pub geo_location: Option<GeoLocation>,
    pub collection_days: Option<CollectionDays>,
    pub collection_time: Option<CollectionTime>,
    pub neighborhood_id: Option<NeighborhoodId>,
    pub updated_by: AdministratorId,
}

fn optional_partner(partner_name: Option<&str>) -> Option<String> {
    partner_name
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

impl NewEcopoint {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        partner_name: Option<&str>,
        accepted_materials: AcceptedMaterials,
        geo_location: GeoLocation,
        collection_days: CollectionDays,
        collection_time: CollectionTime,
        neighborhood_id: NeighborhoodId,
        created_by: AdministratorId,
    ) -> ValidationResult<Self> {
        Ok(Self {
            name: required_name("name", name)?,
            partner_name: optional_partner(partner_name),
            accepted_materials,
            geo_location,
            collection_days,
            collection_time,
            neighborhood_id,
            created_by,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn neighborhood_id(&self) -> NeighborhoodId {
        self.neighborhood_id
    }

    pub fn into_ecopoint(self, id: EcopointId, at: DateTime<Utc>) -> Ecopoint {
        Ecopoint {
            id,
            name: self.name,
            partner_name: self.partner_name,
            accepted_materials: self.accepted_materials,
            geo_location: self.geo_location,
            collection_days: self.collection_days,
            collection_time: self.collection_time,
            neighborhood_id: self.neighborhood_id,
            audit: AuditInfo::created(self.created_by, at),
        }
    }
}

impl EcopointChanges {
    pub fn by(admin: AdministratorId) -> Self {
        Self {
            name: None,
            partner_name: None,
            accepted_materials: None,
            geo_location: None,
            collection_days: None,
            collection_time: None,
            neighborhood_id: None,
            updated_by: admin,
        }
    }
}

impl Ecopoint {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: EcopointId,
        name: &str,
        partner_name: Option<&str>,
        accepted_materials: AcceptedMaterials,
        geo_location: GeoLocation,
        collection_days: CollectionDays,
        collection_time: CollectionTime,
        neighborhood_id: NeighborhoodId,
        audit: AuditInfo,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id,
            name: required_name("name", name)?,
            partner_name: optional_partner(partner_name),
            accepted_materials,
            geo_location,
            collection_days,
            collection_time,
            neighborhood_id,
            audit,
        })
    }

    pub fn id(&self) -> EcopointId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn partner_name(&self) -> Option<&str> {
        self.partner_name.as_deref()
    }

    pub fn accepted_materials(&self) -> &AcceptedMaterials {
        &self.accepted_materials
    }

    pub fn geo_location(&self) -> &GeoLocation {
        &self.geo_location
    }

    pub fn collection_days(&self) -> &CollectionDays {
        &self.collection_days
    }

    pub fn collection_time(&self) -> &CollectionTime {
        &self.collection_time
    }

    pub fn neighborhood_id(&self) -> NeighborhoodId {
        self.neighborhood_id
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    pub fn with_changes(
        &self,
        changes: EcopointChanges,
        at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        let name = match changes.name {
            Some(name) => required_name("name", &name)?,
            None => self.name.clone(),
        };
        let partner_name = match changes.partner_name {
            Some(partner) => optional_partner(Some(&partner)),
            None => self.partner_name.clone(),
        };

        Ok(Self {
            id: self.id,
            name,
            partner_name,
            accepted_materials: changes
                .accepted_materials
                .unwrap_or_else(|| self.accepted_materials.clone()),
            geo_location: changes.geo_location.unwrap_or(self.geo_location),
            collection_days: changes
                .collection_days
                .unwrap_or_else(|| self.collection_days.clone()),
            collection_time: changes.collection_time.unwrap_or(self.collection_time),
            neighborhood_id: changes.neighborhood_id.unwrap_or(self.neighborhood_id),
            audit: self.audit.touched(changes.updated_by, at),
        })
    }
}
