//! Neighborhood aggregate.

use crate::domain::entities::{AdministratorId, AuditInfo, NeighborhoodId, RouteId, required_name};
use crate::domain::value_objects::{GeoLocation, PopulationEstimate, PostalCode};
use crate::error::ValidationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A neighborhood served by one collection route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    id: NeighborhoodId,
    name: String,
    population_estimate: PopulationEstimate,
    postal_code: Option<PostalCode>,
    geo_location: Option<GeoLocation>,
    route_id: RouteId,
    #[serde(flatten)]
    audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNeighborhood {
    pub(crate) name: String,
    pub(crate) population_estimate: PopulationEstimate,
    pub(crate) postal_code: Option<PostalCode>,
    pub(crate) geo_location: Option<GeoLocation>,
    pub(crate) route_id: RouteId,
    pub(crate) created_by: AdministratorId,
}

/// Partial update for a neighborhood. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodChanges {
    pub name: Option<String>,
    pub population_estimate: Option<PopulationEstimate>,
    pub postal_code: Option<PostalCode>,
    pub geo_location: Option<GeoLocation>,
    pub route_id: Option<RouteId>,
    pub updated_by: AdministratorId,
}

impl NewNeighborhood {
    pub fn new(
        name: &str,
        population_estimate: PopulationEstimate,
        postal_code: Option<PostalCode>,
        geo_location: Option<GeoLocation>,
        route_id: RouteId,
        created_by: AdministratorId,
    ) -> ValidationResult<Self> {
        Ok(Self {
            name: required_name("name", name)?,
            population_estimate,
            postal_code,
            geo_location,
            route_id,
            created_by,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn into_neighborhood(self, id: NeighborhoodId, at: DateTime<Utc>) -> Neighborhood {
        Neighborhood {
            id,
            name: self.name,
            population_estimate: self.population_estimate,
            postal_code: self.postal_code,
            geo_location: self.geo_location,
            route_id: self.route_id,
            audit: AuditInfo::created(self.created_by, at),
        }
    }
}

impl NeighborhoodChanges {
    pub fn by(admin: AdministratorId) -> Self {
        Self {
            name: None,
            population_estimate: None,
            postal_code: None,
            geo_location: None,
            route_id: None,
            updated_by: admin,
        }
    }
}

impl Neighborhood {
    pub fn restore(
        id: NeighborhoodId,
        name: &str,
        population_estimate: PopulationEstimate,
        postal_code: Option<PostalCode>,
        geo_location: Option<GeoLocation>,
        route_id: RouteId,
        audit: AuditInfo,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id,
            name: required_name("name", name)?,
            population_estimate,
            postal_code,
            geo_location,
            route_id,
            audit,
        })
    }

    pub fn id(&self) -> NeighborhoodId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population_estimate(&self) -> PopulationEstimate {
        self.population_estimate
    }

    pub fn postal_code(&self) -> Option<&PostalCode> {
        self.postal_code.as_ref()
    }

    pub fn geo_location(&self) -> Option<&GeoLocation> {
        self.geo_location.as_ref()
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    pub fn with_changes(
        &self,
        changes: NeighborhoodChanges,
        at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        let name = match changes.name {
            Some(name) => required_name("name", &name)?,
            None => self.name.clone(),
        };

        Ok(Self {
            id: self.id,
            name,
            population_estimate: changes
                .population_estimate
                .unwrap_or(self.population_estimate),
            postal_code: changes.postal_code.or_else(|| self.postal_code.clone()),
            geo_location: changes.geo_location.or(self.geo_location),
            route_id: changes.route_id.unwrap_or(self.route_id),
            audit: self.audit.touched(changes.updated_by, at),
        })
    }
}
