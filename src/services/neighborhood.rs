//! Neighborhood use cases.

use crate::domain::entities::{
    AdministratorId, NewNeighborhood, Neighborhood, NeighborhoodChanges, NeighborhoodId, RouteId,
};
use crate::domain::value_objects::{GeoLocation, PopulationEstimate, PostalCode};
use crate::error::EcoRotaResult;
use crate::services::changed;
use crate::storage::{EntityKind, NeighborhoodRepository, PersistenceError};
use log::{debug, info};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNeighborhoodInput {
    pub name: String,
    #[serde(default)]
    pub population_estimate: Option<i64>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub route_id: u64,
    pub admin_id: u64,
}

/// A new location needs both coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateNeighborhoodInput {
    pub name: Option<String>,
    pub population_estimate: Option<i64>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub route_id: Option<u64>,
    pub admin_id: u64,
}

pub struct NeighborhoodService<R> {
    repository: R,
}

impl<R: NeighborhoodRepository> NeighborhoodService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: CreateNeighborhoodInput) -> EcoRotaResult<Neighborhood> {
        let draft = NewNeighborhood::new(
            &input.name,
            PopulationEstimate::from_signed(input.population_estimate)?,
            changed(input.postal_code, PostalCode::new)?,
            GeoLocation::from_optional(input.latitude, input.longitude)?,
            RouteId::new(input.route_id),
            AdministratorId::new(input.admin_id),
        )?;
        let neighborhood = self.repository.create(draft).await?;
        info!(
            "Created neighborhood {} '{}' on route {}",
            neighborhood.id(),
            neighborhood.name(),
            neighborhood.route_id()
        );
        Ok(neighborhood)
    }

    pub async fn find_by_id(&self, id: NeighborhoodId) -> EcoRotaResult<Neighborhood> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Neighborhood, id).into())
    }

    pub async fn list(&self) -> EcoRotaResult<Vec<Neighborhood>> {
        let neighborhoods = self.repository.find_all().await?;
        debug!("Listed {} neighborhoods", neighborhoods.len());
        Ok(neighborhoods)
    }

    pub async fn update(
        &self,
        id: NeighborhoodId,
        input: UpdateNeighborhoodInput,
    ) -> EcoRotaResult<Neighborhood> {
        let changes = NeighborhoodChanges {
            name: input.name,
            population_estimate: input
                .population_estimate
                .map(|estimate| PopulationEstimate::from_signed(Some(estimate)))
                .transpose()?,
            postal_code: changed(input.postal_code, PostalCode::new)?,
            geo_location: GeoLocation::from_optional(input.latitude, input.longitude)?,
            route_id: input.route_id.map(RouteId::new),
            updated_by: AdministratorId::new(input.admin_id),
        };
        let neighborhood = self.repository.update(id, changes).await?;
        info!("Updated neighborhood {}", id);
        Ok(neighborhood)
    }

    pub async fn delete(&self, id: NeighborhoodId) -> EcoRotaResult<()> {
        self.repository.delete(id).await?;
        info!("Deleted neighborhood {}", id);
        Ok(())
    }
}
