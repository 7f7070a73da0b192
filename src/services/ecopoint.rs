//! Ecopoint use cases.

use crate::domain::entities::{
    AdministratorId, Ecopoint, EcopointChanges, EcopointId, NeighborhoodId, NewEcopoint,
};
use crate::domain::value_objects::{AcceptedMaterials, GeoLocation};
use crate::error::{EcoRotaResult, ValidationResult};
use crate::services::{changed, collection_days, collection_time};
use crate::storage::{EcopointRepository, EntityKind, PersistenceError};
use log::{debug, info};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEcopointInput {
    pub name: String,
    #[serde(default)]
    pub partner_name: Option<String>,
    pub accepted_materials: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub collection_days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub neighborhood_id: u64,
    pub admin_id: u64,
}

/// A blank `partner_name` clears the partner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEcopointInput {
    pub name: Option<String>,
    pub partner_name: Option<String>,
    pub accepted_materials: Option<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub collection_days: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub neighborhood_id: Option<u64>,
    pub admin_id: u64,
}

fn accepted_materials(materials: &[String]) -> ValidationResult<AcceptedMaterials> {
    AcceptedMaterials::from_string(&materials.join(","))
}

pub struct EcopointService<R> {
    repository: R,
}

impl<R: EcopointRepository> EcopointService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: CreateEcopointInput) -> EcoRotaResult<Ecopoint> {
        let draft = NewEcopoint::new(
            &input.name,
            input.partner_name.as_deref(),
            accepted_materials(&input.accepted_materials)?,
            GeoLocation::new(input.latitude, input.longitude)?,
            collection_days(&input.collection_days)?,
            collection_time(&input.start_time, &input.end_time)?,
            NeighborhoodId::new(input.neighborhood_id),
            AdministratorId::new(input.admin_id),
        )?;
        let ecopoint = self.repository.create(draft).await?;
        info!("Created ecopoint {} '{}'", ecopoint.id(), ecopoint.name());
        Ok(ecopoint)
    }

    pub async fn find_by_id(&self, id: EcopointId) -> EcoRotaResult<Ecopoint> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Ecopoint, id).into())
    }

    /// Every ecopoint, or only those in `neighborhood`.
    pub async fn list(&self, neighborhood: Option<NeighborhoodId>) -> EcoRotaResult<Vec<Ecopoint>> {
        let ecopoints = match neighborhood {
            Some(neighborhood) => self.repository.find_by_neighborhood(neighborhood).await?,
            None => self.repository.find_all().await?,
        };
        debug!("Listed {} ecopoints", ecopoints.len());
        Ok(ecopoints)
    }

    pub async fn update(&self, id: EcopointId, input: UpdateEcopointInput) -> EcoRotaResult<Ecopoint> {
        let collection_time = match (input.start_time, input.end_time) {
            (None, None) => None,
            (start, end) => {
                let current = self.find_by_id(id).await?;
                let window = current.collection_time();
                Some(collection_time(
                    &start.unwrap_or_else(|| window.start_time()),
                    &end.unwrap_or_else(|| window.end_time()),
                )?)
            }
        };

        let changes = EcopointChanges {
            name: input.name,
            partner_name: input.partner_name,
            accepted_materials: changed(input.accepted_materials, |m| accepted_materials(&m))?,
            geo_location: GeoLocation::from_optional(input.latitude, input.longitude)?,
            collection_days: changed(input.collection_days, |days| collection_days(&days))?,
            collection_time,
            neighborhood_id: input.neighborhood_id.map(NeighborhoodId::new),
            updated_by: AdministratorId::new(input.admin_id),
        };
        let ecopoint = self.repository.update(id, changes).await?;
        info!("Updated ecopoint {}", id);
        Ok(ecopoint)
    }

    pub async fn delete(&self, id: EcopointId) -> EcoRotaResult<()> {
        self.repository.delete(id).await?;
        info!("Deleted ecopoint {}", id);
        Ok(())
    }
}
