//! Route use cases.

use crate::domain::entities::{AdministratorId, NewRoute, Route, RouteChanges, RouteId};
use crate::domain::value_objects::CollectionType;
use crate::error::EcoRotaResult;
use crate::services::{changed, collection_days, collection_time};
use crate::storage::{EntityKind, PersistenceError, RouteRepository};
use log::{debug, info};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteInput {
    pub name: String,
    pub collection_days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub collection_type: String,
    pub admin_id: u64,
}

/// Fields left as `None` keep their stored value. A new window needs both ends.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRouteInput {
    pub name: Option<String>,
    pub collection_days: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub collection_type: Option<String>,
    pub admin_id: u64,
}

pub struct RouteService<R> {
    repository: R,
}

impl<R: RouteRepository> RouteService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn create(&self, input: CreateRouteInput) -> EcoRotaResult<Route> {
        let draft = NewRoute::new(
            &input.name,
            collection_days(&input.collection_days)?,
            collection_time(&input.start_time, &input.end_time)?,
            CollectionType::new(&input.collection_type)?,
            AdministratorId::new(input.admin_id),
        )?;
        let route = self.repository.create(draft).await?;
        info!("Created route {} '{}'", route.id(), route.name());
        Ok(route)
    }

    pub async fn find_by_id(&self, id: RouteId) -> EcoRotaResult<Route> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Route, id).into())
    }

    pub async fn list(&self) -> EcoRotaResult<Vec<Route>> {
        let routes = self.repository.find_all().await?;
        debug!("Listed {} routes", routes.len());
        Ok(routes)
    }

    pub async fn update(&self, id: RouteId, input: UpdateRouteInput) -> EcoRotaResult<Route> {
        let collection_time = match (input.start_time, input.end_time) {
            (Some(start), Some(end)) => Some(collection_time(&start, &end)?),
            (None, None) => None,
            (start, end) => {
                // Half a window: complete it from the stored route.
                let current = self.find_by_id(id).await?;
                let window = current.collection_time();
                Some(collection_time(
                    &start.unwrap_or_else(|| window.start_time()),
                    &end.unwrap_or_else(|| window.end_time()),
                )?)
            }
        };

        let changes = RouteChanges {
            name: input.name,
            collection_days: changed(input.collection_days, |days| collection_days(&days))?,
            collection_time,
            collection_type: changed(input.collection_type, |t| CollectionType::new(&t))?,
            updated_by: AdministratorId::new(input.admin_id),
        };
        let route = self.repository.update(id, changes).await?;
        info!("Updated route {}", id);
        Ok(route)
    }

    pub async fn delete(&self, id: RouteId) -> EcoRotaResult<()> {
        self.repository.delete(id).await?;
        info!("Deleted route {}", id);
        Ok(())
    }
}
