//! Subscriber use cases: registration, profile updates and unsubscribing.

use crate::domain::entities::{
    NeighborhoodId, NewSubscriber, Subscriber, SubscriberChanges, SubscriberId,
};
use crate::domain::value_objects::{Address, AddressChanges, Email, GeoLocation, PostalCode};
use crate::error::EcoRotaResult;
use crate::services::changed;
use crate::storage::{EntityKind, PersistenceError, SubscriberRepository};
use log::{debug, info};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSubscriberInput {
    pub email: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub neighborhood_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSubscriberInput {
    pub email: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub neighborhood_id: Option<u64>,
}

impl UpdateSubscriberInput {
    fn touches_address(&self) -> bool {
        self.street.is_some()
            || self.number.is_some()
            || self.complement.is_some()
            || self.postal_code.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
    }
}

pub struct SubscriberService<R> {
    repository: R,
}

impl<R: SubscriberRepository> SubscriberService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Register a resident. A second registration with the same email conflicts.
    pub async fn subscribe(&self, input: RegisterSubscriberInput) -> EcoRotaResult<Subscriber> {
        let address = Address::new(
            &input.street,
            &input.number,
            input.complement.as_deref(),
            changed(input.postal_code, PostalCode::new)?,
            GeoLocation::from_optional(input.latitude, input.longitude)?,
        )?;
        let draft = NewSubscriber {
            email: Email::new(&input.email)?,
            address,
            neighborhood_id: NeighborhoodId::new(input.neighborhood_id),
        };
        let subscriber = self.repository.create(draft).await?;
        info!(
            "Registered subscriber {} in neighborhood {}",
            subscriber.id(),
            subscriber.neighborhood_id()
        );
        Ok(subscriber)
    }

    pub async fn find_by_id(&self, id: SubscriberId) -> EcoRotaResult<Subscriber> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Subscriber, id).into())
    }

    /// Look a subscriber up by email, normalized the same way it was stored.
    pub async fn find_by_email(&self, email: &str) -> EcoRotaResult<Subscriber> {
        let email = Email::new(email)?;
        self.repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Subscriber, email).into())
    }

    pub async fn list(&self) -> EcoRotaResult<Vec<Subscriber>> {
        let subscribers = self.repository.find_all().await?;
        debug!("Listed {} subscribers", subscribers.len());
        Ok(subscribers)
    }

    pub async fn list_by_neighborhood(
        &self,
        neighborhood: NeighborhoodId,
    ) -> EcoRotaResult<Vec<Subscriber>> {
        self.repository.find_by_neighborhood(neighborhood).await
    }

    pub async fn update_profile(
        &self,
        id: SubscriberId,
        input: UpdateSubscriberInput,
    ) -> EcoRotaResult<Subscriber> {
        let address = if input.touches_address() {
            let current = self.find_by_id(id).await?;
            let geo_location = GeoLocation::from_optional(input.latitude, input.longitude)?;
            Some(current.address().with_changes(AddressChanges {
                street: input.street,
                number: input.number,
                complement: input.complement,
                postal_code: changed(input.postal_code, PostalCode::new)?,
                geo_location,
            })?)
        } else {
            None
        };

        let changes = SubscriberChanges {
            email: changed(input.email, Email::new)?,
            address,
            neighborhood_id: input.neighborhood_id.map(NeighborhoodId::new),
        };
        let subscriber = self.repository.update(id, changes).await?;
        info!("Updated subscriber {}", id);
        Ok(subscriber)
    }

    /// Remove a subscriber. Fails with a dependency error while reports reference it.
    pub async fn unsubscribe(&self, id: SubscriberId) -> EcoRotaResult<()> {
        self.repository.delete(id).await?;
        info!("Subscriber {} unsubscribed", id);
        Ok(())
    }
}
