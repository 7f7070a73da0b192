//! Subscriber aggregate: a resident who receives collection notices.

use crate::domain::entities::{NeighborhoodId, SubscriberId, Timestamps};
use crate::domain::value_objects::{Address, Email};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    id: SubscriberId,
    email: Email,
    address: Address,
    neighborhood_id: NeighborhoodId,
    #[serde(flatten)]
    timestamps: Timestamps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscriber {
    pub email: Email,
    pub address: Address,
    pub neighborhood_id: NeighborhoodId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriberChanges {
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub neighborhood_id: Option<NeighborhoodId>,
}

impl NewSubscriber {
    pub fn into_subscriber(self, id: SubscriberId, at: DateTime<Utc>) -> Subscriber {
        Subscriber {
            id,
            email: self.email,
            address: self.address,
            neighborhood_id: self.neighborhood_id,
            timestamps: Timestamps::created(at),
        }
    }
}

impl Subscriber {
    pub fn restore(
        id: SubscriberId,
        email: Email,
        address: Address,
        neighborhood_id: NeighborhoodId,
        timestamps: Timestamps,
    ) -> Self {
        Self {
            id,
            email,
            address,
            neighborhood_id,
            timestamps,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn neighborhood_id(&self) -> NeighborhoodId {
        self.neighborhood_id
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn with_changes(&self, changes: SubscriberChanges, at: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            email: changes.email.unwrap_or_else(|| self.email.clone()),
            address: changes.address.unwrap_or_else(|| self.address.clone()),
            neighborhood_id: changes.neighborhood_id.unwrap_or(self.neighborhood_id),
            timestamps: self.timestamps.touched(at),
        }
    }
}
