//! Audit metadata shared by entities.

use crate::domain::entities::AdministratorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation and last-update instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Timestamps {
    /// Timestamps for an entity created at `at`.
    pub fn created(at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            updated_at: at,
        }
    }

    pub fn restore(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy with `updated_at` moved to `at`. `created_at` never changes.
    pub fn touched(&self, at: DateTime<Utc>) -> Self {
        Self {
            created_at: self.created_at,
            updated_at: at,
        }
    }
}

/// Timestamps plus the administrators who created and last changed a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    #[serde(flatten)]
    timestamps: Timestamps,
    created_by: AdministratorId,
    updated_by: Option<AdministratorId>,
}

impl AuditInfo {
    pub fn created(by: AdministratorId, at: DateTime<Utc>) -> Self {
        Self {
            timestamps: Timestamps::created(at),
            created_by: by,
            updated_by: None,
        }
    }

    pub fn restore(
        timestamps: Timestamps,
        created_by: AdministratorId,
        updated_by: Option<AdministratorId>,
    ) -> Self {
        Self {
            timestamps,
            created_by,
            updated_by,
        }
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at()
    }

    pub fn created_by(&self) -> AdministratorId {
        self.created_by
    }

    pub fn updated_by(&self) -> Option<AdministratorId> {
        self.updated_by
    }

    /// Record an update by `by` at `at`.
    pub fn touched(&self, by: AdministratorId, at: DateTime<Utc>) -> Self {
        Self {
            timestamps: self.timestamps.touched(at),
            created_by: self.created_by,
            updated_by: Some(by),
        }
    }

    /// Whether `admin` appears in either audit field.
    pub fn references(&self, admin: AdministratorId) -> bool {
        self.created_by == admin || self.updated_by == Some(admin)
    }
}
