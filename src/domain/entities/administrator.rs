//! Administrator aggregate.

use crate::domain::entities::{AdministratorId, Timestamps, required_name};
use crate::domain::value_objects::Email;
use crate::error::ValidationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A back-office user. The password hash never leaves this type through `Debug`
/// or serialization.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Administrator {
    id: AdministratorId,
    name: String,
    email: Email,
    #[serde(skip)]
    password_hash: String,
    #[serde(flatten)]
    timestamps: Timestamps,
}

/// Input for storing a new administrator. The password must already be hashed.
#[derive(Clone, PartialEq)]
pub struct NewAdministrator {
    pub(crate) name: String,
    pub(crate) email: Email,
    pub(crate) password_hash: String,
}

/// Fields to change on an administrator. `None` keeps the current value.
#[derive(Clone, Default, PartialEq)]
pub struct AdministratorChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    /// Already hashed.
    pub password_hash: Option<String>,
}

impl NewAdministrator {
    pub fn new(name: &str, email: Email, password_hash: String) -> ValidationResult<Self> {
        Ok(Self {
            name: required_name("name", name)?,
            email,
            password_hash: required_name("password", &password_hash)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn into_administrator(self, id: AdministratorId, at: DateTime<Utc>) -> Administrator {
        Administrator {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            timestamps: Timestamps::created(at),
        }
    }
}

impl Administrator {
    pub fn restore(
        id: AdministratorId,
        name: &str,
        email: Email,
        password_hash: String,
        timestamps: Timestamps,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id,
            name: required_name("name", name)?,
            email,
            password_hash: required_name("password", &password_hash)?,
            timestamps,
        })
    }

    pub fn id(&self) -> AdministratorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn with_changes(
        &self,
        changes: AdministratorChanges,
        at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: self.id,
            name: match changes.name {
                Some(name) => required_name("name", &name)?,
                None => self.name.clone(),
            },
            email: changes.email.unwrap_or_else(|| self.email.clone()),
            password_hash: match changes.password_hash {
                Some(hash) => required_name("password", &hash)?,
                None => self.password_hash.clone(),
            },
            timestamps: self.timestamps.touched(at),
        })
    }
}

impl fmt::Debug for Administrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Administrator")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("timestamps", &self.timestamps)
            .finish()
    }
}

impl fmt::Debug for NewAdministrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAdministrator")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for AdministratorChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdministratorChanges")
            .field("name", &self.name)
            .field("email", &self.email)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
