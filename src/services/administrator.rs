//! Administrator use cases: registration, profile updates, login and token checks.

use crate::domain::entities::{
    Administrator, AdministratorChanges, AdministratorId, NewAdministrator,
};
use crate::domain::value_objects::Email;
use crate::error::{EcoRotaError, EcoRotaResult, ValidationError};
use crate::providers::{HashProvider, TokenClaims, TokenProvider, TokenSubject};
use crate::services::changed;
use crate::storage::{AdministratorRepository, EntityKind, PersistenceError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdministratorInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CreateAdministratorInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAdministratorInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial profile update. A new password is hashed before it is stored.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAdministratorInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateAdministratorInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateAdministratorInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedAdministrator {
    pub administrator: Administrator,
    pub token: String,
}

pub struct AdministratorService<R, H, T> {
    repository: R,
    hasher: H,
    tokens: T,
}

impl<R, H, T> AdministratorService<R, H, T>
where
    R: AdministratorRepository,
    H: HashProvider,
    T: TokenProvider,
{
    pub fn new(repository: R, hasher: H, tokens: T) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    pub async fn create(&self, input: CreateAdministratorInput) -> EcoRotaResult<Administrator> {
        let email = Email::new(&input.email)?;
        if input.password.trim().is_empty() {
            return Err(ValidationError::missing_field("password").into());
        }
        let password_hash = self.hasher.generate_hash(&input.password).await?;

        let administrator = self
            .repository
            .create(NewAdministrator::new(&input.name, email, password_hash)?)
            .await?;
        info!(
            "Created administrator {} <{}>",
            administrator.id(),
            administrator.email()
        );
        Ok(administrator)
    }

    /// Change name, email or password. Only the fields present are touched.
    pub async fn update(
        &self,
        id: AdministratorId,
        input: UpdateAdministratorInput,
    ) -> EcoRotaResult<Administrator> {
        let email = changed(input.email, Email::new)?;
        let password_hash = match input.password {
            Some(password) if password.trim().is_empty() => {
                return Err(ValidationError::missing_field("password").into());
            }
            Some(password) => Some(self.hasher.generate_hash(&password).await?),
            None => None,
        };

        let changes = AdministratorChanges {
            name: input.name,
            email,
            password_hash,
        };
        let rehashed = changes.password_hash.is_some();
        let administrator = self.repository.update(id, changes).await?;
        if rehashed {
            info!("Administrator {} changed their password", id);
        } else {
            info!("Updated administrator {}", id);
        }
        Ok(administrator)
    }

    /// Check credentials and issue an access token.
    ///
    /// An unknown email and a wrong password fail the same way.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> EcoRotaResult<AuthenticatedAdministrator> {
        let email = Email::new(email)?;
        let Some(administrator) = self.repository.find_by_email(&email).await? else {
            warn!("Login attempt for unknown administrator <{}>", email);
            return Err(EcoRotaError::InvalidCredentials);
        };

        if !self
            .hasher
            .compare_hash(password, administrator.password_hash())
            .await?
        {
            warn!("Wrong password for administrator {}", administrator.id());
            return Err(EcoRotaError::InvalidCredentials);
        }

        let subject = TokenSubject::new(
            administrator.id().value(),
            administrator.email().value(),
            administrator.name(),
        );
        let token = self.tokens.generate(&subject, None)?;
        info!("Administrator {} authenticated", administrator.id());
        Ok(AuthenticatedAdministrator {
            administrator,
            token,
        })
    }

    /// Verify an access token and return who it was issued to.
    pub fn verify_token(&self, token: &str) -> EcoRotaResult<TokenClaims> {
        Ok(self.tokens.verify(token)?)
    }

    pub async fn find_by_id(&self, id: AdministratorId) -> EcoRotaResult<Administrator> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Administrator, id).into())
    }

    pub async fn list(&self) -> EcoRotaResult<Vec<Administrator>> {
        let administrators = self.repository.find_all().await?;
        debug!("Listed {} administrators", administrators.len());
        Ok(administrators)
    }

    /// Remove an administrator. Fails while any audit field still names them.
    pub async fn delete(&self, id: AdministratorId) -> EcoRotaResult<()> {
        self.repository.delete(id).await?;
        info!("Deleted administrator {}", id);
        Ok(())
    }
}
