use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use models::user::{self, UserChanges};

use super::domain::{CreateUser, UpdateUser, UserWithAddresses};
use super::repository::UserRepository;
use crate::credentials::CredentialHasher;
use crate::domain::MutationResult;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// User business service independent of web framework
pub struct UsersService {
    repo: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: CredentialHasher) -> Self { Self { repo, hasher } }

    /// Register a user. The plaintext password is hashed before it reaches the
    /// repository; a taken email yields `Conflict`.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUser) -> Result<user::Model, ServiceError> {
        input.validate()?;
        if self.repo.find_by_email(&input.email).await?.is_some() {
            debug!("email already taken");
            return Err(ServiceError::Conflict("email already registered".into()));
        }
        let hash = self.hasher.spawn_hash(&input.password).await?;
        let user = self.repo.insert(&input.email, Some(hash)).await?;
        info!(user_id = %user.id, email = %user.email, "user_created");
        Ok(user)
    }

    /// Fetch a user with its addresses populated.
    pub async fn find_one(&self, id: Uuid) -> Result<Option<UserWithAddresses>, ServiceError> {
        self.repo.find_with_addresses(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<user::Model, ServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user not found: {}", email)))
    }

    pub async fn find_all(&self, page: Pagination) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.list(page).await
    }

    /// Apply a partial update. A new password is re-hashed; a new email must
    /// not belong to another account. An update with no fields is rejected.
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update(&self, id: Uuid, input: UpdateUser) -> Result<MutationResult, ServiceError> {
        input.validate()?;
        if input.email.is_none() && input.password.is_none() {
            return Err(ServiceError::Validation("no fields to update".into()));
        }
        if let Some(email) = &input.email {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::Conflict("email already registered".into()));
                }
            }
        }
        let password_hash = match &input.password {
            Some(plain) => Some(self.hasher.spawn_hash(plain).await?),
            None => None,
        };
        let changes = UserChanges { email: input.email, password_hash };
        let affected = self.repo.update(id, changes).await?;
        info!(affected, "user_updated");
        Ok(affected.into())
    }

    /// Delete a user and, through the repository, every address it owns.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn remove(&self, id: Uuid) -> Result<MutationResult, ServiceError> {
        let affected = self.repo.delete(id).await?;
        info!(affected, "user_removed");
        Ok(affected.into())
    }
}
